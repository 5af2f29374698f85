//! Click-to-target resolution
//!
//! Turns a confirmed armed click into a [`TargetDescriptor`]. Resolution is a
//! match over the click's [`MenuAction`] with one function per supported kind;
//! every function ends at [`TargetDescriptor::new`], which is the only place a
//! descriptor is built.

use crate::events::MenuOptionClicked;
use crate::host::{ClientState, Entities, MenuAction, WidgetId, WidgetTree, WorldPoint};
use crate::util::strip_tags;
use serde::Serialize;

/// What kind of thing the player clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Item,
    Npc,
    Object,
    /// An item shown by an interface widget (bank, inventory, equipment)
    WidgetItem,
}

/// Canonical description of a lookup target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetDescriptor {
    kind: TargetKind,
    canonical_id: i32,
    display_name: String,
    world_location: Option<WorldPoint>,
}

impl TargetDescriptor {
    /// Build a descriptor, stripping markup from `raw_name`.
    ///
    /// Returns `None` when nothing but markup (or nothing at all) remains.
    pub fn new(
        kind: TargetKind,
        canonical_id: i32,
        raw_name: &str,
        world_location: Option<WorldPoint>,
    ) -> Option<Self> {
        let display_name = strip_tags(raw_name);
        if display_name.trim().is_empty() {
            return None;
        }
        Some(Self {
            kind,
            canonical_id,
            display_name,
            world_location,
        })
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn canonical_id(&self) -> i32 {
        self.canonical_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn world_location(&self) -> Option<WorldPoint> {
        self.world_location
    }
}

/// Resolves armed clicks against host state
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetResolver;

impl TargetResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a click into a target.
    ///
    /// Unsupported action kinds log a diagnostic and return `None`; missing
    /// host state (despawned NPC, unknown object, unloaded widget) does too.
    pub fn resolve<H>(&self, host: &H, click: &MenuOptionClicked) -> Option<TargetDescriptor>
    where
        H: WidgetTree + ClientState + Entities + ?Sized,
    {
        let target = match click.action {
            MenuAction::ItemUseOnWidget | MenuAction::SpellCastOnGroundItem => {
                self.resolve_item(host, click.id, TargetKind::Item)
            }
            MenuAction::SpellCastOnNpc => self.resolve_npc(host, click.id),
            MenuAction::SpellCastOnGameObject => {
                self.resolve_object(host, click.id, click.action_param, click.widget_id)
            }
            MenuAction::SpellCastOnWidget => {
                self.resolve_widget_item(host, WidgetId(click.widget_id), click.action_param)
            }
            MenuAction::Cancel => {
                tracing::debug!("Lookup cancelled");
                return None;
            }
            other => {
                tracing::info!(
                    action = ?other,
                    action_id = other.id(),
                    option = %click.option,
                    target = %click.menu_target,
                    "Unknown menu option for lookup: {:?}",
                    other
                );
                return None;
            }
        };

        match &target {
            Some(t) => tracing::debug!(
                kind = ?t.kind,
                id = t.canonical_id,
                name = %t.display_name,
                "Resolved lookup target"
            ),
            None => tracing::debug!(action = ?click.action, "Lookup target not resolved"),
        }
        target
    }

    fn resolve_item<H>(&self, host: &H, raw_id: i32, kind: TargetKind) -> Option<TargetDescriptor>
    where
        H: Entities + ?Sized,
    {
        let id = host.canonicalize_item(raw_id);
        let Some(name) = host.item_name(id) else {
            tracing::debug!(item_id = id, "No item composition");
            return None;
        };
        TargetDescriptor::new(kind, id, &name, None)
    }

    fn resolve_npc<H>(&self, host: &H, index: i32) -> Option<TargetDescriptor>
    where
        H: Entities + ?Sized,
    {
        let Some(npc) = host.npc_by_index(index) else {
            tracing::debug!(index, "No cached NPC at index");
            return None;
        };
        let composition = npc.transformed_composition();
        TargetDescriptor::new(
            TargetKind::Npc,
            composition.id,
            &composition.name,
            Some(npc.world_location),
        )
    }

    fn resolve_object<H>(
        &self,
        host: &H,
        object_id: i32,
        scene_x: i32,
        scene_y: i32,
    ) -> Option<TargetDescriptor>
    where
        H: ClientState + Entities + ?Sized,
    {
        let Some(mut definition) = host.object_definition(object_id) else {
            tracing::debug!(object_id, "No object definition");
            return None;
        };
        if definition.impostor_ids.is_some() {
            let Some(impostor) = host.object_impostor(&definition) else {
                tracing::debug!(object_id, "Impostor definition unavailable");
                return None;
            };
            definition = impostor;
        }

        let location = host.scene_to_world(scene_x, scene_y, host.plane());
        TargetDescriptor::new(
            TargetKind::Object,
            definition.id,
            &definition.name,
            Some(location),
        )
    }

    fn resolve_widget_item<H>(
        &self,
        host: &H,
        widget_id: WidgetId,
        index: i32,
    ) -> Option<TargetDescriptor>
    where
        H: WidgetTree + Entities + ?Sized,
    {
        let item_id = host
            .resolve_widget(widget_id, index)
            .and_then(|w| w.carried_item());
        match item_id {
            Some(item_id) => self.resolve_item(host, item_id, TargetKind::WidgetItem),
            None => {
                tracing::info!(
                    widget = %widget_id,
                    index,
                    "Unsupported widget for lookup"
                );
                None
            }
        }
    }
}
