// Simulated host - an in-memory client for replay and tests
//
// `World` is the static fixture (widgets, items, NPCs, objects, the menu the
// host builds before extensions run). `SimHost` wraps it with the mutable
// client state the plugin touches and records every side effect in call
// order so callers can assert on exactly what the plugin did.

use super::{
    ClientState, Entities, IconSpec, LinkOpener, LookupSprite, MenuEntries, MenuEntry, Npc,
    ObjectDefinition, SearchPrompt, Widget, WidgetId, WidgetTree, WorldPoint,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Fixture
// ============================================================================

/// An item known to the simulated item manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemFixture {
    pub id: i32,
    pub name: String,
    /// Base id for noted/placeholder variants
    #[serde(default)]
    pub canonical_id: Option<i32>,
}

/// A dynamic child widget, addressed by parent id and index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildFixture {
    pub parent: WidgetId,
    pub index: i32,
    pub widget: Widget,
}

/// An object definition plus which impostor the client state currently selects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectFixture {
    pub definition: ObjectDefinition,
    #[serde(default)]
    pub active_impostor: usize,
}

/// Static content of the simulated client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct World {
    pub widgets: Vec<Widget>,
    pub children: Vec<ChildFixture>,
    pub items: Vec<ItemFixture>,
    pub npcs: Vec<Npc>,
    pub objects: Vec<ObjectFixture>,
    pub plane: i32,
    /// World coordinates of scene tile (0, 0)
    pub scene_base_x: i32,
    pub scene_base_y: i32,
    /// Entries the host puts in every freshly built menu
    pub base_menu: Vec<MenuEntry>,
}

// ============================================================================
// Recorded side effects
// ============================================================================

/// One mutating call the plugin made on the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum HostCall {
    SetAllWidgetsOpTargetable { targetable: bool },
    SetSpellSelected { selected: bool },
    SetIconSprite { sprite: LookupSprite },
    CreateIcon { parent: WidgetId, slot: usize },
    ClearChild { parent: WidgetId, slot: usize },
    SetMenuEntries { count: usize },
    OpenUrl { url: String },
    OpenSearchInput,
}

// ============================================================================
// SimHost
// ============================================================================

/// In-memory host implementing every plugin-facing trait
#[derive(Debug, Default)]
pub struct SimHost {
    world: World,
    widgets: HashMap<WidgetId, Widget>,
    children: HashMap<(WidgetId, i32), Widget>,
    items: HashMap<i32, ItemFixture>,
    objects: HashMap<i32, ObjectFixture>,
    menu: Vec<MenuEntry>,
    all_targetable: bool,
    spell_selected: bool,
    icon: Option<(WidgetId, usize, IconSpec)>,
    icon_sprite: Option<LookupSprite>,
    calls: Vec<HostCall>,
}

impl SimHost {
    pub fn new(world: World) -> Self {
        let widgets = world.widgets.iter().map(|w| (w.id, w.clone())).collect();
        let children = world
            .children
            .iter()
            .map(|c| ((c.parent, c.index), c.widget.clone()))
            .collect();
        let items = world.items.iter().map(|i| (i.id, i.clone())).collect();
        let objects = world
            .objects
            .iter()
            .map(|o| (o.definition.id, o.clone()))
            .collect();
        let menu = world.base_menu.clone();

        Self {
            world,
            widgets,
            children,
            items,
            objects,
            menu,
            ..Default::default()
        }
    }

    /// Host-side append that precedes a menu-entry-added notification
    pub fn push_menu_entry(&mut self, entry: MenuEntry) {
        self.menu.push(entry);
    }

    /// Close the menu; the next one starts from the base entries again
    pub fn reset_menu(&mut self) {
        self.menu = self.world.base_menu.clone();
    }

    pub fn add_widget(&mut self, widget: Widget) {
        self.widgets.insert(widget.id, widget);
    }

    pub fn add_child(&mut self, parent: WidgetId, index: i32, widget: Widget) {
        self.children.insert((parent, index), widget);
    }

    pub fn all_widgets_op_targetable(&self) -> bool {
        self.all_targetable
    }

    pub fn spell_selected(&self) -> bool {
        self.spell_selected
    }

    pub fn icon_sprite(&self) -> Option<LookupSprite> {
        self.icon_sprite
    }

    pub fn icon(&self) -> Option<&IconSpec> {
        self.icon.as_ref().map(|(_, _, spec)| spec)
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Take the recorded calls, leaving the log empty
    pub fn drain_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn opened_urls(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::OpenUrl { url } => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl WidgetTree for SimHost {
    fn widget(&self, id: WidgetId) -> Option<Widget> {
        self.widgets.get(&id).cloned()
    }

    fn widget_child(&self, id: WidgetId, index: i32) -> Option<Widget> {
        self.children.get(&(id, index)).cloned()
    }

    fn create_icon(&mut self, parent: WidgetId, slot: usize, spec: &IconSpec) -> bool {
        if !self.widgets.contains_key(&parent) {
            return false;
        }
        self.icon = Some((parent, slot, spec.clone()));
        self.icon_sprite = Some(spec.sprite);
        self.calls.push(HostCall::CreateIcon { parent, slot });
        true
    }

    fn clear_child(&mut self, parent: WidgetId, slot: usize) {
        if matches!(self.icon, Some((p, s, _)) if p == parent && s == slot) {
            self.icon = None;
            self.icon_sprite = None;
        }
        self.calls.push(HostCall::ClearChild { parent, slot });
    }

    fn set_icon_sprite(&mut self, sprite: LookupSprite) {
        if self.icon.is_some() {
            self.icon_sprite = Some(sprite);
        }
        self.calls.push(HostCall::SetIconSprite { sprite });
    }
}

impl ClientState for SimHost {
    fn set_all_widgets_op_targetable(&mut self, targetable: bool) {
        self.all_targetable = targetable;
        self.calls
            .push(HostCall::SetAllWidgetsOpTargetable { targetable });
    }

    fn set_spell_selected(&mut self, selected: bool) {
        self.spell_selected = selected;
        self.calls.push(HostCall::SetSpellSelected { selected });
    }

    fn plane(&self) -> i32 {
        self.world.plane
    }

    fn scene_to_world(&self, scene_x: i32, scene_y: i32, plane: i32) -> WorldPoint {
        WorldPoint::new(
            self.world.scene_base_x + scene_x,
            self.world.scene_base_y + scene_y,
            plane,
        )
    }
}

impl Entities for SimHost {
    fn canonicalize_item(&self, item_id: i32) -> i32 {
        self.items
            .get(&item_id)
            .and_then(|i| i.canonical_id)
            .unwrap_or(item_id)
    }

    fn item_name(&self, item_id: i32) -> Option<String> {
        self.items.get(&item_id).map(|i| i.name.clone())
    }

    fn npc_by_index(&self, index: i32) -> Option<Npc> {
        self.world.npcs.iter().find(|n| n.index == index).cloned()
    }

    fn object_definition(&self, object_id: i32) -> Option<ObjectDefinition> {
        self.objects.get(&object_id).map(|o| o.definition.clone())
    }

    fn object_impostor(&self, definition: &ObjectDefinition) -> Option<ObjectDefinition> {
        let ids = definition.impostor_ids.as_ref()?;
        let active = self
            .objects
            .get(&definition.id)
            .map(|o| o.active_impostor)
            .unwrap_or(0);
        let impostor_id = *ids.get(active)?;
        self.object_definition(impostor_id)
    }
}

impl MenuEntries for SimHost {
    fn menu_entries(&self) -> Vec<MenuEntry> {
        self.menu.clone()
    }

    fn set_menu_entries(&mut self, entries: Vec<MenuEntry>) {
        self.calls.push(HostCall::SetMenuEntries {
            count: entries.len(),
        });
        self.menu = entries;
    }
}

impl LinkOpener for SimHost {
    fn open_url(&mut self, url: &str) {
        self.calls.push(HostCall::OpenUrl {
            url: url.to_string(),
        });
    }
}

impl SearchPrompt for SimHost {
    fn open_search_input(&mut self) {
        self.calls.push(HostCall::OpenSearchInput);
    }
}
