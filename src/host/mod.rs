// Host module - the game client surface the lookup tool talks to
//
// Everything the plugin knows about the client goes through the traits in
// this file. The plugin never owns the host: every handler borrows it for the
// duration of one event and hands it back, so no host state (in particular
// the menu entry list) is retained between events.
//
// Architecture:
// - WidgetTree: read widgets, create/clear the one icon widget
// - ClientState: targeting flags, plane and scene coordinates
// - Entities: item, NPC and object composition lookups
// - MenuEntries: full-snapshot read/replace of the open menu
// - LinkOpener / SearchPrompt: fire-and-forget outer surfaces
//
// `SimHost` (sim.rs) is an in-memory implementation used by replay and tests.

mod sim;
pub mod widgets;

pub use sim::{ChildFixture, HostCall, ItemFixture, ObjectFixture, SimHost, World};

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers and coordinates
// ============================================================================

/// Packed widget identifier: `(group << 16) | child`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(pub i32);

impl WidgetId {
    pub const fn new(group: i32, child: i32) -> Self {
        Self((group << 16) | child)
    }

    /// Interface group this widget belongs to
    pub const fn group(self) -> i32 {
        self.0 >> 16
    }

    /// Child index within the group
    pub const fn child(self) -> i32 {
        self.0 & 0xFFFF
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group(), self.child())
    }
}

/// A tile in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: i32,
    pub y: i32,
    pub plane: i32,
}

impl WorldPoint {
    pub fn new(x: i32, y: i32, plane: i32) -> Self {
        Self { x, y, plane }
    }
}

// ============================================================================
// Menu
// ============================================================================

/// Menu action kinds as numbered by the host
///
/// Only the kinds the lookup tool reacts to get their own variant; every other
/// host id round-trips through `Other` untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    SpellCastOnGameObject,
    SpellCastOnNpc,
    SpellCastOnGroundItem,
    SpellCastOnWidget,
    ItemUseOnWidget,
    Examine,
    Cancel,
    /// Entries added by client-side extensions (ours carry this kind)
    RuneLite,
    Other(i32),
}

impl MenuAction {
    /// Numeric id the host uses for this kind
    pub fn id(self) -> i32 {
        match self {
            Self::SpellCastOnGameObject => 2,
            Self::SpellCastOnNpc => 8,
            Self::SpellCastOnGroundItem => 17,
            Self::SpellCastOnWidget => 25,
            Self::ItemUseOnWidget => 31,
            Self::Examine => 1002,
            Self::Cancel => 1006,
            Self::RuneLite => 1500,
            Self::Other(id) => id,
        }
    }
}

/// One row of the host's right-click menu
///
/// The host renders the list bottom-up: the last entry is the top of the menu
/// and the default left-click action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub option: String,
    pub target: String,
    pub action: MenuAction,
    #[serde(default)]
    pub param0: i32,
    #[serde(default)]
    pub param1: i32,
}

impl MenuEntry {
    pub fn new(
        option: impl Into<String>,
        target: impl Into<String>,
        action: MenuAction,
        param0: i32,
        param1: i32,
    ) -> Self {
        Self {
            option: option.into(),
            target: target.into(),
            action,
            param0,
            param1,
        }
    }
}

// ============================================================================
// Widgets
// ============================================================================

/// Widget content types the plugin distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    #[default]
    Layer,
    Rectangle,
    Text,
    Graphic,
    Model,
}

/// Read-only snapshot of a host widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    #[serde(default)]
    pub kind: WidgetKind,
    /// Item shown by this widget, -1 when none
    #[serde(default = "no_item")]
    pub item_id: i32,
    /// Right-click action labels by slot; empty slots are `None`
    #[serde(default)]
    pub actions: Vec<Option<String>>,
    #[serde(default = "no_parent")]
    pub parent_id: WidgetId,
    #[serde(default)]
    pub name: String,
}

fn no_item() -> i32 {
    -1
}

fn no_parent() -> WidgetId {
    WidgetId(-1)
}

impl Widget {
    /// The item this widget carries, if it is a graphic showing one
    pub fn carried_item(&self) -> Option<i32> {
        (self.kind == WidgetKind::Graphic && self.item_id != -1).then_some(self.item_id)
    }

    /// First action label that is present and non-empty
    pub fn first_action(&self) -> Option<&str> {
        self.actions
            .iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
    }
}

/// Sprites the lookup icon switches between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupSprite {
    Icon,
    SelectedIcon,
}

/// How a widget coordinate is measured against its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionMode {
    AbsoluteLeft,
    AbsoluteRight,
    AbsoluteTop,
    AbsoluteBottom,
}

/// Bitmask of target kinds a targeting widget accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClickMask(pub u32);

impl ClickMask {
    pub const USE_GROUND_ITEM: Self = Self(1 << 11);
    pub const USE_NPC: Self = Self(1 << 12);
    pub const USE_OBJECT: Self = Self(1 << 13);
    pub const USE_WIDGET: Self = Self(1 << 14);
    pub const USE_ITEM: Self = Self(1 << 15);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// Everything the host needs to build the lookup icon widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconSpec {
    pub sprite: LookupSprite,
    pub x: i32,
    pub y: i32,
    pub x_mode: PositionMode,
    pub y_mode: PositionMode,
    pub width: i32,
    pub height: i32,
    pub target_verb: String,
    pub name: String,
    pub click_mask: ClickMask,
    pub no_click_through: bool,
    /// `(slot, label)` pairs; the host reports slot `n` as op `n + 1`
    pub actions: Vec<(usize, String)>,
}

// ============================================================================
// Entities
// ============================================================================

/// Composition (definition) of an NPC
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcComposition {
    pub id: i32,
    pub name: String,
}

/// A live NPC instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    /// Slot in the host's cached NPC array
    pub index: i32,
    pub world_location: WorldPoint,
    pub composition: NpcComposition,
    /// Current morphed identity; `None` means the NPC is not transformed
    #[serde(default)]
    pub transformed: Option<NpcComposition>,
}

impl Npc {
    /// Identity the player currently sees
    pub fn transformed_composition(&self) -> &NpcComposition {
        self.transformed.as_ref().unwrap_or(&self.composition)
    }
}

/// Static definition of a scene object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDefinition {
    pub id: i32,
    pub name: String,
    /// Disguise ids; the host picks one from client state
    #[serde(default)]
    pub impostor_ids: Option<Vec<i32>>,
}

// ============================================================================
// Host traits
// ============================================================================

/// Read access to the widget tree plus the icon widget the plugin owns
pub trait WidgetTree {
    fn widget(&self, id: WidgetId) -> Option<Widget>;

    /// Dynamic child `index` of widget `id`
    fn widget_child(&self, id: WidgetId, index: i32) -> Option<Widget>;

    /// Build the lookup icon as child `slot` of `parent`.
    /// Returns false if the parent is not loaded.
    fn create_icon(&mut self, parent: WidgetId, slot: usize, spec: &IconSpec) -> bool;

    /// Empty child `slot` of `parent`
    fn clear_child(&mut self, parent: WidgetId, slot: usize);

    fn set_icon_sprite(&mut self, sprite: LookupSprite);

    /// The widget a menu event points at: child `index` of `id`, or `id`
    /// itself when `index` is -1
    fn resolve_widget(&self, id: WidgetId, index: i32) -> Option<Widget> {
        if index == -1 {
            self.widget(id)
        } else {
            self.widget_child(id, index)
        }
    }
}

/// Client-wide flags and coordinate helpers
pub trait ClientState {
    fn set_all_widgets_op_targetable(&mut self, targetable: bool);
    fn set_spell_selected(&mut self, selected: bool);
    fn plane(&self) -> i32;
    fn scene_to_world(&self, scene_x: i32, scene_y: i32, plane: i32) -> WorldPoint;
}

/// Composition lookups; "not found" is `None`
pub trait Entities {
    /// Map noted/placeholder variants to the base item id
    fn canonicalize_item(&self, item_id: i32) -> i32;
    fn item_name(&self, item_id: i32) -> Option<String>;
    fn npc_by_index(&self, index: i32) -> Option<Npc>;
    fn object_definition(&self, object_id: i32) -> Option<ObjectDefinition>;
    /// Definition the object currently presents, for objects with impostor ids
    fn object_impostor(&self, definition: &ObjectDefinition) -> Option<ObjectDefinition>;
}

/// Full-snapshot access to the open menu
pub trait MenuEntries {
    fn menu_entries(&self) -> Vec<MenuEntry>;
    fn set_menu_entries(&mut self, entries: Vec<MenuEntry>);
}

pub trait LinkOpener {
    fn open_url(&mut self, url: &str);
}

pub trait SearchPrompt {
    fn open_search_input(&mut self);
}

/// Everything the plugin needs from the client
pub trait Host: WidgetTree + ClientState + Entities + MenuEntries + LinkOpener + SearchPrompt {}

impl<T> Host for T where
    T: WidgetTree + ClientState + Entities + MenuEntries + LinkOpener + SearchPrompt
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_id_packing() {
        let id = WidgetId::new(399, 7);
        assert_eq!(id.group(), 399);
        assert_eq!(id.child(), 7);
        assert_eq!(id.0, (399 << 16) | 7);
        assert_eq!(id.to_string(), "399.7");
    }

    #[test]
    fn test_menu_action_ids() {
        assert_eq!(MenuAction::SpellCastOnWidget.id(), 25);
        assert_eq!(MenuAction::RuneLite.id(), 1500);
        assert_eq!(MenuAction::Other(57).id(), 57);
    }

    #[test]
    fn test_carried_item_requires_graphic() {
        let mut widget = Widget {
            id: WidgetId::new(149, 0),
            kind: WidgetKind::Graphic,
            item_id: 4151,
            actions: vec![],
            parent_id: WidgetId(-1),
            name: String::new(),
        };
        assert_eq!(widget.carried_item(), Some(4151));

        widget.kind = WidgetKind::Text;
        assert_eq!(widget.carried_item(), None);

        widget.kind = WidgetKind::Graphic;
        widget.item_id = -1;
        assert_eq!(widget.carried_item(), None);
    }

    #[test]
    fn test_first_action_skips_empty_slots() {
        let widget = Widget {
            id: WidgetId::new(320, 1),
            kind: WidgetKind::Layer,
            item_id: -1,
            actions: vec![None, Some(String::new()), Some("View Attack guide".into())],
            parent_id: WidgetId::new(320, 0),
            name: String::new(),
        };
        assert_eq!(widget.first_action(), Some("View Attack guide"));
    }

    #[test]
    fn test_npc_falls_back_to_base_composition() {
        let npc = Npc {
            index: 3,
            world_location: WorldPoint::new(3200, 3200, 0),
            composition: NpcComposition {
                id: 1,
                name: "Base".into(),
            },
            transformed: None,
        };
        assert_eq!(npc.transformed_composition().name, "Base");
    }

    #[test]
    fn test_click_mask_union() {
        let mask = ClickMask::USE_NPC.union(ClickMask::USE_OBJECT);
        assert_eq!(mask.0, (1 << 12) | (1 << 13));
    }
}
