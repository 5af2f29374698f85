// Events the host delivers to the lookup tool
//
// The host pushes these on its single event thread, one at a time, in the
// order things happen in the client. Using an enum gives one handler per
// event kind and lets replay scripts describe a session as plain JSON.

use crate::host::{MenuAction, MenuEntry, WidgetId};
use serde::{Deserialize, Serialize};

/// A menu entry was just appended by the host (or another extension)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntryAdded {
    /// Widget the entry acts on (`param1`)
    pub widget_id: WidgetId,
    /// Dynamic child index within that widget, -1 for the widget itself (`param0`)
    pub child_index: i32,
    pub action: MenuAction,
    pub option: String,
    #[serde(default)]
    pub target: String,
}

impl MenuEntryAdded {
    /// The entry the host appended before notifying
    pub fn to_entry(&self) -> MenuEntry {
        MenuEntry::new(
            self.option.clone(),
            self.target.clone(),
            self.action,
            self.child_index,
            self.widget_id.0,
        )
    }
}

/// The player activated a menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOptionClicked {
    pub action: MenuAction,
    /// Item id, NPC index or object id depending on `action`
    #[serde(default)]
    pub id: i32,
    /// Widget id, or the scene y coordinate for object actions
    #[serde(default)]
    pub widget_id: i32,
    /// Child index, or the scene x coordinate for object actions
    #[serde(default)]
    pub action_param: i32,
    #[serde(default)]
    pub option: String,
    #[serde(default)]
    pub menu_target: String,
    /// Set when a handler suppresses the host's default handling
    #[serde(default)]
    pub consumed: bool,
}

impl MenuOptionClicked {
    pub fn consume(&mut self) {
        self.consumed = true;
    }
}

/// Main event type delivered by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// An interface group finished loading
    WidgetLoaded { group_id: i32 },

    MenuEntryAdded(MenuEntryAdded),

    MenuOptionClicked(MenuOptionClicked),

    /// Pointer entered the lookup icon while targeting
    IconTargetEnter,

    /// Pointer left the lookup icon; not always delivered
    IconTargetLeave,

    /// One of the icon's own actions was chosen
    IconOp { op: i32 },
}

impl HostEvent {
    /// Short label for logs and reports
    pub fn kind(&self) -> &'static str {
        match self {
            Self::WidgetLoaded { .. } => "widget_loaded",
            Self::MenuEntryAdded(_) => "menu_entry_added",
            Self::MenuOptionClicked(_) => "menu_option_clicked",
            Self::IconTargetEnter => "icon_target_enter",
            Self::IconTargetLeave => "icon_target_leave",
            Self::IconOp { .. } => "icon_op",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_events() {
        let events: Vec<HostEvent> = serde_json::from_str(
            r#"[
                {"type": "icon_target_enter"},
                {"type": "menu_entry_added", "widget_id": 26148871, "child_index": 3,
                 "action": "spell_cast_on_widget", "option": "Lookup"},
                {"type": "menu_option_clicked", "action": "spell_cast_on_npc", "id": 12},
                {"type": "icon_op", "op": 6},
                {"type": "widget_loaded", "group_id": 160}
            ]"#,
        )
        .unwrap();

        assert_eq!(events.len(), 5);
        assert_eq!(events[0], HostEvent::IconTargetEnter);
        match &events[1] {
            HostEvent::MenuEntryAdded(added) => {
                assert_eq!(added.widget_id.group(), 399);
                assert_eq!(added.child_index, 3);
                assert_eq!(added.action, MenuAction::SpellCastOnWidget);
                assert!(added.target.is_empty());
            }
            other => panic!("unexpected event {other:?}"),
        }
        match &events[2] {
            HostEvent::MenuOptionClicked(click) => {
                assert_eq!(click.id, 12);
                assert!(!click.consumed);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(events[3].kind(), "icon_op");
    }

    #[test]
    fn test_added_entry_carries_params() {
        let added = MenuEntryAdded {
            widget_id: WidgetId::new(399, 7),
            child_index: 4,
            action: MenuAction::Other(57),
            option: "Read Journal:".into(),
            target: "<col=ff9040>Cook's Assistant</col>".into(),
        };
        let entry = added.to_entry();
        assert_eq!(entry.param0, 4);
        assert_eq!(entry.param1, WidgetId::new(399, 7).0);
        assert_eq!(entry.option, "Read Journal:");
    }
}
