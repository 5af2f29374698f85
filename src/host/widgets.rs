//! Well-known interface ids the lookup tool hooks into

use super::WidgetId;

pub const MINIMAP_GROUP_ID: i32 = 160;
pub const QUESTLIST_GROUP_ID: i32 = 399;
pub const ACHIEVEMENT_DIARY_GROUP_ID: i32 = 259;
pub const SKILLS_GROUP_ID: i32 = 320;

/// Container holding the minimap orbs; the icon is added as one of its children
pub const MINIMAP_ORBS: WidgetId = WidgetId::new(MINIMAP_GROUP_ID, 0);

pub const QUESTLIST_FREE_CONTAINER: WidgetId = WidgetId::new(QUESTLIST_GROUP_ID, 7);
pub const QUESTLIST_MEMBERS_CONTAINER: WidgetId = WidgetId::new(QUESTLIST_GROUP_ID, 8);
pub const QUESTLIST_MINIQUEST_CONTAINER: WidgetId = WidgetId::new(QUESTLIST_GROUP_ID, 9);

/// The three quest list containers, in display order
pub const QUESTLIST_CONTAINERS: [WidgetId; 3] = [
    QUESTLIST_FREE_CONTAINER,
    QUESTLIST_MEMBERS_CONTAINER,
    QUESTLIST_MINIQUEST_CONTAINER,
];

pub const ACHIEVEMENT_DIARY_CONTAINER: WidgetId = WidgetId::new(ACHIEVEMENT_DIARY_GROUP_ID, 2);

pub const SKILLS_CONTAINER: WidgetId = WidgetId::new(SKILLS_GROUP_ID, 0);
