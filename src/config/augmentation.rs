//! Augmentation configuration
//!
//! Toggles for the menu rules that add or remove entries in host menus.

use serde::Deserialize;

/// Menu rule toggles
///
/// Everything is on by default; each flag only controls whether the matching
/// rule is registered at startup.
#[derive(Debug, Clone)]
pub struct Augmentation {
    /// "Quick Guide" / "Guide" entries on quest list rows
    pub quest_guides: bool,

    /// "Prices" entry on achievement diary pages
    pub diary_prices: bool,

    /// "Prices" entry on skill guide tiles
    pub skill_prices: bool,

    /// Remove the lookup entry from widgets that carry no item while armed
    pub suppress_unsupported_widgets: bool,
}

impl Default for Augmentation {
    fn default() -> Self {
        Self {
            quest_guides: true,
            diary_prices: true,
            skill_prices: true,
            suppress_unsupported_widgets: true,
        }
    }
}

/// Augmentation settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileAugmentation {
    pub quest_guides: Option<bool>,
    pub diary_prices: Option<bool>,
    pub skill_prices: Option<bool>,
    pub suppress_unsupported_widgets: Option<bool>,
}

impl Augmentation {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileAugmentation>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            quest_guides: file.quest_guides.unwrap_or(defaults.quest_guides),
            diary_prices: file.diary_prices.unwrap_or(defaults.diary_prices),
            skill_prices: file.skill_prices.unwrap_or(defaults.skill_prices),
            suppress_unsupported_widgets: file
                .suppress_unsupported_widgets
                .unwrap_or(defaults.suppress_unsupported_widgets),
        }
    }
}
