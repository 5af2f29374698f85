//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Quote and escape a value as a TOML string
fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

impl Config {
    /// Serialize config to a commented TOML document
    pub fn to_toml(&self) -> String {
        format!(
            r#"# platinum-lookup configuration

# Base URL for lookup links; the item slug is appended as the last path segment
# (PLATINUM_LOOKUP_BASE_URL env var overrides)
lookup_base_url = {base_url}

# Menu entries added to (or removed from) host menus
[augmentation]
quest_guides = {quest_guides}
diary_prices = {diary_prices}
skill_prices = {skill_prices}
# Drop the lookup entry on widgets that show no item while armed
suppress_unsupported_widgets = {suppress}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON file logging (in addition to stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            base_url = toml_string(&self.lookup_base_url),
            quest_guides = self.augmentation.quest_guides,
            diary_prices = self.augmentation.diary_prices,
            skill_prices = self.augmentation.skill_prices,
            suppress = self.augmentation.suppress_unsupported_widgets,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }
}
