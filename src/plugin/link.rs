//! Lookup link construction
//!
//! Display names become a single URL path segment through a fixed chain of
//! substitutions. Only the characters listed in [`slugify`] are rewritten;
//! anything else (apostrophes, digits, accented letters) is passed through
//! verbatim because that is what the lookup site's item paths expect.

use crate::util::strip_tags;

/// Default base for item lookups
pub const LOOKUP_BASE_URL: &str = "https://platinumtokens.com/item";

/// Turn a display name into a lookup path segment.
///
/// Steps run in order, each feeding the next: strip markup, lower-case,
/// `+` → `-plus`, space → `-`, `(` → `-`, drop `)`.
///
/// ```
/// use platinum_lookup::plugin::slugify;
///
/// assert_eq!(slugify("Amulet of Glory (4)"), "amulet-of-glory--4");
/// ```
pub fn slugify(display_name: &str) -> String {
    strip_tags(display_name)
        .to_lowercase()
        .replace('+', "-plus")
        .replace(' ', "-")
        .replace('(', "-")
        .replace(')', "")
}

/// Builds lookup URLs against a fixed base
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lookup URL for a display name: `<base>/<slug>`
    pub fn build_lookup_url(&self, display_name: &str) -> String {
        format!("{}/{}", self.base_url, slugify(display_name))
    }
}

impl Default for LinkBuilder {
    fn default() -> Self {
        Self::new(LOOKUP_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amulet_with_charges() {
        let links = LinkBuilder::default();
        // "(" becomes "-" after the space already became "-"
        assert_eq!(
            links.build_lookup_url("Amulet of Glory (4)"),
            "https://platinumtokens.com/item/amulet-of-glory--4"
        );
    }

    #[test]
    fn test_plus_variant() {
        let links = LinkBuilder::default();
        assert_eq!(
            links.build_lookup_url("Ring of Wealth (+)"),
            "https://platinumtokens.com/item/ring-of-wealth---plus"
        );
    }

    #[test]
    fn test_markup_stripped_before_lowercasing() {
        assert_eq!(slugify("<col=ff9040>Dragon Bones</col>"), "dragon-bones");
    }

    #[test]
    fn test_other_characters_pass_through() {
        assert_eq!(slugify("Cooks' Diary"), "cooks'-diary");
        assert_eq!(slugify("Ahrim's robetop 100"), "ahrim's-robetop-100");
    }

    #[test]
    fn test_slug_has_no_rewritten_characters() {
        for name in [
            "Super Combat Potion(4)",
            "Saradomin brew (3)",
            "Ring of the gods (i)",
            "Dragon dagger(p++)",
            "Black D'hide Body",
        ] {
            let slug = slugify(name);
            assert!(!slug.contains(' '), "{slug}");
            assert!(!slug.contains('+'), "{slug}");
            assert!(!slug.contains('('), "{slug}");
            assert!(!slug.contains(')'), "{slug}");
            assert!(!slug.chars().any(|c| c.is_uppercase()), "{slug}");
        }
    }

    #[test]
    fn test_trailing_slash_on_base_is_ignored() {
        let links = LinkBuilder::new("http://localhost:8000/item/");
        assert_eq!(links.base_url(), "http://localhost:8000/item");
        assert_eq!(
            links.build_lookup_url("Coal"),
            "http://localhost:8000/item/coal"
        );
    }
}
