//! Shared utility functions

use regex::Regex;
use std::sync::OnceLock;

/// Matches a single markup tag such as `<col=ff9040>` or `</col>`.
///
/// Quoted attribute values may contain `>` without ending the tag.
fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"<(?:"[^"]*"['"]*|'[^']*'['"]*|[^'">])+>"#)
            .expect("tag pattern is a valid regex")
    })
}

/// Remove all markup tags from a host-supplied string.
///
/// Host names carry colour and image tags (`<col=ff9040>Cook's Assistant</col>`,
/// `<img=2>`); everything between angle brackets is dropped and the remaining
/// text is returned unchanged, including surrounding whitespace.
///
/// # Examples
///
/// ```
/// use platinum_lookup::util::strip_tags;
///
/// assert_eq!(strip_tags("<col=ff9040>Cook's Assistant</col>"), "Cook's Assistant");
/// assert_eq!(strip_tags("Abyssal whip"), "Abyssal whip");
/// ```
pub fn strip_tags(s: &str) -> String {
    if !s.contains('<') {
        return s.to_string();
    }
    tag_pattern().replace_all(s, "").into_owned()
}
