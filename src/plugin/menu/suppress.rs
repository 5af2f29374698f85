// Unsupported widget suppression
//
// While armed, the host offers "Lookup" on every widget because all widgets
// are op-targetable. Only graphic widgets carrying an item can be resolved,
// so the lookup entry is taken back out for everything else.
//
// We cannot blindly drop the top entry: another extension may have appended
// its own entry after ours on this same notification. Instead the most
// recent entry of the suppressed kind is removed and everything after it
// shifts down by one.

use super::{MenuRule, RewriteContext, RewriteResult};
use crate::host::{MenuAction, MenuEntry};

/// Leading entries the host always keeps (Cancel and the base action)
pub const RESERVED_ENTRIES: usize = 2;

/// Remove the most recent entry of kind `action`, searching from the end
/// down to index [`RESERVED_ENTRIES`].
///
/// Returns `None` when no entry of that kind exists past the reserved ones.
pub fn remove_latest(entries: &[MenuEntry], action: MenuAction) -> Option<Vec<MenuEntry>> {
    let index = (RESERVED_ENTRIES..entries.len())
        .rev()
        .find(|&i| entries[i].action == action)?;

    let mut out = Vec::with_capacity(entries.len() - 1);
    out.extend_from_slice(&entries[..index]);
    out.extend_from_slice(&entries[index + 1..]);
    Some(out)
}

/// Removes the lookup entry from widgets the resolver cannot handle
pub struct SuppressUnsupportedRule;

impl MenuRule for SuppressUnsupportedRule {
    fn name(&self) -> &'static str {
        "suppress-unsupported"
    }

    fn should_apply(&self, ctx: &RewriteContext) -> bool {
        ctx.armed && ctx.event.action == MenuAction::SpellCastOnWidget
    }

    fn rewrite(&self, entries: &[MenuEntry], ctx: &RewriteContext) -> RewriteResult {
        let Some(widget) = ctx.widget else {
            tracing::debug!(widget = %ctx.event.widget_id, "suppress: widget not loaded");
            return RewriteResult::Unchanged;
        };
        if widget.carried_item().is_some() {
            return RewriteResult::Unchanged;
        }

        match remove_latest(entries, ctx.event.action) {
            Some(updated) => RewriteResult::Modified(updated),
            None => {
                tracing::debug!(
                    entries = entries.len(),
                    "suppress: no removable {:?} entry",
                    ctx.event.action
                );
                RewriteResult::Unchanged
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MenuEntryAdded;
    use crate::host::{Widget, WidgetId, WidgetKind};

    fn entry(option: &str, action: MenuAction) -> MenuEntry {
        MenuEntry::new(option, "", action, 0, 0)
    }

    fn base() -> Vec<MenuEntry> {
        vec![
            entry("Cancel", MenuAction::Cancel),
            entry("Walk here", MenuAction::Other(23)),
        ]
    }

    fn widget(kind: WidgetKind, item_id: i32) -> Widget {
        Widget {
            id: WidgetId::new(548, 12),
            kind,
            item_id,
            actions: vec![],
            parent_id: WidgetId(-1),
            name: String::new(),
        }
    }

    fn event() -> MenuEntryAdded {
        MenuEntryAdded {
            widget_id: WidgetId::new(548, 12),
            child_index: -1,
            action: MenuAction::SpellCastOnWidget,
            option: "Lookup".into(),
            target: "Prices".into(),
        }
    }

    #[test]
    fn test_removes_tail_entry() {
        let mut entries = base();
        entries.push(entry("Open", MenuAction::Other(57)));
        entries.push(entry("Lookup", MenuAction::SpellCastOnWidget));

        let updated = remove_latest(&entries, MenuAction::SpellCastOnWidget).unwrap();
        assert_eq!(updated.len(), entries.len() - 1);
        assert_eq!(updated, entries[..entries.len() - 1].to_vec());
    }

    #[test]
    fn test_skips_entries_added_after_ours() {
        let mut entries = base();
        entries.push(entry("Lookup", MenuAction::SpellCastOnWidget));
        entries.push(entry("Mark", MenuAction::RuneLite));
        entries.push(entry("Tag", MenuAction::RuneLite));

        let updated = remove_latest(&entries, MenuAction::SpellCastOnWidget).unwrap();
        let options: Vec<_> = updated.iter().map(|e| e.option.as_str()).collect();
        assert_eq!(options, vec!["Cancel", "Walk here", "Mark", "Tag"]);
    }

    #[test]
    fn test_removes_only_most_recent_match() {
        let mut entries = base();
        entries.push(entry("Cast A", MenuAction::SpellCastOnWidget));
        entries.push(entry("Cast B", MenuAction::SpellCastOnWidget));

        let updated = remove_latest(&entries, MenuAction::SpellCastOnWidget).unwrap();
        assert_eq!(updated.last().unwrap().option, "Cast A");
    }

    #[test]
    fn test_reserved_entries_never_removed() {
        let entries = vec![
            entry("Lookup", MenuAction::SpellCastOnWidget),
            entry("Lookup", MenuAction::SpellCastOnWidget),
        ];
        assert!(remove_latest(&entries, MenuAction::SpellCastOnWidget).is_none());

        let mut entries = entries;
        entries.push(entry("Examine", MenuAction::Examine));
        assert!(remove_latest(&entries, MenuAction::SpellCastOnWidget).is_none());
    }

    #[test]
    fn test_empty_list() {
        assert!(remove_latest(&[], MenuAction::SpellCastOnWidget).is_none());
    }

    #[test]
    fn test_rule_requires_armed_widget_cast() {
        let rule = SuppressUnsupportedRule;
        let ev = event();
        let w = widget(WidgetKind::Text, -1);
        let armed = RewriteContext {
            event: &ev,
            armed: true,
            widget: Some(&w),
        };
        assert!(rule.should_apply(&armed));
        assert!(!rule.should_apply(&RewriteContext {
            armed: false,
            ..armed
        }));

        let mut other = event();
        other.action = MenuAction::SpellCastOnNpc;
        assert!(!rule.should_apply(&RewriteContext {
            event: &other,
            ..armed
        }));
    }

    #[test]
    fn test_item_widget_kept() {
        let mut entries = base();
        entries.push(entry("Lookup", MenuAction::SpellCastOnWidget));
        let ev = event();
        let w = widget(WidgetKind::Graphic, 4151);
        let ctx = RewriteContext {
            event: &ev,
            armed: true,
            widget: Some(&w),
        };
        assert_eq!(
            SuppressUnsupportedRule.rewrite(&entries, &ctx),
            RewriteResult::Unchanged
        );
    }

    #[test]
    fn test_non_item_widget_suppressed() {
        let mut entries = base();
        entries.push(entry("Lookup", MenuAction::SpellCastOnWidget));
        let ev = event();
        let w = widget(WidgetKind::Graphic, -1);
        let ctx = RewriteContext {
            event: &ev,
            armed: true,
            widget: Some(&w),
        };
        assert_eq!(
            SuppressUnsupportedRule.rewrite(&entries, &ctx),
            RewriteResult::Modified(base())
        );
    }

    #[test]
    fn test_missing_widget_skipped() {
        let mut entries = base();
        entries.push(entry("Lookup", MenuAction::SpellCastOnWidget));
        let ev = event();
        let ctx = RewriteContext {
            event: &ev,
            armed: true,
            widget: None,
        };
        assert_eq!(
            SuppressUnsupportedRule.rewrite(&entries, &ctx),
            RewriteResult::Unchanged
        );
    }
}
