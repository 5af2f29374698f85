//! Menu entry rewriting pipeline
//!
//! Every "menu entry added" notification runs through a list of rules. Each
//! rule sees the host's current entries, and may hand back a replacement list
//! which is submitted to the host before the next rule runs.
//!
//! # Architecture
//!
//! ```text
//! MenuEntryAdded → MenuRewriter → [Rule₁, Rule₂, ...] → set_menu_entries per rule
//! ```
//!
//! # Ownership Contract
//!
//! The menu list is shared with the host and every other extension. Rules may
//! append to the end, or remove the single entry they can prove they own
//! (see [`remove_latest`]). Entries a rule did not add keep their relative
//! order. Nothing is cached between notifications.

mod diary;
mod quest;
mod skills;
mod suppress;

pub use diary::DiaryPricesRule;
pub use quest::QuestGuideRule;
pub use skills::SkillPricesRule;
pub use suppress::{remove_latest, SuppressUnsupportedRule, RESERVED_ENTRIES};

use crate::events::MenuEntryAdded;
use crate::host::{MenuEntries, MenuEntry, Widget, WidgetTree};

/// Option label for the full quest guide entry
pub const MENUOP_GUIDE: &str = "Guide";
/// Option label for the quick quest guide entry
pub const MENUOP_QUICKGUIDE: &str = "Quick Guide";
/// Option label for diary and skill price entries
pub const MENUOP_PRICES: &str = "Prices";

/// Options this tool adds; clicks on any other `RuneLite` entry are not ours
pub const OWNED_OPTIONS: [&str; 3] = [MENUOP_GUIDE, MENUOP_QUICKGUIDE, MENUOP_PRICES];

// ============================================================================
// Rewrite Result
// ============================================================================

/// Result of running one rule over the entry list
#[derive(Debug, PartialEq, Eq)]
pub enum RewriteResult {
    /// List unchanged, nothing to submit
    Unchanged,
    /// Submit this list to the host
    Modified(Vec<MenuEntry>),
}

// ============================================================================
// Rewrite Context
// ============================================================================

/// What a rule knows about the notification it is handling
#[derive(Debug, Clone, Copy)]
pub struct RewriteContext<'a> {
    pub event: &'a MenuEntryAdded,
    /// Whether the lookup tool was armed when the notification arrived
    pub armed: bool,
    /// Widget the notification points at, if the host has it loaded
    pub widget: Option<&'a Widget>,
}

// ============================================================================
// Menu Rule Trait
// ============================================================================

/// A single menu rewriting rule
///
/// Rules are evaluated independently and in registration order; more than
/// one may fire for the same notification.
pub trait MenuRule {
    /// Human-readable name for logging
    fn name(&self) -> &'static str;

    /// Cheap check on the notification alone
    fn should_apply(&self, ctx: &RewriteContext) -> bool;

    /// Rewrite the current entries.
    ///
    /// Only called if `should_apply()` returned `true`. A missing or
    /// unexpected widget is not an error: return `Unchanged`.
    fn rewrite(&self, entries: &[MenuEntry], ctx: &RewriteContext) -> RewriteResult;
}

/// Append entries to a copy of `entries`, preserving order
pub(crate) fn appended(entries: &[MenuEntry], extra: impl IntoIterator<Item = MenuEntry>) -> Vec<MenuEntry> {
    let mut out = entries.to_vec();
    out.extend(extra);
    out
}

// ============================================================================
// Menu Rewriter
// ============================================================================

/// Pipeline that runs menu rules and submits their snapshots
pub struct MenuRewriter {
    rules: Vec<Box<dyn MenuRule>>,
}

impl MenuRewriter {
    /// Create an empty rewriter
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create rewriter from config
    ///
    /// Rule order matters: suppression runs before anything is appended so it
    /// never has to step over our own entries.
    pub fn from_config(config: &crate::config::Augmentation) -> Self {
        let mut rewriter = Self::new();

        if config.suppress_unsupported_widgets {
            rewriter.register(SuppressUnsupportedRule);
        }
        if config.quest_guides {
            rewriter.register(QuestGuideRule);
        }
        if config.diary_prices {
            rewriter.register(DiaryPricesRule);
        }
        if config.skill_prices {
            rewriter.register(SkillPricesRule);
        }

        tracing::debug!("Registered menu rules: {:?}", rewriter.rule_names());
        rewriter
    }

    pub fn register(&mut self, rule: impl MenuRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Handle one notification.
    ///
    /// Each applicable rule reads the host's current list, so a later rule
    /// sees what an earlier one submitted. Returns how many snapshots were
    /// submitted.
    pub fn process<H>(&self, host: &mut H, event: &MenuEntryAdded, armed: bool) -> usize
    where
        H: WidgetTree + MenuEntries + ?Sized,
    {
        if self.rules.is_empty() {
            return 0;
        }

        let widget = host.resolve_widget(event.widget_id, event.child_index);
        let ctx = RewriteContext {
            event,
            armed,
            widget: widget.as_ref(),
        };

        let mut submitted = 0;
        for rule in &self.rules {
            if !rule.should_apply(&ctx) {
                continue;
            }

            let entries = host.menu_entries();
            match rule.rewrite(&entries, &ctx) {
                RewriteResult::Unchanged => {}
                RewriteResult::Modified(updated) => {
                    tracing::debug!(
                        rule = rule.name(),
                        before = entries.len(),
                        after = updated.len(),
                        "Menu entries rewritten"
                    );
                    host.set_menu_entries(updated);
                    submitted += 1;
                }
            }
        }
        submitted
    }
}

impl Default for MenuRewriter {
    /// All rules enabled
    fn default() -> Self {
        Self::from_config(&crate::config::Augmentation::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::widgets::{ACHIEVEMENT_DIARY_CONTAINER, QUESTLIST_FREE_CONTAINER};
    use crate::host::{MenuAction, SimHost, WidgetId, WidgetKind, World};

    fn cancel() -> MenuEntry {
        MenuEntry::new("Cancel", "", MenuAction::Cancel, 0, 0)
    }

    #[test]
    fn test_default_registers_all_rules_in_order() {
        let rewriter = MenuRewriter::default();
        assert_eq!(
            rewriter.rule_names(),
            vec!["suppress-unsupported", "quest-guide", "diary-prices", "skill-prices"]
        );
    }

    #[test]
    fn test_empty_rewriter_submits_nothing() {
        let mut host = SimHost::new(World::default());
        let event = MenuEntryAdded {
            widget_id: QUESTLIST_FREE_CONTAINER,
            child_index: 1,
            action: MenuAction::Other(57),
            option: "Read Journal:".into(),
            target: String::new(),
        };
        assert_eq!(MenuRewriter::new().process(&mut host, &event, false), 0);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_rules_do_not_fire_for_unrelated_widget() {
        let mut host = SimHost::new(World {
            base_menu: vec![cancel()],
            ..Default::default()
        });
        let event = MenuEntryAdded {
            widget_id: WidgetId::new(149, 0),
            child_index: 3,
            action: MenuAction::Other(33),
            option: "Drop".into(),
            target: "Coins".into(),
        };
        assert_eq!(MenuRewriter::default().process(&mut host, &event, false), 0);
        assert_eq!(host.menu_entries(), vec![cancel()]);
    }

    #[test]
    fn test_each_rule_submits_its_own_snapshot() {
        struct Tag(&'static str);
        impl MenuRule for Tag {
            fn name(&self) -> &'static str {
                self.0
            }
            fn should_apply(&self, _ctx: &RewriteContext) -> bool {
                true
            }
            fn rewrite(&self, entries: &[MenuEntry], _ctx: &RewriteContext) -> RewriteResult {
                RewriteResult::Modified(appended(
                    entries,
                    [MenuEntry::new(self.0, "", MenuAction::RuneLite, 0, 0)],
                ))
            }
        }

        let mut host = SimHost::new(World {
            base_menu: vec![cancel()],
            ..Default::default()
        });
        let mut rewriter = MenuRewriter::new();
        rewriter.register(Tag("first"));
        rewriter.register(Tag("second"));

        let event = MenuEntryAdded {
            widget_id: ACHIEVEMENT_DIARY_CONTAINER,
            child_index: -1,
            action: MenuAction::Other(57),
            option: String::new(),
            target: String::new(),
        };
        assert_eq!(rewriter.process(&mut host, &event, false), 2);

        let options: Vec<_> = host.menu_entries().into_iter().map(|e| e.option).collect();
        assert_eq!(options, vec!["Cancel", "first", "second"]);
    }

    #[test]
    fn test_context_carries_resolved_widget() {
        struct Probe;
        impl MenuRule for Probe {
            fn name(&self) -> &'static str {
                "probe"
            }
            fn should_apply(&self, ctx: &RewriteContext) -> bool {
                ctx.widget.is_some_and(|w| w.kind == WidgetKind::Text)
            }
            fn rewrite(&self, entries: &[MenuEntry], _ctx: &RewriteContext) -> RewriteResult {
                RewriteResult::Modified(entries[..0].to_vec())
            }
        }

        let mut host = SimHost::new(World {
            base_menu: vec![cancel()],
            ..Default::default()
        });
        host.add_child(
            QUESTLIST_FREE_CONTAINER,
            2,
            crate::host::Widget {
                id: QUESTLIST_FREE_CONTAINER,
                kind: WidgetKind::Text,
                item_id: -1,
                actions: vec![],
                parent_id: WidgetId(-1),
                name: "Cook's Assistant".into(),
            },
        );
        let mut rewriter = MenuRewriter::new();
        rewriter.register(Probe);

        let event = MenuEntryAdded {
            widget_id: QUESTLIST_FREE_CONTAINER,
            child_index: 2,
            action: MenuAction::Other(57),
            option: String::new(),
            target: String::new(),
        };
        assert_eq!(rewriter.process(&mut host, &event, false), 1);
        assert!(host.menu_entries().is_empty());
    }
}
