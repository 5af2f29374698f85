// Achievement diary price entries

use super::{appended, MenuRule, RewriteContext, RewriteResult, MENUOP_PRICES};
use crate::host::widgets::ACHIEVEMENT_DIARY_CONTAINER;
use crate::host::{MenuAction, MenuEntry};

/// Diary page name from its open action: `"Open Cooks' Journal"` → `"Cooks' Diary"`
pub fn diary_target(action: &str) -> String {
    action
        .strip_prefix("Open ")
        .unwrap_or(action)
        .replace("Journal", "Diary")
}

pub struct DiaryPricesRule;

impl MenuRule for DiaryPricesRule {
    fn name(&self) -> &'static str {
        "diary-prices"
    }

    fn should_apply(&self, ctx: &RewriteContext) -> bool {
        ctx.event.widget_id == ACHIEVEMENT_DIARY_CONTAINER
    }

    fn rewrite(&self, entries: &[MenuEntry], ctx: &RewriteContext) -> RewriteResult {
        let Some(action) = ctx.widget.and_then(|w| w.first_action()) else {
            return RewriteResult::Unchanged;
        };

        RewriteResult::Modified(appended(
            entries,
            [MenuEntry::new(
                MENUOP_PRICES,
                diary_target(action),
                MenuAction::RuneLite,
                ctx.event.child_index,
                ctx.event.widget_id.0,
            )],
        ))
    }
}
