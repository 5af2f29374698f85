// Quest list guide entries
//
// Adds "Quick Guide" and "Guide" to quests in the quest list, either when the
// journal entry is offered or when the armed lookup tool hovers a quest.

use super::{appended, MenuRule, RewriteContext, RewriteResult, MENUOP_GUIDE, MENUOP_QUICKGUIDE};
use crate::host::widgets::QUESTLIST_CONTAINERS;
use crate::host::{MenuAction, MenuEntry};

/// Option the host shows for opening a quest journal
pub const READ_JOURNAL_OPTION: &str = "Read Journal:";

pub struct QuestGuideRule;

impl MenuRule for QuestGuideRule {
    fn name(&self) -> &'static str {
        "quest-guide"
    }

    fn should_apply(&self, ctx: &RewriteContext) -> bool {
        QUESTLIST_CONTAINERS.contains(&ctx.event.widget_id)
            && ((ctx.armed && ctx.event.child_index != -1)
                || ctx.event.option == READ_JOURNAL_OPTION)
    }

    fn rewrite(&self, entries: &[MenuEntry], ctx: &RewriteContext) -> RewriteResult {
        let Some(widget) = ctx.widget else {
            tracing::debug!(
                widget = %ctx.event.widget_id,
                index = ctx.event.child_index,
                "quest-guide: quest widget not loaded"
            );
            return RewriteResult::Unchanged;
        };

        let guide = |option: &str| {
            MenuEntry::new(
                option,
                widget.name.clone(),
                MenuAction::RuneLite,
                ctx.event.child_index,
                ctx.event.widget_id.0,
            )
        };

        // Last entry renders on top, so Guide goes last
        RewriteResult::Modified(appended(
            entries,
            [guide(MENUOP_QUICKGUIDE), guide(MENUOP_GUIDE)],
        ))
    }
}
