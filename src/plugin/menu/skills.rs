// Skill guide price entries

use super::{appended, MenuRule, RewriteContext, RewriteResult, MENUOP_PRICES};
use crate::host::widgets::{SKILLS_CONTAINER, SKILLS_GROUP_ID};
use crate::host::{MenuAction, MenuEntry};

/// Skill name from its guide action: `"View Attack guide"` → `"Attack"`
pub fn skill_target(action: &str) -> &str {
    let action = action.strip_prefix("View ").unwrap_or(action);
    action.strip_suffix(" guide").unwrap_or(action)
}

pub struct SkillPricesRule;

impl MenuRule for SkillPricesRule {
    fn name(&self) -> &'static str {
        "skill-prices"
    }

    fn should_apply(&self, ctx: &RewriteContext) -> bool {
        ctx.event.widget_id.group() == SKILLS_GROUP_ID
    }

    fn rewrite(&self, entries: &[MenuEntry], ctx: &RewriteContext) -> RewriteResult {
        let Some(widget) = ctx.widget else {
            return RewriteResult::Unchanged;
        };
        // Only the skill tiles, not the panel chrome around them
        if widget.parent_id != SKILLS_CONTAINER {
            return RewriteResult::Unchanged;
        }
        let Some(action) = widget.first_action() else {
            return RewriteResult::Unchanged;
        };

        RewriteResult::Modified(appended(
            entries,
            [MenuEntry::new(
                MENUOP_PRICES,
                skill_target(action),
                MenuAction::RuneLite,
                ctx.event.child_index,
                ctx.event.widget_id.0,
            )],
        ))
    }
}
