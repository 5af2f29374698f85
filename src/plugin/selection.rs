//! Armed/disarmed state of the lookup tool
//!
//! The tool is armed while the player targets the icon; the next click
//! anywhere is captured for lookup instead of its normal effect. Pointer-leave
//! is not always delivered (consumed clicks suppress it), so the click path
//! disarms on its own and [`SelectionController::disarm`] must be safe to
//! call any number of times.

use crate::host::{ClientState, LookupSprite, WidgetTree};

#[derive(Debug, Default)]
pub struct SelectionController {
    armed: bool,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Enter capture mode: highlight the icon and make every widget targetable
    pub fn arm<H>(&mut self, host: &mut H)
    where
        H: WidgetTree + ClientState + ?Sized,
    {
        self.armed = true;
        host.set_icon_sprite(LookupSprite::SelectedIcon);
        host.set_all_widgets_op_targetable(true);
        tracing::trace!("Lookup armed");
    }

    /// Leave capture mode. A no-op when already disarmed.
    pub fn disarm<H>(&mut self, host: &mut H)
    where
        H: WidgetTree + ClientState + ?Sized,
    {
        if !self.armed {
            return;
        }
        self.armed = false;
        host.set_all_widgets_op_targetable(false);
        host.set_icon_sprite(LookupSprite::Icon);
        host.set_spell_selected(false);
        tracing::trace!("Lookup disarmed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostCall, SimHost, World};

    #[test]
    fn test_arm_sets_host_state() {
        let mut host = SimHost::new(World::default());
        let mut selection = SelectionController::new();

        selection.arm(&mut host);

        assert!(selection.is_armed());
        assert!(host.all_widgets_op_targetable());
        assert_eq!(
            host.calls(),
            &[
                HostCall::SetIconSprite {
                    sprite: LookupSprite::SelectedIcon
                },
                HostCall::SetAllWidgetsOpTargetable { targetable: true },
            ]
        );
    }

    #[test]
    fn test_disarm_restores_host_state() {
        let mut host = SimHost::new(World::default());
        let mut selection = SelectionController::new();
        selection.arm(&mut host);
        host.set_spell_selected(true);
        host.drain_calls();

        selection.disarm(&mut host);

        assert!(!selection.is_armed());
        assert!(!host.all_widgets_op_targetable());
        assert!(!host.spell_selected());
        assert_eq!(
            host.calls(),
            &[
                HostCall::SetAllWidgetsOpTargetable { targetable: false },
                HostCall::SetIconSprite {
                    sprite: LookupSprite::Icon
                },
                HostCall::SetSpellSelected { selected: false },
            ]
        );
    }

    #[test]
    fn test_disarm_twice_has_no_extra_effects() {
        let mut host = SimHost::new(World::default());
        let mut selection = SelectionController::new();
        selection.arm(&mut host);

        selection.disarm(&mut host);
        let after_first = host.calls().len();
        selection.disarm(&mut host);

        assert!(!selection.is_armed());
        assert_eq!(host.calls().len(), after_first);
    }

    #[test]
    fn test_disarm_when_never_armed_is_noop() {
        let mut host = SimHost::new(World::default());
        SelectionController::new().disarm(&mut host);
        assert!(host.calls().is_empty());
    }
}
