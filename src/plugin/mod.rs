// Plugin module - the lookup tool wired to host events
//
// LookupPlugin owns the four core parts and dispatches host events to them:
//
//   WidgetLoaded        → (re)create the icon
//   IconTargetEnter     → SelectionController::arm
//   IconTargetLeave     → SelectionController::disarm
//   IconOp              → free-text search prompt
//   MenuEntryAdded      → MenuRewriter
//   MenuOptionClicked   → TargetResolver → LinkBuilder → open_url
//
// The host is borrowed per call and never stored. All handlers run to
// completion on the host's event thread, so no locking is involved.

mod link;
pub mod menu;
mod selection;
mod target;

pub use link::{slugify, LinkBuilder, LOOKUP_BASE_URL};
pub use menu::{MenuRewriter, OWNED_OPTIONS};
pub use selection::SelectionController;
pub use target::{TargetDescriptor, TargetKind, TargetResolver};

use crate::config::Config;
use crate::events::{HostEvent, MenuEntryAdded, MenuOptionClicked};
use crate::host::widgets::{MINIMAP_GROUP_ID, MINIMAP_ORBS};
use crate::host::{ClickMask, Host, IconSpec, LookupSprite, MenuAction, PositionMode};
use crate::util::strip_tags;
use serde::Serialize;

/// Child slot of the minimap orbs container the icon occupies
pub const ICON_SLOT: usize = 1;

/// Icon action slot for the search prompt. Starting at slot 5 keeps the
/// targeting verb on top of the icon's own menu.
pub const SEARCH_ACTION_SLOT: usize = 5;

/// Host op number reported for [`SEARCH_ACTION_SLOT`]
pub const SEARCH_OP: i32 = SEARCH_ACTION_SLOT as i32 + 1;

/// What happened to a click the plugin saw
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "url", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// Not ours; the host handles it normally
    Ignored,
    /// Consumed without opening anything
    Consumed,
    /// Consumed and this URL was opened
    Opened(String),
}

/// The lookup tool
pub struct LookupPlugin {
    selection: SelectionController,
    rewriter: MenuRewriter,
    resolver: TargetResolver,
    links: LinkBuilder,
}

impl LookupPlugin {
    pub fn new(rewriter: MenuRewriter, links: LinkBuilder) -> Self {
        Self {
            selection: SelectionController::new(),
            rewriter,
            resolver: TargetResolver::new(),
            links,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            MenuRewriter::from_config(&config.augmentation),
            LinkBuilder::new(config.lookup_base_url.clone()),
        )
    }

    pub fn is_armed(&self) -> bool {
        self.selection.is_armed()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    pub fn start_up<H: Host + ?Sized>(&mut self, host: &mut H) {
        tracing::info!(
            base_url = self.links.base_url(),
            rules = ?self.rewriter.rule_names(),
            "Lookup plugin starting"
        );
        self.add_icon(host);
    }

    pub fn shut_down<H: Host + ?Sized>(&mut self, host: &mut H) {
        host.clear_child(MINIMAP_ORBS, ICON_SLOT);
        self.selection.disarm(host);
        host.set_spell_selected(false);
        tracing::info!("Lookup plugin stopped");
    }

    fn icon_spec() -> IconSpec {
        IconSpec {
            sprite: LookupSprite::Icon,
            x: -10,
            y: 0,
            x_mode: PositionMode::AbsoluteRight,
            y_mode: PositionMode::AbsoluteTop,
            width: 44,
            height: 25,
            target_verb: "Lookup".to_string(),
            name: "Prices".to_string(),
            click_mask: ClickMask::USE_GROUND_ITEM
                .union(ClickMask::USE_ITEM)
                .union(ClickMask::USE_NPC)
                .union(ClickMask::USE_OBJECT)
                .union(ClickMask::USE_WIDGET),
            no_click_through: true,
            actions: vec![(SEARCH_ACTION_SLOT, "Search".to_string())],
        }
    }

    fn add_icon<H: Host + ?Sized>(&mut self, host: &mut H) {
        if host.create_icon(MINIMAP_ORBS, ICON_SLOT, &Self::icon_spec()) {
            tracing::debug!("Lookup icon added to {}", MINIMAP_ORBS);
        } else {
            tracing::debug!("Minimap orbs not loaded, icon deferred");
        }
    }

    // ========================================================================
    // Event dispatch
    // ========================================================================

    /// Route one host event to its handler
    pub fn handle_event<H: Host + ?Sized>(&mut self, host: &mut H, event: &mut HostEvent) {
        match event {
            HostEvent::WidgetLoaded { group_id } => self.on_widget_loaded(host, *group_id),
            HostEvent::MenuEntryAdded(added) => self.on_menu_entry_added(host, added),
            HostEvent::MenuOptionClicked(click) => {
                self.on_menu_option_clicked(host, click);
            }
            HostEvent::IconTargetEnter => self.on_icon_target_enter(host),
            HostEvent::IconTargetLeave => self.on_icon_target_leave(host),
            HostEvent::IconOp { op } => self.on_icon_op(host, *op),
        }
    }

    pub fn on_widget_loaded<H: Host + ?Sized>(&mut self, host: &mut H, group_id: i32) {
        if group_id == MINIMAP_GROUP_ID {
            self.add_icon(host);
        }
    }

    pub fn on_icon_target_enter<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.selection.arm(host);
    }

    pub fn on_icon_target_leave<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.selection.disarm(host);
    }

    pub fn on_icon_op<H: Host + ?Sized>(&mut self, host: &mut H, op: i32) {
        if op == SEARCH_OP {
            host.open_search_input();
        } else {
            tracing::trace!(op, "Ignoring icon op");
        }
    }

    pub fn on_menu_entry_added<H: Host + ?Sized>(&mut self, host: &mut H, event: &MenuEntryAdded) {
        self.rewriter.process(host, event, self.selection.is_armed());
    }

    /// Handle a click.
    ///
    /// While armed every click is disarmed and consumed before anything else,
    /// so at most one lookup happens per arming. When not armed only clicks
    /// on entries this tool added are touched.
    pub fn on_menu_option_clicked<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        click: &mut MenuOptionClicked,
    ) -> ClickOutcome {
        if self.selection.is_armed() {
            self.selection.disarm(host);
            click.consume();

            // Our own entries still open their link when clicked while armed
            if is_owned_entry(click) {
                return self.open_entry_link(host, click);
            }

            return match self.resolver.resolve(&*host, click) {
                Some(target) => self.open(host, target.display_name()),
                None => ClickOutcome::Consumed,
            };
        }

        if is_owned_entry(click) {
            click.consume();
            return self.open_entry_link(host, click);
        }

        ClickOutcome::Ignored
    }

    fn open_entry_link<H: Host + ?Sized>(
        &self,
        host: &mut H,
        click: &MenuOptionClicked,
    ) -> ClickOutcome {
        let name = strip_tags(&click.menu_target);
        if name.trim().is_empty() {
            tracing::debug!(option = %click.option, "Guide entry without target");
            return ClickOutcome::Consumed;
        }
        self.open(host, &name)
    }

    fn open<H: Host + ?Sized>(&self, host: &mut H, display_name: &str) -> ClickOutcome {
        let url = self.links.build_lookup_url(display_name);
        tracing::info!(name = display_name, url = %url, "Opening lookup");
        host.open_url(&url);
        ClickOutcome::Opened(url)
    }
}

impl Default for LookupPlugin {
    fn default() -> Self {
        Self::new(MenuRewriter::default(), LinkBuilder::default())
    }
}

/// A click on one of the entries the menu rules injected
fn is_owned_entry(click: &MenuOptionClicked) -> bool {
    click.action == MenuAction::RuneLite && OWNED_OPTIONS.contains(&click.option.as_str())
}
