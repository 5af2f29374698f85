//! Price lookup tool for a game client.
//!
//! While the player targets the lookup icon, the next click on an item, NPC,
//! object or item-bearing widget is captured and turned into a link on the
//! lookup site instead of its normal effect. The tool also adds guide and
//! price entries to quest, diary and skill menus.
//!
//! The client is reached only through the traits in [`host`]; [`plugin`]
//! holds the tool itself. [`host::SimHost`] and [`replay`] run it without a
//! client.

pub mod cli;
pub mod config;
pub mod events;
pub mod host;
pub mod logging;
pub mod plugin;
pub mod replay;
pub mod util;
