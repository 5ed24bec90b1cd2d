//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GardenAction`]. The
//! mapping depends on whether a menu is open: the same keys drive the cursor
//! in the garden and the highlight inside a menu.

pub mod map;

pub use my_garden_types as types;

pub use map::{handle_key_event, should_quit, InputMode};
