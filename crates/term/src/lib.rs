//! Terminal "game renderer" module.
//!
//! A small rendering layer for the garden. It renders into a simple
//! framebuffer that can be flushed to a terminal backend, without any widget
//! or layout library.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Repaint only the cells the simulation reports as changed
//! - Flush only the character runs that differ from the previous frame

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use my_garden_core as core;
pub use my_garden_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{GardenView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
