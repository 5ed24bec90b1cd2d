//! My Garden (workspace facade crate).
//!
//! This package exposes `my_garden::{core,input,term,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use my_garden_core as core;
pub use my_garden_input as input;
pub use my_garden_term as term;
pub use my_garden_types as types;
