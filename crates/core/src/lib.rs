//! Core garden logic - pure, deterministic, and testable
//!
//! This crate contains the simulation: the map, its generator, the pathfinder,
//! plant growth, and the player's walk and action state machine. It has no
//! dependency on the terminal or on input handling, and every random draw goes
//! through an explicit [`rand::Rng`], so the same seed always yields the same
//! garden.
//!
//! # Module Structure
//!
//! - [`grid`]: cells with terrain, an optional entity, and dirty tracking
//! - [`entity`]: the gardener and growing objects with their growth stages
//! - [`mapgen`]: lakes, rivers, rock clusters, vegetation, gardener placement
//! - [`pathfind`]: cost-weighted best-first search to a cell or next to it
//! - [`action`]: timed dig, place and build actions
//! - [`player`]: cursor, walking and acting
//! - [`menu`]: option list model
//! - [`game_state`]: everything above behind `apply_action` and `tick`
//! - [`config`], [`error`], [`rng`]: configuration, error kinds, random source
//!
//! # Example
//!
//! ```
//! use my_garden_core::{GardenConfig, GardenState};
//! use my_garden_core::types::GardenAction;
//!
//! let config = GardenConfig::default().with_size(40, 12).with_seed(3);
//! let mut garden = GardenState::from_config(config).unwrap();
//!
//! garden.apply_action(GardenAction::CursorRight);
//! garden.apply_action(GardenAction::FollowCursor);
//! for _ in 0..20 {
//!     garden.tick();
//! }
//! assert!(garden.grid().width() == 40);
//! ```
//!
//! # Timing
//!
//! One call to [`GardenState::tick`](game_state::GardenState::tick) is one
//! simulation step. The binary runs it every `tick_ms` milliseconds (100 by
//! default).

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod game_state;
pub mod grid;
pub mod mapgen;
pub mod menu;
pub mod pathfind;
pub mod player;
pub mod rng;

pub use my_garden_types as types;

// Re-export commonly used types for convenience
pub use action::{ActionEffect, PlayerAction};
pub use config::GardenConfig;
pub use entity::{Entity, GrowingObject, GrowthStage, GrowthState};
pub use error::{GardenError, GardenResult};
pub use game_state::{GardenMenu, GardenState};
pub use grid::{Cell, Grid, RedrawRequest};
pub use mapgen::{generate, GenerationReport};
pub use menu::{Menu, MenuOption};
pub use pathfind::{path_cost, path_to_area, path_to_point, Path};
pub use player::{Activity, Player, PlayerEvent};
pub use rng::{chance, randint, SimpleRng};
