//! Error kinds shared by the garden crates.
//!
//! Pathfinding failure is not an error: it is reported as `None`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GardenError {
    /// Invalid construction-time configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The map generator could not find an eligible cell.
    #[error("map generation failed: {0}")]
    Generation(String),
}

pub type GardenResult<T> = Result<T, GardenError>;
