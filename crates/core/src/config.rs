//! Game configuration
//!
//! Defaults match the classic garden: a 100x20 map, a 100 ms tick and
//! 10-tick actions. `from_env` overrides them from `GARDEN_*` variables.

use std::env;
use std::str::FromStr;

use crate::error::{GardenError, GardenResult};
use crate::types::{EXECUTION_TIME, MAX_GRID_SIDE, TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GardenConfig {
    pub width: i32,
    pub height: i32,
    pub seed: u32,
    pub tick_ms: u32,
    /// Ticks a dig/place/build action needs.
    pub execution_time: u32,
    /// Longest path (in steps) a request may produce; `None` means one step per cell.
    pub max_path_len: Option<usize>,
    pub log_path: Option<String>,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 20,
            seed: 1,
            tick_ms: TICK_MS,
            execution_time: EXECUTION_TIME,
            max_path_len: None,
            log_path: None,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> GardenResult<Option<T>> {
    match env::var(name) {
        Ok(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse()
                .map(Some)
                .map_err(|_| GardenError::Config(format!("{} has invalid value {:?}", name, raw)))
        }
        Err(_) => Ok(None),
    }
}

impl GardenConfig {
    /// Read `GARDEN_WIDTH`, `GARDEN_HEIGHT`, `GARDEN_SEED`, `GARDEN_TICK_MS`,
    /// `GARDEN_EXECUTION_TIME`, `GARDEN_MAX_PATH` and `GARDEN_LOG_PATH`.
    ///
    /// Unset variables keep their defaults; the result is validated.
    pub fn from_env() -> GardenResult<Self> {
        let defaults = Self::default();

        let log_path = env::var("GARDEN_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let config = Self {
            width: parse_var("GARDEN_WIDTH")?.unwrap_or(defaults.width),
            height: parse_var("GARDEN_HEIGHT")?.unwrap_or(defaults.height),
            seed: parse_var("GARDEN_SEED")?.unwrap_or(defaults.seed),
            tick_ms: parse_var("GARDEN_TICK_MS")?.unwrap_or(defaults.tick_ms),
            execution_time: parse_var("GARDEN_EXECUTION_TIME")?.unwrap_or(defaults.execution_time),
            max_path_len: parse_var("GARDEN_MAX_PATH")?,
            log_path,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Fail fast on values the simulation cannot run with.
    pub fn validate(&self) -> GardenResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GardenError::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_GRID_SIDE || self.height > MAX_GRID_SIDE {
            return Err(GardenError::Config(format!(
                "grid dimensions {}x{} exceed {} per side",
                self.width, self.height, MAX_GRID_SIDE
            )));
        }
        if self.tick_ms == 0 {
            return Err(GardenError::Config("tick_ms must be positive".to_string()));
        }
        if self.execution_time == 0 {
            return Err(GardenError::Config(
                "execution_time must be positive".to_string(),
            ));
        }
        if let Some(limit) = self.max_path_len {
            let cells = self.cell_count();
            if limit == 0 || limit > cells {
                return Err(GardenError::Config(format!(
                    "max path length {} outside 1..={}",
                    limit, cells
                )));
            }
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Effective path step limit.
    pub fn path_limit(&self) -> usize {
        self.max_path_len.unwrap_or_else(|| self.cell_count())
    }
}
