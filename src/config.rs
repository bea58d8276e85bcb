//! TOML configuration for the engine and its host driver.
//!
//! Every field has a default, so an empty document is a valid config.
//!
//! ```toml
//! [grid]
//! width = 10
//! height = 10
//!
//! [simulation]
//! toggle_policy = "permissive"
//! parallel_threshold = 4096
//! threads = 1
//!
//! [schedule]
//! tick_interval_ms = 100
//! max_generations_per_tick = 4
//!
//! [presentation]
//! cell_step = 125.0
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, LifeResult};
use crate::state::{TogglePolicy, DEFAULT_PARALLEL_THRESHOLD};

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    pub grid: GridConfig,
    pub simulation: SimulationConfig,
    pub schedule: ScheduleConfig,
    pub presentation: PresentationConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            width: 10,
            height: 10,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub toggle_policy: TogglePolicy,
    pub parallel_threshold: usize,
    /// Driver thread pool size; 0 is treated as 1.
    pub threads: u8,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            toggle_policy: TogglePolicy::Permissive,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            threads: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub tick_interval_ms: u64,
    /// Upper bound on catch-up generations in a single driver tick.
    pub max_generations_per_tick: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig {
            tick_interval_ms: 100,
            max_generations_per_tick: 4,
        }
    }
}

impl ScheduleConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Distance between neighbouring cell instances in host world units.
    pub cell_step: f32,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        PresentationConfig { cell_step: 125.0 }
    }
}

impl LifeConfig {
    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(text: &str) -> LifeResult<Self> {
        let config: LifeConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> LifeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(
            "loaded config from {}: {}x{} grid",
            path.display(),
            config.grid.width,
            config.grid.height
        );
        Ok(config)
    }

    /// Check values the engine cannot work with.
    ///
    /// Grid dimensions are never rejected: a degenerate grid is legal and
    /// simply has no valid cells.
    pub fn validate(&self) -> LifeResult<()> {
        let step = self.presentation.cell_step;
        if !step.is_finite() || step < 0.0 {
            return Err(LifeError::InvalidConfig(format!(
                "presentation.cell_step must be finite and non-negative, got {step}"
            )));
        }
        if self.schedule.max_generations_per_tick == 0 {
            return Err(LifeError::InvalidConfig(
                "schedule.max_generations_per_tick must be at least 1".to_string(),
            ));
        }
        if self.grid.width <= 0 || self.grid.height <= 0 {
            tracing::warn!(
                "degenerate grid {}x{}: no cell will ever be valid",
                self.grid.width,
                self.grid.height
            );
        }
        Ok(())
    }
}
