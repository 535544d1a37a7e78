use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::{FOOD_COUNT, GRID_SIZE};

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub grid_size: i32,
    pub food_count: usize,
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
    pub autopilot: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            food_count: FOOD_COUNT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
            autopilot: true,
        }
    }
}

impl GameSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if !(4..=100).contains(&self.grid_size) {
            return Err("Grid size must be between 4 and 100".to_string());
        }
        if !(1..=100).contains(&self.food_count) {
            return Err("Food count must be between 1 and 100".to_string());
        }
        if !(10..=5000).contains(&self.tick_interval_ms) {
            return Err("Tick interval must be between 10ms and 5000ms".to_string());
        }
        Ok(())
    }
}
