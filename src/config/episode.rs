use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EpisodeConfig {
    /// Used when no map file is supplied; otherwise the map's own size wins.
    pub width: usize,
    pub height: usize,
    /// Ticks after which surviving vehicles are timed out.
    pub max_ticks: u64,
    pub tick_rate: u32,
    pub seed: Option<u64>,
    /// One controlled vehicle is created per entry.
    pub start_positions: Vec<[f32; 2]>,
    pub goal: Option<GoalConfig>,
    /// Accumulated rotation (degrees) above which a vehicle is retired.
    pub fatigue_limit: Option<f32>,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            width: 683,
            height: 384,
            max_ticks: 1200,
            tick_rate: 60,
            seed: None,
            start_positions: vec![[100.0, 190.0]],
            goal: Some(GoalConfig {
                x: 660.0,
                y: 192.0,
                width: 20.0,
                height: 20.0,
            }),
            fatigue_limit: Some(2000.0),
        }
    }
}

/// Top-left anchored target rectangle.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct GoalConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Validate for EpisodeConfig {
    fn validate(&self) -> Result<()> {
        if self.width < 2 || self.height < 2 {
            return Err(anyhow!("Map dimensions must be at least 2x2, got {}x{}", self.width, self.height));
        }

        if self.max_ticks == 0 {
            return Err(anyhow!("Max ticks must be greater than zero"));
        }

        if self.tick_rate == 0 {
            return Err(anyhow!("Tick rate must be greater than zero"));
        }

        if self.start_positions.is_empty() {
            return Err(anyhow!("At least one start position must be defined"));
        }

        for position in &self.start_positions {
            if !position.iter().all(|c| c.is_finite()) {
                return Err(anyhow!("Start position {:?} must be finite", position));
            }
        }

        if let Some(goal) = &self.goal {
            if goal.width <= 0.0 || goal.height <= 0.0 {
                return Err(anyhow!("Goal dimensions must be positive"));
            }
        }

        if let Some(limit) = self.fatigue_limit {
            if limit <= 0.0 {
                return Err(anyhow!("Fatigue limit must be positive"));
            }
        }

        Ok(())
    }
}
