use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Side of the square bounding box; also offsets the stop lines.
    pub size: f32,
    pub radar_count: usize,
    /// Longest ray, in map units.
    pub max_sensing_range: f32,
    /// Divisor applied to raw readings before they reach the policy.
    pub reference_range: f32,
    pub max_speed: f32,
    pub speed_step: f32,
    /// Degrees per tick.
    pub rotation_step: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            size: 30.0,
            radar_count: 6,
            max_sensing_range: 50.0,
            reference_range: 50.0,
            max_speed: 2.0,
            speed_step: 0.1,
            rotation_step: 5.0,
        }
    }
}

impl Validate for VehicleConfig {
    fn validate(&self) -> Result<()> {
        if self.size <= 0.0 {
            return Err(anyhow!("Vehicle size must be positive"));
        }

        if self.radar_count == 0 {
            return Err(anyhow!("Radar count must be greater than zero"));
        }

        if self.max_sensing_range <= 0.0 || self.reference_range <= 0.0 {
            return Err(anyhow!("Sensing ranges must be positive"));
        }

        if self.max_speed <= 0.0 {
            return Err(anyhow!("Max speed must be positive"));
        }

        if self.speed_step <= 0.0 || self.rotation_step <= 0.0 {
            return Err(anyhow!("Speed and rotation steps must be positive"));
        }

        Ok(())
    }
}
