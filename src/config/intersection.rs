use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use crate::simulation::{Leg, PRIORITY_ORDER};
use super::Validate;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IntersectionConfig {
    /// How close (along the travel axis) a vehicle must be to count as at its stop line.
    pub stop_tolerance: f32,
    pub capacity_per_leg: usize,
    pub spawn: SpawnConfig,
    pub legs: Vec<LegConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpawnConfig {
    pub min_interval_ticks: u32,
    pub max_interval_ticks: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LegConfig {
    pub leg: Leg,
    pub entry: [f32; 2],
    pub speed: f32,
    /// Degrees, 0 = up.
    pub heading: f32,
    /// Edge of the intersection box on this leg's approach; the stop line sits half a
    /// vehicle before it.
    pub entry_threshold: f32,
}

impl Default for IntersectionConfig {
    fn default() -> Self {
        let speed = 1.5;
        Self {
            stop_tolerance: 2.0,
            capacity_per_leg: 1,
            spawn: SpawnConfig {
                min_interval_ticks: 30,
                max_interval_ticks: 60,
            },
            legs: vec![
                LegConfig { leg: Leg::Top, entry: [310.0, 50.0], speed, heading: 180.0, entry_threshold: 140.0 },
                LegConfig { leg: Leg::Bottom, entry: [351.0, 334.0], speed, heading: 0.0, entry_threshold: 234.0 },
                LegConfig { leg: Leg::Left, entry: [40.0, 220.0], speed, heading: 90.0, entry_threshold: 255.0 },
                LegConfig { leg: Leg::Right, entry: [640.0, 160.0], speed, heading: 270.0, entry_threshold: 397.0 },
            ],
        }
    }
}

impl Validate for IntersectionConfig {
    fn validate(&self) -> Result<()> {
        if self.stop_tolerance <= 0.0 {
            return Err(anyhow!("Stop tolerance must be positive"));
        }

        if self.capacity_per_leg == 0 {
            return Err(anyhow!("Capacity per leg must be greater than zero"));
        }

        let spawn = &self.spawn;
        if spawn.min_interval_ticks == 0 {
            return Err(anyhow!("Spawn interval must be at least one tick"));
        }

        if spawn.min_interval_ticks > spawn.max_interval_ticks {
            return Err(anyhow!(
                "Spawn interval minimum {} exceeds maximum {}",
                spawn.min_interval_ticks,
                spawn.max_interval_ticks
            ));
        }

        if self.legs.len() != PRIORITY_ORDER.len() {
            return Err(anyhow!("Intersection needs exactly {} legs, got {}", PRIORITY_ORDER.len(), self.legs.len()));
        }

        for leg in PRIORITY_ORDER {
            let count = self.legs.iter().filter(|row| row.leg == leg).count();
            if count != 1 {
                return Err(anyhow!("Leg {:?} must be defined exactly once, found {}", leg, count));
            }
        }

        for row in &self.legs {
            if row.speed <= 0.0 {
                return Err(anyhow!("Speed for leg {:?} must be positive", row.leg));
            }

            // Vehicles must land inside the stop-line window on their way in.
            if row.speed > self.stop_tolerance {
                return Err(anyhow!(
                    "Speed {} for leg {:?} exceeds stop tolerance {}",
                    row.speed,
                    row.leg,
                    self.stop_tolerance
                ));
            }

            if !row.heading.is_finite() || !row.entry_threshold.is_finite() {
                return Err(anyhow!("Geometry for leg {:?} must be finite", row.leg));
            }
        }

        Ok(())
    }
}
