use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod episode;
pub mod vehicle;
pub mod intersection;

pub use episode::*;
pub use vehicle::*;
pub use intersection::*;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub episode: EpisodeConfig,
    pub vehicle: VehicleConfig,
    pub intersection: IntersectionConfig,
}

impl SimulationConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Copy of this config for the `index`-th episode of a batch. A fixed seed is offset
    /// by the index, wrapping at `u64::MAX`.
    pub fn for_episode(&self, index: u32) -> Self {
        let mut config = self.clone();
        config.episode.seed = self.episode.seed.map(|seed| seed.wrapping_add(index as u64));
        config
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for SimulationConfig {
    fn validate(&self) -> Result<()> {
        self.episode.validate()?;
        self.vehicle.validate()?;
        self.intersection.validate()?;
        Ok(())
    }
}

pub trait Validate {
    fn validate(&self) -> Result<()>;
}
