pub mod config;
pub mod simulation;
pub mod policy;

pub use simulation::{Control, Episode, EpisodeSummary, RasterMap, Termination, TickReport, Vehicle, VehicleId};
pub use config::{SimulationConfig, Validate};
pub use policy::{ControlPolicy, Policy};
