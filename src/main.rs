use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

use crossing_sim::{
    config::{SimulationConfig, Validate},
    policy::Policy,
    simulation::{Episode, RasterMap},
};

#[derive(Parser)]
#[command(name = "crossing-sim")]
#[command(about = "Headless vehicle simulation at a four-way-stop crossing")]
struct Args {
    /// Simulation configuration file; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ASCII map ('#' = boundary); an open map of the configured size is used when omitted
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Number of episodes to run
    #[arg(short, long, default_value_t = 1)]
    episodes: u32,

    /// Random seed for reproducible traffic; episode N uses seed + N
    #[arg(short, long)]
    seed: Option<u64>,

    /// Control policy driving every vehicle
    #[arg(short, long, value_enum, default_value_t = PolicyKind::Gap)]
    policy: PolicyKind,

    /// Enable verbose logging for per-vehicle events
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum PolicyKind {
    /// Full throttle, constant clockwise steering
    Fixed,
    /// Follow the widest gap in the radar fan
    Gap,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .init();
    info!("Starting crossing simulator");

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load_from_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.episode.seed = Some(seed);
    }
    config.validate()?;

    let map = match &args.map {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read map {}", path.display()))?;
            RasterMap::from_ascii(&text)
                .with_context(|| format!("Invalid map {}", path.display()))?
        }
        None => RasterMap::open(config.episode.width, config.episode.height)?,
    };
    info!("Map: {}x{}, {} vehicles per episode", map.width(), map.height(), config.episode.start_positions.len());

    for episode_index in 0..args.episodes {
        let episode_config = config.for_episode(episode_index);

        let mut policy = match args.policy {
            PolicyKind::Fixed => Policy::new_fixed(1.0, 1.0),
            PolicyKind::Gap => Policy::new_gap_follow(0.6),
        };

        let started = Instant::now();
        let mut episode = Episode::new(episode_config, map.clone())?;
        let summary = episode.run(&mut policy)?;

        info!(
            "Episode {} finished: {} ticks in {:.1}ms",
            episode_index,
            summary.ticks,
            started.elapsed().as_secs_f64() * 1000.0
        );
        for vehicle in &summary.vehicles {
            info!(
                "  vehicle {}: distance {:.1}, ticks alive {}, rotation {:.0}, speed {:.1}, at ({:.1}, {:.1}), {:?}",
                vehicle.id.0,
                vehicle.distance,
                vehicle.ticks_alive,
                vehicle.total_rotation,
                vehicle.speed,
                vehicle.position.x,
                vehicle.position.y,
                vehicle.termination
            );
        }
    }

    Ok(())
}
