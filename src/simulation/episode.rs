use super::{
    AliveTransition, CollisionDetector, Point, RadarArray, RasterMap, Rect, Retirement,
    Termination, TrafficManager, Vehicle, VehicleId,
};
use crate::config::{SimulationConfig, Validate};
use crate::policy::ControlPolicy;
use anyhow::Result;

#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub tick: u64,
    pub alive: usize,
    pub background: usize,
    pub spawned: Option<VehicleId>,
    pub terminations: Vec<(VehicleId, Termination)>,
    pub retirements: Vec<Retirement>,
}

/// Raw per-vehicle state handed to an external scorer once the episode is over.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSummary {
    pub id: VehicleId,
    pub distance: f32,
    pub ticks_alive: u64,
    pub total_rotation: f32,
    pub speed: f32,
    pub position: Point,
    pub termination: Option<Termination>,
}

#[derive(Debug, Clone)]
pub struct EpisodeSummary {
    pub ticks: u64,
    pub vehicles: Vec<VehicleSummary>,
}

/// One run of controlled vehicles through a map with background traffic.
pub struct Episode {
    config: SimulationConfig,
    map: RasterMap,
    radar: RadarArray,
    vehicles: Vec<Vehicle>,
    traffic: TrafficManager,
    goal: Option<Rect>,
    tick: u64,
    finished: bool,
}

impl Episode {
    pub fn new(config: SimulationConfig, map: RasterMap) -> Result<Self> {
        config.validate()?;
        let vehicle_config = &config.vehicle;
        let radar = RadarArray::new(vehicle_config.radar_count, vehicle_config.max_sensing_range);

        let mut vehicles: Vec<Vehicle> = config
            .episode
            .start_positions
            .iter()
            .enumerate()
            .map(|(i, [x, y])| {
                Vehicle::new(VehicleId(i), Point::new(*x, *y), vehicle_config.size, vehicle_config.radar_count)
            })
            .collect();

        let traffic = TrafficManager::new(&config.intersection, vehicle_config.size, config.episode.seed)?;

        // Initial readings so the first policy call sees the surroundings.
        for vehicle in &mut vehicles {
            radar.update(vehicle, &map, &[]);
        }

        let goal = config
            .episode
            .goal
            .map(|goal| Rect::new(goal.x, goal.y, goal.width, goal.height));

        log::info!(
            "Episode started: {} vehicles on a {}x{} map",
            vehicles.len(),
            map.width(),
            map.height()
        );

        Ok(Self {
            config,
            map,
            radar,
            vehicles,
            traffic,
            goal,
            tick: 0,
            finished: false,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn map(&self) -> &RasterMap {
        &self.map
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicles_mut(&mut self) -> &mut [Vehicle] {
        &mut self.vehicles
    }

    pub fn traffic(&self) -> &TrafficManager {
        &self.traffic
    }

    pub fn traffic_mut(&mut self) -> &mut TrafficManager {
        &mut self.traffic
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn alive_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.is_alive()).count()
    }

    /// Normalised radar readings for every controlled vehicle, dead or alive.
    pub fn observations(&self) -> Vec<Vec<f32>> {
        let reference = self.config.vehicle.reference_range;
        self.vehicles.iter().map(|v| v.observation(reference)).collect()
    }

    /// Advances the episode by one tick.
    ///
    /// Order: policy decisions, spawn, controls, kinematics, radar, collision, harness
    /// limits, background arbitration, registry cleanup. Dead vehicles are skipped
    /// throughout. A policy error leaves the episode exactly as it was.
    pub fn tick(&mut self, policy: &mut dyn ControlPolicy) -> Result<TickReport> {
        let mut report = TickReport::default();
        if self.finished {
            report.tick = self.tick;
            return Ok(report);
        }

        // Every policy call must succeed before the episode state is touched.
        let reference = self.config.vehicle.reference_range;
        let controls = self
            .vehicles
            .iter()
            .filter(|v| v.is_alive())
            .map(|v| policy.decide(&v.observation(reference)))
            .collect::<Result<Vec<_>>>()?;

        report.spawned = self.traffic.update_spawning();

        for (vehicle, control) in self.vehicles.iter_mut().filter(|v| v.is_alive()).zip(controls) {
            if !(control.throttle.is_finite() && control.steer.is_finite()) {
                log::warn!("Policy {} returned non-finite control {:?}", policy.name(), control);
            }
            vehicle.apply_control(control, &self.config.vehicle);
        }

        let (width, height) = (self.map.width() as f32, self.map.height() as f32);
        let obstacles = self.traffic.obstacle_rects();

        for vehicle in self.vehicles.iter_mut().filter(|v| v.is_alive()) {
            vehicle.advance(width, height);
            self.radar.update(vehicle, &self.map, &obstacles);

            if let AliveTransition::Died(reason) = CollisionDetector::evaluate(vehicle, &self.map, &obstacles) {
                log::info!("Vehicle {} died at tick {}: {:?}", vehicle.id.0, self.tick, reason);
                report.terminations.push((vehicle.id, reason));

                if reason.is_collision() {
                    let bounds = vehicle.bounds();
                    let struck: Vec<VehicleId> = self
                        .traffic
                        .vehicles()
                        .iter()
                        .filter(|bg| bounds.intersects(&bg.vehicle.bounds()))
                        .map(|bg| bg.id())
                        .collect();
                    for id in struck {
                        self.traffic.mark_collided(id);
                    }
                }
                continue;
            }

            if let Some(reason) = Self::harness_limit(self.goal.as_ref(), self.config.episode.fatigue_limit, vehicle) {
                vehicle.terminate(reason);
                log::info!("Vehicle {} finished at tick {}: {:?}", vehicle.id.0, self.tick, reason);
                report.terminations.push((vehicle.id, reason));
            }
        }

        report.retirements = self.traffic.step();

        self.tick += 1;
        if self.tick >= self.config.episode.max_ticks {
            for vehicle in self.vehicles.iter_mut().filter(|v| v.is_alive()) {
                vehicle.terminate(Termination::TimedOut);
                report.terminations.push((vehicle.id, Termination::TimedOut));
            }
        }
        if self.alive_count() == 0 {
            self.finished = true;
            log::info!("Episode finished after {} ticks", self.tick);
        }

        report.tick = self.tick;
        report.alive = self.alive_count();
        report.background = self.traffic.vehicles().len();
        Ok(report)
    }

    fn harness_limit(goal: Option<&Rect>, fatigue_limit: Option<f32>, vehicle: &Vehicle) -> Option<Termination> {
        if let Some(goal) = goal {
            if vehicle.bounds().intersects(goal) {
                return Some(Termination::ReachedGoal);
            }
        }
        if let Some(limit) = fatigue_limit {
            if vehicle.total_rotation() > limit {
                return Some(Termination::FatigueExceeded);
            }
        }
        None
    }

    /// Ticks until every controlled vehicle has terminated, then clears background traffic.
    pub fn run(&mut self, policy: &mut dyn ControlPolicy) -> Result<EpisodeSummary> {
        while !self.finished {
            self.tick(policy)?;
        }
        Ok(self.finish())
    }

    /// Ends the episode: drops background traffic and empties the registry.
    pub fn finish(&mut self) -> EpisodeSummary {
        self.finished = true;
        self.traffic.clear();
        self.summary()
    }

    pub fn summary(&self) -> EpisodeSummary {
        EpisodeSummary {
            ticks: self.tick,
            vehicles: self
                .vehicles
                .iter()
                .map(|v| VehicleSummary {
                    id: v.id,
                    distance: v.distance(),
                    ticks_alive: v.ticks_alive(),
                    total_rotation: v.total_rotation(),
                    speed: v.speed,
                    position: v.position,
                    termination: v.termination(),
                })
                .collect(),
        }
    }
}
