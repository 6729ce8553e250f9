use super::{
    ArbiterState, Decision, IntersectionArbiter, Leg, ObstacleRegistry, Occupant, Rect, Vehicle,
    VehicleId, Zone, PRIORITY_ORDER,
};
use crate::config::{IntersectionConfig, SpawnConfig};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Traffic-rule data attached to a background vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct TrafficControl {
    pub leg: Leg,
    pub heading: f32,
    pub stop_line: f32,
    pub exit_threshold: f32,
}

#[derive(Debug, Clone)]
pub struct BackgroundVehicle {
    pub vehicle: Vehicle,
    pub control: TrafficControl,
    pub state: ArbiterState,
    pub last_decision: Decision,
}

impl BackgroundVehicle {
    pub fn id(&self) -> VehicleId {
        self.vehicle.id
    }

    pub fn leg(&self) -> Leg {
        self.control.leg
    }

    fn occupant(&self) -> Occupant {
        Occupant {
            id: self.vehicle.id,
            leg: self.control.leg,
            position: self.vehicle.position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetireReason {
    Exited,
    Collided,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retirement {
    pub id: VehicleId,
    pub leg: Leg,
    pub reason: RetireReason,
}

/// Spawns, moves and retires background vehicles at the four-leg crossing.
pub struct TrafficManager {
    arbiter: IntersectionArbiter,
    registry: ObstacleRegistry,
    vehicles: Vec<BackgroundVehicle>,
    spawn: SpawnConfig,
    capacity_per_leg: usize,
    vehicle_size: f32,
    spawn_timer: u32,
    spawn_threshold: u32,
    next_vehicle_id: usize,
    pending_collisions: Vec<VehicleId>,
    rng: StdRng,
}

impl TrafficManager {
    pub fn new(config: &IntersectionConfig, vehicle_size: f32, seed: Option<u64>) -> Result<Self> {
        let arbiter = IntersectionArbiter::new(config, vehicle_size)?;

        let mut rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };
        let spawn_threshold = Self::draw_threshold(&mut rng, &config.spawn);

        Ok(Self {
            arbiter,
            registry: ObstacleRegistry::new(),
            vehicles: Vec::new(),
            spawn: config.spawn.clone(),
            capacity_per_leg: config.capacity_per_leg,
            vehicle_size,
            spawn_timer: 0,
            spawn_threshold,
            next_vehicle_id: 0,
            pending_collisions: Vec::new(),
            rng,
        })
    }

    fn draw_threshold(rng: &mut StdRng, spawn: &SpawnConfig) -> u32 {
        rng.gen_range(spawn.min_interval_ticks..=spawn.max_interval_ticks)
    }

    pub fn arbiter(&self) -> &IntersectionArbiter {
        &self.arbiter
    }

    pub fn registry(&self) -> &ObstacleRegistry {
        &self.registry
    }

    pub fn vehicles(&self) -> &[BackgroundVehicle] {
        &self.vehicles
    }

    pub fn get(&self, id: VehicleId) -> Option<&BackgroundVehicle> {
        self.vehicles.iter().find(|bg| bg.id() == id)
    }

    pub fn obstacle_rects(&self) -> Vec<Rect> {
        self.vehicles.iter().map(|bg| bg.vehicle.bounds()).collect()
    }

    /// Advances the spawn timer and, when it fires, tries a uniformly chosen leg.
    pub fn update_spawning(&mut self) -> Option<VehicleId> {
        self.spawn_timer += 1;
        if self.spawn_timer < self.spawn_threshold {
            return None;
        }

        self.spawn_timer = 0;
        self.spawn_threshold = Self::draw_threshold(&mut self.rng, &self.spawn);

        let leg = *PRIORITY_ORDER.choose(&mut self.rng)?;
        self.spawn(leg)
    }

    /// Creates a background vehicle at `leg`'s entry unless the leg is at capacity.
    pub fn spawn(&mut self, leg: Leg) -> Option<VehicleId> {
        if self.registry.occupancy(leg) >= self.capacity_per_leg {
            log::debug!("Leg {:?} occupied, skipping spawn", leg);
            return None;
        }

        let spec = self.arbiter.leg(leg).clone();
        let id = VehicleId(self.next_vehicle_id);
        self.next_vehicle_id += 1;

        let vehicle = Vehicle::new(id, spec.entry, self.vehicle_size, 0)
            .with_motion(spec.heading, spec.speed);
        self.vehicles.push(BackgroundVehicle {
            vehicle,
            control: TrafficControl {
                leg,
                heading: spec.heading,
                stop_line: spec.stop_line,
                exit_threshold: spec.exit_threshold,
            },
            state: ArbiterState::Approaching,
            last_decision: Decision::Proceed,
        });
        self.registry.register(leg, id);

        log::debug!("Spawned background vehicle {} on {:?}", id.0, leg);
        Some(id)
    }

    /// Flags a background vehicle for retirement at the end of the next `step`.
    pub fn mark_collided(&mut self, id: VehicleId) {
        if !self.pending_collisions.contains(&id) {
            self.pending_collisions.push(id);
        }
    }

    /// One arbitration pass.
    ///
    /// Decisions are taken against the positions every vehicle had when the pass
    /// started. Retirements are gathered after all vehicles have moved and only then
    /// removed from the active list and the registry.
    pub fn step(&mut self) -> Vec<Retirement> {
        let snapshot: Vec<Occupant> = self.vehicles.iter().map(BackgroundVehicle::occupant).collect();
        let decisions = self.arbiter.decide_all(&snapshot);

        for (bg, decision) in self.vehicles.iter_mut().zip(decisions) {
            let speed = if decision.is_hold() { 0.0 } else { bg.vehicle.speed };
            if decision.is_hold() && !bg.last_decision.is_hold() {
                log::debug!("Background vehicle {} on {:?} holding: {:?}", bg.id().0, bg.leg(), decision);
            }

            bg.vehicle.coast(bg.control.heading, speed);
            bg.last_decision = decision;
            bg.state = self.arbiter.state_for(bg.control.leg, &bg.vehicle.position, decision);
        }

        let mut retirements = Vec::new();
        for bg in &self.vehicles {
            if self.pending_collisions.contains(&bg.id()) {
                retirements.push(Retirement { id: bg.id(), leg: bg.leg(), reason: RetireReason::Collided });
            } else if self.arbiter.zone(bg.leg(), &bg.vehicle.position) == Zone::Exited {
                retirements.push(Retirement { id: bg.id(), leg: bg.leg(), reason: RetireReason::Exited });
            }
        }
        self.pending_collisions.clear();

        for retirement in &retirements {
            self.registry.release(retirement.leg, retirement.id);
            log::debug!("Retired background vehicle {} on {:?}: {:?}", retirement.id.0, retirement.leg, retirement.reason);
        }
        self.vehicles.retain(|bg| !retirements.iter().any(|r| r.id == bg.id()));

        retirements
    }

    /// Drops every background vehicle and empties the registry.
    pub fn clear(&mut self) {
        self.vehicles.clear();
        self.registry.clear();
        self.pending_collisions.clear();
        self.spawn_timer = 0;
    }
}
