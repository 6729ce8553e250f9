use super::{heading_vector, Point, Rect, VehicleId};
use crate::config::VehicleConfig;

/// Why a vehicle stopped taking part in the episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// Centre left the map.
    OffMap,
    /// Centre landed on a boundary cell.
    HitBoundary,
    /// Bounding box overlapped another vehicle.
    HitVehicle,
    ReachedGoal,
    FatigueExceeded,
    TimedOut,
}

impl Termination {
    pub fn is_collision(&self) -> bool {
        matches!(self, Termination::OffMap | Termination::HitBoundary | Termination::HitVehicle)
    }
}

/// Raw policy output for one tick. Only the signs matter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Control {
    pub throttle: f32,
    pub steer: f32,
}

impl Control {
    pub fn new(throttle: f32, steer: f32) -> Self {
        Self { throttle, steer }
    }
}

#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,
    pub position: Point,
    /// Degrees, 0 = up, clockwise positive. Not wrapped.
    pub heading: f32,
    pub speed: f32,
    pub size: f32,
    total_rotation: f32,
    distance: f32,
    ticks_alive: u64,
    termination: Option<Termination>,
    radar: Vec<f32>,
    radar_origin_off_map: bool,
}

impl Vehicle {
    pub fn new(id: VehicleId, position: Point, size: f32, radar_count: usize) -> Self {
        Self {
            id,
            position,
            heading: 0.0,
            speed: 0.0,
            size,
            total_rotation: 0.0,
            distance: 0.0,
            ticks_alive: 0,
            termination: None,
            radar: vec![0.0; radar_count],
            radar_origin_off_map: false,
        }
    }

    pub fn with_motion(mut self, heading: f32, speed: f32) -> Self {
        self.heading = heading;
        self.speed = speed;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.termination.is_none()
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Ends the vehicle's episode. Returns false if it was already terminated, in
    /// which case the original reason is kept.
    pub fn terminate(&mut self, reason: Termination) -> bool {
        if self.termination.is_some() {
            return false;
        }
        self.termination = Some(reason);
        true
    }

    pub fn total_rotation(&self) -> f32 {
        self.total_rotation
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn ticks_alive(&self) -> u64 {
        self.ticks_alive
    }

    pub fn radar_count(&self) -> usize {
        self.radar.len()
    }

    pub fn radar(&self) -> &[f32] {
        &self.radar
    }

    /// True when the last scan was taken from outside the map and every reading is the
    /// out-of-bounds sentinel rather than a measurement.
    pub fn radar_origin_off_map(&self) -> bool {
        self.radar_origin_off_map
    }

    pub(crate) fn store_radar(&mut self, readings: Vec<f32>, origin_off_map: bool) {
        debug_assert_eq!(readings.len(), self.radar.len());
        self.radar = readings;
        self.radar_origin_off_map = origin_off_map;
    }

    /// Readings scaled by `reference_range`. Values above 1.0 are possible when the
    /// sensing range exceeds the reference and are passed through as-is.
    pub fn observation(&self, reference_range: f32) -> Vec<f32> {
        self.radar.iter().map(|reading| reading / reference_range).collect()
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.position, self.size, self.size)
    }

    /// One kinematic step for a controlled vehicle.
    ///
    /// The centre is first pinned into `[1, dim - 1]` on each axis. The heading is then
    /// capped at 90 degrees and the capped value is written back before integrating.
    pub fn advance(&mut self, width: f32, height: f32) {
        if self.position.x >= width {
            self.position.x = width - 1.0;
        }
        if self.position.x <= 0.0 {
            self.position.x = 1.0;
        }
        if self.position.y <= 0.0 {
            self.position.y = 1.0;
        }
        if self.position.y >= height {
            self.position.y = height - 1.0;
        }

        self.heading = self.heading.min(90.0);
        self.position += heading_vector(self.heading) * self.speed;
        self.distance += self.speed;
        self.ticks_alive += 1;
    }

    /// Straight-line step on a fixed heading with no clamping, used by background
    /// traffic. `speed` may differ from `self.speed` when the vehicle is held.
    pub fn coast(&mut self, heading: f32, speed: f32) {
        self.position += heading_vector(heading) * speed;
        self.distance += speed;
        self.ticks_alive += 1;
    }

    pub fn apply_rotation_delta(&mut self, delta: f32) {
        self.heading += delta;
        self.total_rotation += delta.abs();
    }

    /// Applies one tick of policy output using the fixed steps from `config`.
    ///
    /// There is no neutral steering: a non-positive steer turns counter-clockwise.
    pub fn apply_control(&mut self, control: Control, config: &VehicleConfig) {
        let throttle = if control.throttle.is_finite() { control.throttle } else { 0.0 };
        let steer = if control.steer.is_finite() { control.steer } else { 0.0 };

        if throttle > 0.0 {
            self.speed = (self.speed + config.speed_step).min(config.max_speed);
        } else {
            self.speed = (self.speed - config.speed_step).max(-config.max_speed);
        }

        if steer > 0.0 {
            self.apply_rotation_delta(config.rotation_step);
        } else {
            self.apply_rotation_delta(-config.rotation_step);
        }
    }
}
