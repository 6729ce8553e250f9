use super::{heading_vector, Point, RasterMap, Rect, Vehicle};

/// Returned for every ray when the vehicle centre is already off the map.
///
/// Shares units with real measurements, so a reading of 1.0 is ambiguous on its own;
/// check `RadarSweep::origin_off_map` (or `Vehicle::radar_origin_off_map`) to tell them apart.
pub const OUT_OF_BOUNDS_SENTINEL: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RadarSweep {
    pub readings: Vec<f32>,
    pub origin_off_map: bool,
}

/// Fan of unit-step rays spread over the 180 degree arc in front of a vehicle.
#[derive(Debug, Clone)]
pub struct RadarArray {
    count: usize,
    max_range: f32,
}

impl RadarArray {
    pub fn new(count: usize, max_range: f32) -> Self {
        Self { count, max_range }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn max_range(&self) -> f32 {
        self.max_range
    }

    /// Ray headings in degrees, leftmost first. A single ray points straight ahead.
    pub fn ray_angles(&self, heading: f32) -> Vec<f32> {
        match self.count {
            0 => Vec::new(),
            1 => vec![heading],
            n => {
                let spread = 180.0 / (n - 1) as f32;
                (0..n).map(|i| heading - 90.0 + i as f32 * spread).collect()
            }
        }
    }

    pub fn scan(&self, vehicle: &Vehicle, map: &RasterMap, obstacles: &[Rect]) -> RadarSweep {
        let origin = vehicle.position;
        if !map.interior_contains(&origin) {
            return RadarSweep {
                readings: vec![OUT_OF_BOUNDS_SENTINEL; self.count],
                origin_off_map: true,
            };
        }

        let readings = self
            .ray_angles(vehicle.heading)
            .into_iter()
            .map(|angle| self.cast(origin, angle, map, obstacles))
            .collect();

        RadarSweep { readings, origin_off_map: false }
    }

    /// Scans and stores the result on the vehicle.
    pub fn update(&self, vehicle: &mut Vehicle, map: &RasterMap, obstacles: &[Rect]) {
        let sweep = self.scan(vehicle, map, obstacles);
        vehicle.store_radar(sweep.readings, sweep.origin_off_map);
    }

    /// Distance from `origin` to the last probe taken along `angle` (degrees).
    ///
    /// Probes advance one unit at a time and stop on leaving the map, on a boundary
    /// cell, or inside any obstacle rectangle. The stopping probe is the one measured.
    /// A clear ray ends at the last probe below `max_range`.
    pub fn cast(&self, origin: Point, angle: f32, map: &RasterMap, obstacles: &[Rect]) -> f32 {
        let direction = heading_vector(angle);
        let mut probe = origin;
        let mut length = 0.0;

        while length < self.max_range {
            probe = origin + direction * length;

            if !map.in_bounds(probe.x, probe.y) || map.is_obstacle(probe.x, probe.y) {
                break;
            }
            if obstacles.iter().any(|rect| rect.contains(&probe)) {
                break;
            }

            length += 1.0;
        }

        (probe - origin).magnitude().min(self.max_range)
    }
}
