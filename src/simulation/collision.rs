use super::{RasterMap, Rect, Termination, Vehicle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliveTransition {
    StillAlive,
    Died(Termination),
    AlreadyDead,
}

pub struct CollisionDetector;

impl CollisionDetector {
    /// Checks a vehicle against the map and the given bounding boxes without mutating it.
    ///
    /// Map checks take precedence: a vehicle that is both off the map and touching
    /// another box is reported as `OffMap`.
    pub fn detect(vehicle: &Vehicle, map: &RasterMap, others: &[Rect]) -> Option<Termination> {
        let center = vehicle.position;
        if !map.interior_contains(&center) {
            return Some(Termination::OffMap);
        }
        if map.is_obstacle(center.x, center.y) {
            return Some(Termination::HitBoundary);
        }

        let bounds = vehicle.bounds();
        if others.iter().any(|other| bounds.intersects(other)) {
            return Some(Termination::HitVehicle);
        }

        None
    }

    pub fn evaluate(vehicle: &mut Vehicle, map: &RasterMap, others: &[Rect]) -> AliveTransition {
        if !vehicle.is_alive() {
            return AliveTransition::AlreadyDead;
        }

        match Self::detect(vehicle, map, others) {
            Some(reason) => {
                vehicle.terminate(reason);
                log::debug!(
                    "Vehicle {} terminated at ({:.1}, {:.1}): {:?}",
                    vehicle.id.0,
                    vehicle.position.x,
                    vehicle.position.y,
                    reason
                );
                AliveTransition::Died(reason)
            }
            None => AliveTransition::StillAlive,
        }
    }
}
