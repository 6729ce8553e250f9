use super::{Leg, VehicleId, PRIORITY_ORDER};
use std::collections::HashMap;

/// Which background vehicles are active on each leg.
///
/// The registry does not cap occupancy; the spawner checks `occupancy` before
/// registering.
#[derive(Debug, Clone)]
pub struct ObstacleRegistry {
    occupants: HashMap<Leg, Vec<VehicleId>>,
}

impl Default for ObstacleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        let occupants = PRIORITY_ORDER.iter().map(|leg| (*leg, Vec::new())).collect();
        Self { occupants }
    }

    pub fn register(&mut self, leg: Leg, id: VehicleId) {
        self.occupants.entry(leg).or_default().push(id);
    }

    /// Removes `id` from `leg`. Returns false if it was not registered there.
    pub fn release(&mut self, leg: Leg, id: VehicleId) -> bool {
        let Some(ids) = self.occupants.get_mut(&leg) else {
            return false;
        };
        match ids.iter().position(|existing| *existing == id) {
            Some(index) => {
                ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn occupants(&self, leg: Leg) -> &[VehicleId] {
        self.occupants.get(&leg).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn occupancy(&self, leg: Leg) -> usize {
        self.occupants(leg).len()
    }

    pub fn is_vacant(&self, leg: Leg) -> bool {
        self.occupancy(leg) == 0
    }

    pub fn total(&self) -> usize {
        self.occupants.values().map(Vec::len).sum()
    }

    pub fn contains(&self, id: VehicleId) -> bool {
        self.occupants.values().any(|ids| ids.contains(&id))
    }

    pub fn clear(&mut self) {
        for ids in self.occupants.values_mut() {
            ids.clear();
        }
    }
}
