//! Four-way-stop right-of-way rules for background traffic.
//!
//! Every leg is described by one [`LegSpec`] row: where vehicles enter, how fast and on
//! which heading they travel, and the two lines along the travel axis that matter to
//! arbitration (the stop line and the exit threshold). All positions compared against
//! those lines are vehicle centres.
//!
//! A vehicle at its stop line yields first to anyone inside the intersection box and
//! then to an occupant waiting at the stop line of its priority-right neighbour.

use super::{Point, VehicleId};
use crate::config::IntersectionConfig;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leg {
    Top,
    Right,
    Bottom,
    Left,
}

/// Cyclic right-of-way order. A leg yields to the leg one position before it.
pub const PRIORITY_ORDER: [Leg; 4] = [Leg::Top, Leg::Right, Leg::Bottom, Leg::Left];

impl Leg {
    pub fn priority_index(self) -> usize {
        match self {
            Leg::Top => 0,
            Leg::Right => 1,
            Leg::Bottom => 2,
            Leg::Left => 3,
        }
    }

    /// The leg this one must yield to: `(index - 1) mod 4` in [`PRIORITY_ORDER`].
    pub fn priority_right(self) -> Leg {
        let n = PRIORITY_ORDER.len();
        PRIORITY_ORDER[(self.priority_index() + n - 1) % n]
    }

    pub fn opposite(self) -> Leg {
        let n = PRIORITY_ORDER.len();
        PRIORITY_ORDER[(self.priority_index() + 2) % n]
    }

    pub fn axis(self) -> Axis {
        match self {
            Leg::Top | Leg::Bottom => Axis::Vertical,
            Leg::Left | Leg::Right => Axis::Horizontal,
        }
    }

    /// +1 when traffic on this leg moves toward increasing coordinates.
    pub fn travel_sign(self) -> f32 {
        match self {
            Leg::Top | Leg::Left => 1.0,
            Leg::Bottom | Leg::Right => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    pub fn coordinate(self, point: &Point) -> f32 {
        match self {
            Axis::Vertical => point.y,
            Axis::Horizontal => point.x,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegSpec {
    pub leg: Leg,
    pub entry: Point,
    pub speed: f32,
    pub heading: f32,
    pub stop_line: f32,
    pub exit_threshold: f32,
}

impl LegSpec {
    /// Signed distance past `line` in this leg's direction of travel.
    pub fn progress_past(&self, position: &Point, line: f32) -> f32 {
        self.leg.travel_sign() * (self.leg.axis().coordinate(position) - line)
    }
}

/// Where a vehicle sits relative to its own leg's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Approach,
    /// Within tolerance of the stop line and not yet past it.
    StopLine,
    /// Past the stop line, before the exit threshold.
    Box,
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArbiterState {
    Approaching,
    Holding,
    Crossing,
    Retired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldReason {
    BoxOccupied,
    YieldToRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Hold(HoldReason),
}

impl Decision {
    pub fn is_hold(&self) -> bool {
        matches!(self, Decision::Hold(_))
    }
}

/// A background vehicle as seen by arbitration at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occupant {
    pub id: VehicleId,
    pub leg: Leg,
    pub position: Point,
}

#[derive(Debug, Clone)]
pub struct IntersectionArbiter {
    legs: Vec<LegSpec>,
    tolerance: f32,
}

impl IntersectionArbiter {
    pub fn new(config: &IntersectionConfig, vehicle_size: f32) -> Result<Self> {
        let half = vehicle_size / 2.0;

        let row = |leg: Leg| {
            config
                .legs
                .iter()
                .find(|row| row.leg == leg)
                .ok_or_else(|| anyhow!("Intersection has no {:?} leg", leg))
        };
        let stop_line = |leg: Leg| -> Result<f32> {
            Ok(row(leg)?.entry_threshold - leg.travel_sign() * half)
        };

        let mut legs = Vec::with_capacity(PRIORITY_ORDER.len());
        for leg in PRIORITY_ORDER {
            let leg_row = row(leg)?;
            legs.push(LegSpec {
                leg,
                entry: Point::new(leg_row.entry[0], leg_row.entry[1]),
                speed: leg_row.speed,
                heading: leg_row.heading,
                stop_line: stop_line(leg)?,
                exit_threshold: stop_line(leg.opposite())?,
            });
        }

        Ok(Self {
            legs,
            tolerance: config.stop_tolerance,
        })
    }

    pub fn leg(&self, leg: Leg) -> &LegSpec {
        &self.legs[leg.priority_index()]
    }

    pub fn legs(&self) -> &[LegSpec] {
        &self.legs
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    pub fn zone(&self, leg: Leg, position: &Point) -> Zone {
        let spec = self.leg(leg);
        if spec.progress_past(position, spec.exit_threshold) >= 0.0 {
            return Zone::Exited;
        }

        let past = spec.progress_past(position, spec.stop_line);
        if past > 0.0 {
            Zone::Box
        } else if -past <= self.tolerance {
            Zone::StopLine
        } else {
            Zone::Approach
        }
    }

    pub fn is_at_stop_line(&self, leg: Leg, position: &Point) -> bool {
        self.zone(leg, position) == Zone::StopLine
    }

    /// Open interval between the stop lines of the two legs sharing `axis`.
    pub fn box_interval(&self, axis: Axis) -> (f32, f32) {
        let (a, b) = match axis {
            Axis::Vertical => (self.leg(Leg::Top).stop_line, self.leg(Leg::Bottom).stop_line),
            Axis::Horizontal => (self.leg(Leg::Left).stop_line, self.leg(Leg::Right).stop_line),
        };
        (a.min(b), a.max(b))
    }

    /// Whether a vehicle on `leg` lies strictly inside the box, measured along its own axis.
    pub fn in_box(&self, leg: Leg, position: &Point) -> bool {
        let axis = leg.axis();
        let (low, high) = self.box_interval(axis);
        let coordinate = axis.coordinate(position);
        low < coordinate && coordinate < high
    }

    pub fn decide(&self, me: &Occupant, snapshot: &[Occupant]) -> Decision {
        if self.zone(me.leg, &me.position) != Zone::StopLine {
            return Decision::Proceed;
        }

        let box_busy = snapshot
            .iter()
            .filter(|other| other.id != me.id)
            .any(|other| self.in_box(other.leg, &other.position));
        if box_busy {
            return Decision::Hold(HoldReason::BoxOccupied);
        }

        let right = me.leg.priority_right();
        let right_waiting = snapshot
            .iter()
            .filter(|other| other.id != me.id && other.leg == right)
            .any(|other| self.is_at_stop_line(right, &other.position));
        if right_waiting {
            return Decision::Hold(HoldReason::YieldToRight);
        }

        Decision::Proceed
    }

    /// Decides for every occupant against the same snapshot. Results are in snapshot order.
    ///
    /// With a vehicle waiting on every leg each one yields to its right and nobody moves.
    pub fn decide_all(&self, snapshot: &[Occupant]) -> Vec<Decision> {
        snapshot.iter().map(|me| self.decide(me, snapshot)).collect()
    }

    pub fn state_for(&self, leg: Leg, position: &Point, decision: Decision) -> ArbiterState {
        match (self.zone(leg, position), decision) {
            (Zone::Exited, _) => ArbiterState::Retired,
            (Zone::Box, _) => ArbiterState::Crossing,
            (_, Decision::Hold(_)) => ArbiterState::Holding,
            _ => ArbiterState::Approaching,
        }
    }
}
