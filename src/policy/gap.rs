use super::ControlPolicy;
use crate::simulation::Control;
use anyhow::{bail, Result};

/// Contiguous run of rays reading above the free-space threshold, inclusive indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub start: usize,
    pub end: usize,
}

impl Gap {
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Steers toward the widest free gap in the radar fan.
///
/// Rays are ordered left to right, so a target index right of centre turns clockwise.
/// Throttles up while the forward rays are clear and backs off otherwise.
#[derive(Debug, Clone)]
pub struct GapFollower {
    free_threshold: f32,
}

impl GapFollower {
    pub fn new(free_threshold: f32) -> Self {
        Self { free_threshold }
    }

    pub fn find_widest_gap(&self, observation: &[f32]) -> Option<Gap> {
        let mut best: Option<Gap> = None;
        let mut current_start: Option<usize> = None;

        let close_gap = |start: usize, end: usize, best: &mut Option<Gap>| {
            let gap = Gap { start, end };
            if best.map_or(true, |b| gap.width() > b.width()) {
                *best = Some(gap);
            }
        };

        for (i, reading) in observation.iter().enumerate() {
            match (*reading > self.free_threshold, current_start) {
                (true, None) => current_start = Some(i),
                (false, Some(start)) => {
                    close_gap(start, i - 1, &mut best);
                    current_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = current_start {
            close_gap(start, observation.len() - 1, &mut best);
        }

        best
    }

    /// Reading-weighted centre of the gap, as a fractional ray index.
    fn weighted_center(observation: &[f32], gap: Gap) -> f32 {
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        for (i, reading) in observation.iter().enumerate().take(gap.end + 1).skip(gap.start) {
            weighted_sum += i as f32 * reading;
            weight_total += reading;
        }

        if weight_total > 0.0 {
            weighted_sum / weight_total
        } else {
            (gap.start + gap.end) as f32 / 2.0
        }
    }
}

impl ControlPolicy for GapFollower {
    fn decide(&mut self, observation: &[f32]) -> Result<Control> {
        if observation.is_empty() {
            bail!("Gap follower needs at least one radar reading");
        }

        let mid = (observation.len() - 1) as f32 / 2.0;
        let forward_clear = {
            let lo = mid.floor() as usize;
            let hi = mid.ceil() as usize;
            observation[lo].min(observation[hi]) > self.free_threshold
        };

        let steer = match self.find_widest_gap(observation) {
            Some(gap) => Self::weighted_center(observation, gap) - mid,
            // Boxed in: turn toward whichever side reads further.
            None => observation[observation.len() - 1] - observation[0],
        };
        let throttle = if forward_clear { 1.0 } else { -1.0 };

        Ok(Control::new(throttle, steer))
    }

    fn name(&self) -> &'static str {
        "gap"
    }
}
