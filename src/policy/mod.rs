use crate::simulation::Control;
use anyhow::Result;

pub mod gap;

pub use gap::*;

/// Stand-in for the external policy: maps one observation vector to one control.
pub trait ControlPolicy {
    fn decide(&mut self, observation: &[f32]) -> Result<Control>;
    fn name(&self) -> &'static str;
}

/// Always returns the same control.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedControl {
    pub control: Control,
}

impl FixedControl {
    pub fn new(throttle: f32, steer: f32) -> Self {
        Self {
            control: Control::new(throttle, steer),
        }
    }
}

impl ControlPolicy for FixedControl {
    fn decide(&mut self, _observation: &[f32]) -> Result<Control> {
        Ok(self.control)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

pub enum Policy {
    Fixed(FixedControl),
    GapFollow(GapFollower),
}

impl Policy {
    pub fn new_fixed(throttle: f32, steer: f32) -> Self {
        Policy::Fixed(FixedControl::new(throttle, steer))
    }

    pub fn new_gap_follow(free_threshold: f32) -> Self {
        Policy::GapFollow(GapFollower::new(free_threshold))
    }
}

impl ControlPolicy for Policy {
    fn decide(&mut self, observation: &[f32]) -> Result<Control> {
        match self {
            Policy::Fixed(policy) => policy.decide(observation),
            Policy::GapFollow(policy) => policy.decide(observation),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Policy::Fixed(policy) => policy.name(),
            Policy::GapFollow(policy) => policy.name(),
        }
    }
}
