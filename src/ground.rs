//! Ground contact and fall tracking.
//!
//! Runs in the fixed physics phase: `check_grounded` probes straight down
//! from the actor, then `tick` accumulates airborne time and reports when the
//! fall threshold is crossed. A crossing is reported once; the latch re-arms
//! the next time the actor touches ground.

use crate::collision::Raycast;
use bevy::prelude::*;

/// Default probe length below the actor origin.
pub const DEFAULT_RAY_LENGTH: f32 = 2.0;
/// Default airborne time (seconds) treated as a fatal fall.
pub const DEFAULT_MAX_FALL_SECS: f32 = 3.0;

/// Grounded flag plus consecutive airborne time.
#[derive(Component, Debug, Clone, Default)]
pub struct GroundState {
    grounded: bool,
    airborne_secs: f32,
    crossed: bool,
}

impl GroundState {
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Seconds spent airborne since the last ground contact.
    #[must_use]
    pub fn airborne_secs(&self) -> f32 {
        self.airborne_secs
    }

    /// Whether the current fall has already been reported.
    #[must_use]
    pub fn threshold_reported(&self) -> bool {
        self.crossed
    }

    /// Record the result of a ground probe. Landing clears airborne time and
    /// re-arms the threshold latch.
    pub fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
        if grounded {
            self.airborne_secs = 0.0;
            self.crossed = false;
        }
    }

    /// Optimistically leave the ground (after a jump). The next probe corrects it.
    pub fn mark_airborne(&mut self) {
        self.grounded = false;
    }

    /// Start a new fall from zero after the actor is teleported.
    pub fn restart_fall(&mut self) {
        self.airborne_secs = 0.0;
        self.crossed = false;
    }
}

/// What a single `FallTracker::tick` observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallTick {
    Grounded,
    Airborne,
    /// Airborne time reached the threshold during this tick.
    ThresholdCrossed,
}

/// Probe and threshold configuration.
#[derive(Component, Debug, Clone, Copy)]
pub struct FallTracker {
    pub ray_length: f32,
    pub max_fall_secs: f32,
}

impl Default for FallTracker {
    fn default() -> Self {
        Self {
            ray_length: DEFAULT_RAY_LENGTH,
            max_fall_secs: DEFAULT_MAX_FALL_SECS,
        }
    }
}

impl FallTracker {
    /// Cast a ray of `ray_length` straight down from `origin` and store the result.
    ///
    /// # Arguments
    /// * `state` - ground state to update
    /// * `origin` - actor position
    /// * `physics` - physics query provider
    pub fn check_grounded(&self, state: &mut GroundState, origin: Vec3, physics: &impl Raycast) -> bool {
        let hit = physics.raycast(origin, Vec3::NEG_Y, self.ray_length).is_some();
        state.set_grounded(hit);
        hit
    }

    /// Advance the fall timer by `dt` seconds.
    pub fn tick(&self, state: &mut GroundState, dt: f32) -> FallTick {
        if state.grounded {
            state.airborne_secs = 0.0;
            return FallTick::Grounded;
        }

        state.airborne_secs += dt.max(0.0);
        if !state.crossed && state.airborne_secs >= self.max_fall_secs {
            state.crossed = true;
            return FallTick::ThresholdCrossed;
        }
        FallTick::Airborne
    }
}
