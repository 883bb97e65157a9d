//! Level countdown timer.
//!
//! Inserted as a resource only when enabled in settings; systems that read it
//! take `Option<Res<Countdown>>` and skip when it is missing.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    #[must_use]
    pub fn from_seconds(secs: f32) -> Self {
        let secs = secs.max(0.0);
        Self { remaining: secs }
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// `M:SS`, rounded up so the display only shows 0:00 once expired.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn display(&self) -> String {
        let secs = self.remaining.ceil() as u32;
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}
