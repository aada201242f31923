//! Монотонные часы симуляции
//!
//! Все lifecycle решения (TTL, dwell time агента) считаются от `SimClock`,
//! а не от wall clock. Часы двигаются только вперёд.

use bevy::prelude::*;
use std::time::Duration;

/// Simulation time (elapsed от старта)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimClock {
    now: Duration,
}

impl SimClock {
    pub fn at(now: Duration) -> Self {
        Self { now }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn advance(&mut self, delta: Duration) {
        self.now = self.now.saturating_add(delta);
    }

    /// Переставить часы вперёд на `now`. Назад не ходим.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

/// Система: продвигает SimClock на fixed timestep
///
/// Работает в FixedPreUpdate, до lifecycle систем.
pub fn advance_sim_clock(mut clock: ResMut<SimClock>, time: Res<Time<Fixed>>) {
    clock.advance(time.delta());
}
