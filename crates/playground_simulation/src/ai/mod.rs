//! AI module
//!
//! Простой wander FSM: агент ходит в случайном направлении, стоит, снова ходит.
//! Направления берутся из DeterministicRng (seeded), время — из SimClock.

use bevy::prelude::*;

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::*;

use crate::LifecycleSet;

/// AI Plugin
///
/// agent_behavior_transitions в LifecycleSet::Agents — первым в тике.
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            agent_behavior_transitions.in_set(LifecycleSet::Agents),
        );
    }
}
