//! Destruction module
//!
//! Timed и health-based уничтожение entity с one-shot callback.
//! Это единственное место, где destructible переходит в Destroyed.

use bevy::prelude::*;

pub mod components;
pub mod systems;

#[cfg(test)]
mod components_tests;
#[cfg(test)]
mod systems_tests;

pub use components::*;
pub use systems::*;

use crate::LifecycleSet;

/// Destruction Plugin
///
/// evaluate_destruction в LifecycleSet::Destruction (после взрывов, до feedback).
pub struct DestructionPlugin;

impl Plugin for DestructionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EntityDestroyed>().add_systems(
            FixedUpdate,
            evaluate_destruction.in_set(LifecycleSet::Destruction),
        );
    }
}
