//! Explosion module
//!
//! Взрыв — одноразовый расчёт в точке: impulse + damage с quadratic falloff
//! по snapshot'у тел. Запросы копятся в PendingExplosions и применяются
//! в LifecycleSet::Explosions.

use bevy::prelude::*;

pub mod components;
pub mod falloff;
pub mod systems;


pub use components::*;
pub use falloff::*;
pub use systems::*;

use crate::LifecycleSet;

/// Explosion Plugin
pub struct ExplosionPlugin;

impl Plugin for ExplosionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingExplosions>()
            .add_event::<ExplosionHit>()
            .add_systems(
                FixedUpdate,
                apply_pending_explosions.in_set(LifecycleSet::Explosions),
            );
    }
}
