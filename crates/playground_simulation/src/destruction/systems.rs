//! Destruction systems: проверка trigger'ов и fire().

use bevy::prelude::*;

use crate::clock::SimClock;
use crate::destruction::{DestroyedEntity, DestructionController, EntityDestroyed};
use crate::explosion::PendingExplosions;

/// Система: evaluate DestructionController triggers
///
/// fire():
/// 1. Active → PendingDestruction
/// 2. despawn entity (+ children) — detach до callback
/// 3. callback(last position, если есть Transform) — ровно один раз
/// 4. → Destroyed, EntityDestroyed event
///
/// Despawn идёт через Commands и применяется на границе LifecycleSet,
/// поэтому следующий explosion scan этот entity уже не увидит.
pub fn evaluate_destruction(
    mut commands: Commands,
    clock: Res<SimClock>,
    mut explosions: ResMut<PendingExplosions>,
    mut destroyed_events: EventWriter<EntityDestroyed>,
    mut query: Query<(Entity, &mut DestructionController, Option<&Transform>)>,
) {
    let now = clock.now();

    for (entity, mut controller, transform) in query.iter_mut() {
        let Some(cause) = controller.should_fire(now) else {
            continue;
        };

        // Без Transform позиции нет: callback решает сам, что делать (не подставляем origin)
        let position = transform.map(|t| t.translation);
        if position.is_none() {
            crate::logger::log_warning(&format!(
                "⚠️ Destructible {:?} has no Transform, last position unknown",
                entity
            ));
        }
        let callback = controller.begin_destruction();

        commands.entity(entity).despawn();

        let destroyed = DestroyedEntity {
            entity,
            position,
            cause,
            at: now,
        };

        if let Some(callback) = callback {
            callback(&destroyed, &mut commands, &mut *explosions);
        }

        controller.mark_destroyed();

        crate::logger::log(&format!(
            "⚰️ Destroyed {:?} at {:?} ({:?}, t={}ms)",
            entity,
            position,
            cause,
            now.as_millis()
        ));

        destroyed_events.write(EntityDestroyed {
            entity,
            position,
            cause,
        });
    }
}
