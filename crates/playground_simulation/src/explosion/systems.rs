//! Explosion systems: применение отложенных взрывов к телам.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ExternalImpulse, RigidBody};

use crate::components::ObjectKind;
use crate::destruction::DestructionController;
use crate::explosion::{ExplosionHit, PendingExplosions};

/// Система: apply pending explosions
///
/// Для каждого взрыва из очереди:
/// 1. Snapshot (entity, position) всех активных тел (без Fixed/Terrain/Grenade)
/// 2. В радиусе R: impulse F(1−t²) в ExternalImpulse (центр масс, без torque)
/// 3. Health-based DestructionController: health −= round(D(1−t²))
///
/// Уничтожение здесь не происходит — evaluate_destruction увидит health < 1
/// позже в этом же тике.
pub fn apply_pending_explosions(
    mut commands: Commands,
    mut pending: ResMut<PendingExplosions>,
    mut hit_events: EventWriter<ExplosionHit>,
    bodies: Query<(Entity, &Transform, &RigidBody, Option<&ObjectKind>)>,
    mut impulses: Query<&mut ExternalImpulse>,
    mut controllers: Query<&mut DestructionController>,
) {
    if pending.is_empty() {
        return;
    }

    // Тела без ExternalImpulse: копим и вставляем один раз в конце,
    // иначе второй взрыв того же тика перезаписал бы первый insert
    let mut missing_impulses: Vec<(Entity, Vec3)> = Vec::new();

    for explosion in pending.take_all() {
        let snapshot: Vec<(Entity, Vec3)> = bodies
            .iter()
            .filter(|(_, _, body, kind)| {
                !matches!(body, RigidBody::Fixed)
                    && !kind.is_some_and(|kind| kind.is_explosion_immune())
            })
            .filter(|(entity, ..)| {
                controllers
                    .get(*entity)
                    .map(|controller| controller.is_active())
                    .unwrap_or(true)
            })
            .map(|(entity, transform, ..)| (entity, transform.translation))
            .collect();

        let mut hits = 0usize;

        for (entity, position) in snapshot {
            let Some(effect) = explosion.effect_at(position) else {
                continue;
            };
            hits += 1;

            if let Ok(mut external) = impulses.get_mut(entity) {
                external.impulse += effect.impulse;
            } else if let Some((_, pending_impulse)) =
                missing_impulses.iter_mut().find(|(e, _)| *e == entity)
            {
                *pending_impulse += effect.impulse;
            } else {
                missing_impulses.push((entity, effect.impulse));
            }

            let mut damage = 0;
            if let Ok(mut controller) = controllers.get_mut(entity) {
                if controller.is_health_based() {
                    damage = effect.damage_points();
                    if let Some(health) = controller.apply_damage(damage) {
                        crate::logger::log(&format!(
                            "💥 {:?} took {} blast damage (t={:.2}, health: {})",
                            entity, damage, effect.normalized_distance, health
                        ));
                    }
                }
            }

            hit_events.write(ExplosionHit {
                origin: explosion.origin,
                target: entity,
                impulse: effect.impulse,
                damage,
            });
        }

        crate::logger::log(&format!(
            "💥 Explosion at {:?} (R={}, F={}, D={}): {} bodies hit",
            explosion.origin,
            explosion.config.radius(),
            explosion.config.force(),
            explosion.config.damage(),
            hits
        ));
    }

    for (entity, impulse) in missing_impulses {
        commands.entity(entity).insert(ExternalImpulse {
            impulse,
            torque_impulse: Vec3::ZERO,
        });
    }
}
