//! Фабрики объектов песочницы
//!
//! Каждая фабрика собирает bundle (rapier body + lifecycle компоненты)
//! и возвращает Entity корня. Рендер/ассеты навешиваются снаружи по Name/ObjectKind.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use std::time::Duration;

use crate::ai::AgentBehavior;
use crate::components::{AnimationState, ObjectKind, WalkController};
use crate::config::SimulationConfig;
use crate::destruction::{DestroyedEntity, DestructionController};
use crate::explosion::{Explosion, ExplosionConfig, PendingExplosions};
use crate::feedback::HealthTint;

pub const GRENADE_RADIUS: f32 = 0.5;
pub const BOX_HALF_EXTENT: f32 = 1.0;
pub const NPC_RADIUS: f32 = 0.5;
pub const NPC_HEIGHT: f32 = 2.0;
pub const NPC_MASS: f32 = 50.0;

/// Имя дочернего узла модели NPC (на нём AnimationState)
pub const NPC_MODEL_NAME: &str = "npcModel";
/// Имя дочерней геометрии ящика (на ней HealthTint)
pub const BOX_GEOMETRY_NAME: &str = "BoxGeometry";

/// Визуальный эффект без физики (частицы рисует рендер-слой)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ParticleEffect {
    Explosion,
    Fire,
}

/// Callback "взорваться при уничтожении": визуал + запрос взрыва в последней позиции
///
/// Позиция неизвестна (нет Transform) → ничего не взрываем.
pub fn explode_on_destroy(
    explosion: ExplosionConfig,
    visual_ttl: Duration,
) -> impl FnOnce(&DestroyedEntity, &mut Commands, &mut PendingExplosions) + Send + Sync + 'static {
    move |destroyed: &DestroyedEntity, commands: &mut Commands, explosions: &mut PendingExplosions| {
        let Some(position) = destroyed.position else {
            crate::logger::log_warning(&format!(
                "⚠️ {:?} destroyed without position, explosion skipped",
                destroyed.entity
            ));
            return;
        };

        crate::logger::log(&format!("💥 BOOM! {:?} at {:?}", destroyed.entity, position));

        spawn_explosion_visual(commands, position, destroyed.at, visual_ttl);
        explosions.push(Explosion::new(position, explosion));
    }
}

/// Terrain: статичное тело, иммунно к взрывам
///
/// Heightmap генерирует внешний слой; здесь плоская плита.
pub fn spawn_terrain(commands: &mut Commands, half_extent: f32) -> Entity {
    commands
        .spawn((
            Name::new("Terrain"),
            ObjectKind::Terrain,
            Transform::default(),
            RigidBody::Fixed,
            Collider::cuboid(half_extent, 0.1, half_extent),
        ))
        .id()
}

/// Граната: брошенный шар, взрывается через grenade_ttl
pub fn spawn_grenade(
    commands: &mut Commands,
    config: &SimulationConfig,
    now: Duration,
    position: Vec3,
    direction: Vec3,
) -> Entity {
    let controller = DestructionController::timed(config.grenade_ttl(), now).on_destroyed(
        explode_on_destroy(config.grenade_explosion, config.explosion_visual_ttl()),
    );

    commands
        .spawn((
            Name::new("Grenade"),
            ObjectKind::Grenade,
            Transform::from_translation(position),
            RigidBody::Dynamic,
            Collider::ball(GRENADE_RADIUS),
            AdditionalMassProperties::Mass(config.grenade_mass),
            Velocity::linear(direction.normalize_or_zero() * config.grenade_throw_speed),
            ExternalImpulse::default(),
            controller,
        ))
        .id()
}

/// Ящик: health-based, взрывается при health < 1
///
/// Дети: геометрия с HealthTint и огонь.
pub fn spawn_box(commands: &mut Commands, config: &SimulationConfig, position: Vec3) -> Entity {
    let controller = DestructionController::health_based().on_destroyed(explode_on_destroy(
        config.box_explosion,
        config.explosion_visual_ttl(),
    ));

    commands
        .spawn((
            Name::new("BoxNode"),
            ObjectKind::Box,
            Transform::from_translation(position),
            RigidBody::Dynamic,
            Collider::cuboid(BOX_HALF_EXTENT, BOX_HALF_EXTENT, BOX_HALF_EXTENT),
            AdditionalMassProperties::Mass(config.box_mass),
            ExternalImpulse::default(),
            controller,
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new(BOX_GEOMETRY_NAME),
                Transform::default(),
                HealthTint::default(),
            ));
            parent.spawn((
                Name::new("Fire"),
                ObjectKind::Effect,
                ParticleEffect::Fire,
                Transform::default(),
            ));
        })
        .id()
}

/// NPC: kinematic капсула с wander FSM, модель — дочерний "npcModel"
pub fn spawn_npc(commands: &mut Commands, config: &SimulationConfig, position: Vec3) -> Entity {
    commands
        .spawn((
            Name::new("npcNode"),
            ObjectKind::Npc,
            Transform::from_translation(position),
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(NPC_HEIGHT * 0.5 - NPC_RADIUS, NPC_RADIUS),
            AdditionalMassProperties::Mass(NPC_MASS),
            WalkController::default(),
            AgentBehavior::with_timing(config.agent),
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new(NPC_MODEL_NAME),
                Transform::from_xyz(0.0, 1.1, 0.0).with_scale(Vec3::splat(0.25)),
                AnimationState::default(),
            ));
        })
        .id()
}

/// Визуал взрыва: живёт ttl, затем тихо исчезает
pub fn spawn_explosion_visual(
    commands: &mut Commands,
    position: Vec3,
    now: Duration,
    ttl: Duration,
) -> Entity {
    commands
        .spawn((
            Name::new("Explosion"),
            ObjectKind::Effect,
            ParticleEffect::Explosion,
            Transform::from_translation(position),
            DestructionController::timed(ttl, now).on_destroyed(|_, _, _| {}),
        ))
        .id()
}

/// Огонь: эффект без lifecycle
pub fn spawn_fire(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((
            Name::new("Fire"),
            ObjectKind::Effect,
            ParticleEffect::Fire,
            Transform::from_translation(position),
        ))
        .id()
}
