//! Explosion data: конфиг, запрос взрыва, очередь, hit event.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{non_negative, ConfigError};
use crate::explosion::falloff::{falloff_weight, impulse_direction};

/// Параметры взрыва: cutoff radius R, peak impulse F, peak damage D
///
/// Поля закрыты: любой ExplosionConfig прошёл `new` (в том числе при deserialize),
/// поэтому effect_at не видит NaN радиус или отрицательный урон.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExplosionParams", into = "ExplosionParams")]
pub struct ExplosionConfig {
    radius: f32,
    force: f32,
    damage: f32,
}

/// Сырые параметры взрыва (формат конфига), валидируются в ExplosionConfig
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionParams {
    pub radius: f32,
    pub force: f32,
    pub damage: f32,
}

impl ExplosionConfig {
    /// Граната: R=40, F=2500, D=40
    pub const GRENADE: Self = Self {
        radius: 40.0,
        force: 2500.0,
        damage: 40.0,
    };

    pub fn new(radius: f32, force: f32, damage: f32) -> Result<Self, ConfigError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidRadius(radius));
        }

        Ok(Self {
            radius,
            force: non_negative("explosion force", force)?,
            damage: non_negative("explosion damage", damage)?,
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn force(&self) -> f32 {
        self.force
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self::GRENADE
    }
}

impl TryFrom<ExplosionParams> for ExplosionConfig {
    type Error = ConfigError;

    fn try_from(params: ExplosionParams) -> Result<Self, Self::Error> {
        Self::new(params.radius, params.force, params.damage)
    }
}

impl From<ExplosionConfig> for ExplosionParams {
    fn from(config: ExplosionConfig) -> Self {
        Self {
            radius: config.radius,
            force: config.force,
            damage: config.damage,
        }
    }
}

/// Результат взрыва для одной точки
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlastEffect {
    /// Impulse vector (direction × magnitude)
    pub impulse: Vec3,
    /// Урон до округления
    pub damage: f32,
    /// Normalized distance t = distance / R
    pub normalized_distance: f32,
}

impl BlastEffect {
    /// Урон в целых HP (round)
    pub fn damage_points(&self) -> i32 {
        self.damage.round() as i32
    }
}

/// Запрос взрыва (transient, живёт один тик)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub origin: Vec3,
    pub config: ExplosionConfig,
}

impl Explosion {
    pub fn new(origin: Vec3, config: ExplosionConfig) -> Self {
        Self { origin, config }
    }

    /// Эффект на тело в `position`. None — вне радиуса.
    pub fn effect_at(&self, position: Vec3) -> Option<BlastEffect> {
        let diff = position - self.origin;
        let distance = diff.length();

        if distance.is_nan() || distance >= self.config.radius {
            return None;
        }

        let weight = falloff_weight(distance, self.config.radius);

        Some(BlastEffect {
            impulse: impulse_direction(diff) * (self.config.force * weight),
            damage: self.config.damage * weight,
            normalized_distance: distance / self.config.radius,
        })
    }
}

/// Очередь взрывов, запрошенных с прошлого прохода
///
/// Пишут: destruction callbacks, вызывающий код.
/// Читает: apply_pending_explosions (LifecycleSet::Explosions), drain целиком.
#[derive(Resource, Debug, Default)]
pub struct PendingExplosions {
    queue: Vec<Explosion>,
}

impl PendingExplosions {
    pub fn push(&mut self, explosion: Explosion) {
        self.queue.push(explosion);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Explosion> {
        self.queue.iter()
    }

    pub fn take_all(&mut self) -> Vec<Explosion> {
        std::mem::take(&mut self.queue)
    }
}

/// Событие: взрыв задел тело
#[derive(Event, Debug, Clone, Copy)]
pub struct ExplosionHit {
    pub origin: Vec3,
    pub target: Entity,
    pub impulse: Vec3,
    /// Применённый урон (0 если у target нет health)
    pub damage: i32,
}
