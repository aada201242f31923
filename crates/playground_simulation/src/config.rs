//! Конфигурация симуляции и ошибки конфигурации
//!
//! Некорректные параметры (отрицательный радиус, NaN сила) — баг вызывающего кода,
//! поэтому падаем сразу при конструировании, а не во время тика.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::ai::AgentTiming;
use crate::explosion::ExplosionConfig;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("explosion radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("{field} must be non-negative and finite, got {value}")]
    InvalidMagnitude { field: &'static str, value: f32 },

    #[error("tick rate must be positive and finite, got {0}")]
    InvalidTickRate(f64),

    #[error("agent dwell time must be greater than zero")]
    ZeroDwell,

    #[error("agent walking speed must be positive and finite, got {0}")]
    InvalidWalkingSpeed(f32),
}

/// Проверка скаляра: конечный и >= 0
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidMagnitude { field, value })
    }
}

/// Параметры песочницы (seed, тайминги, взрывы)
///
/// Дефолты совпадают с исходной песочницей: граната 2000ms, взрыв R=40 F=2500 D=40.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub seed: u64,
    /// Частота fixed timestep (Hz)
    pub tick_hz: f64,
    pub grenade_ttl_ms: u64,
    pub explosion_visual_ttl_ms: u64,
    pub grenade_explosion: ExplosionConfig,
    pub box_explosion: ExplosionConfig,
    pub agent: AgentTiming,
    pub grenade_throw_speed: f32,
    pub grenade_mass: f32,
    pub box_mass: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_hz: 60.0,
            grenade_ttl_ms: 2000,
            explosion_visual_ttl_ms: 500,
            grenade_explosion: ExplosionConfig::GRENADE,
            box_explosion: ExplosionConfig::GRENADE,
            agent: AgentTiming::default(),
            grenade_throw_speed: 40.0,
            grenade_mass: 5.0,
            box_mass: 100.0,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_hz.is_finite() && self.tick_hz > 0.0) {
            return Err(ConfigError::InvalidTickRate(self.tick_hz));
        }

        // ExplosionConfig и AgentTiming валидны по построению (new / deserialize)
        non_negative("grenade_throw_speed", self.grenade_throw_speed)?;
        non_negative("grenade_mass", self.grenade_mass)?;
        non_negative("box_mass", self.box_mass)?;

        Ok(())
    }

    pub fn grenade_ttl(&self) -> Duration {
        Duration::from_millis(self.grenade_ttl_ms)
    }

    pub fn explosion_visual_ttl(&self) -> Duration {
        Duration::from_millis(self.explosion_visual_ttl_ms)
    }
}
