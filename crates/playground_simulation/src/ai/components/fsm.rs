//! Wander FSM агента: Created → Walking ⇄ Idle.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ConfigError;

/// Dwell time по умолчанию (ms)
pub const DEFAULT_DWELL_MS: u64 = 3000;
/// Скорость ходьбы по умолчанию (units/sec)
pub const DEFAULT_WALKING_SPEED: f32 = 2.0;

/// Состояния агента. Terminal состояния нет.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum AgentState {
    /// Начальное — до первого тика
    #[default]
    Created,
    Walking,
    Idle,
}

/// Тайминги агента
///
/// Поля закрыты: dwell > 0 и walking_speed > 0 гарантируются `new`
/// (и при deserialize), иначе Walking стоял бы с нулевым movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(try_from = "AgentTimingParams", into = "AgentTimingParams")]
pub struct AgentTiming {
    /// Минимум времени в Walking/Idle до перехода
    dwell_ms: u64,
    walking_speed: f32,
}

/// Сырые тайминги (формат конфига), валидируются в AgentTiming
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentTimingParams {
    pub dwell_ms: u64,
    pub walking_speed: f32,
}

impl Default for AgentTiming {
    fn default() -> Self {
        Self {
            dwell_ms: DEFAULT_DWELL_MS,
            walking_speed: DEFAULT_WALKING_SPEED,
        }
    }
}

impl AgentTiming {
    pub fn new(dwell_ms: u64, walking_speed: f32) -> Result<Self, ConfigError> {
        if dwell_ms == 0 {
            return Err(ConfigError::ZeroDwell);
        }
        if !(walking_speed.is_finite() && walking_speed > 0.0) {
            return Err(ConfigError::InvalidWalkingSpeed(walking_speed));
        }

        Ok(Self {
            dwell_ms,
            walking_speed,
        })
    }

    pub fn dwell_ms(&self) -> u64 {
        self.dwell_ms
    }

    pub fn walking_speed(&self) -> f32 {
        self.walking_speed
    }

    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }
}

impl TryFrom<AgentTimingParams> for AgentTiming {
    type Error = ConfigError;

    fn try_from(params: AgentTimingParams) -> Result<Self, Self::Error> {
        Self::new(params.dwell_ms, params.walking_speed)
    }
}

impl From<AgentTiming> for AgentTimingParams {
    fn from(timing: AgentTiming) -> Self {
        Self {
            dwell_ms: timing.dwell_ms,
            walking_speed: timing.walking_speed,
        }
    }
}

/// AgentBehavior — wander FSM компонент
///
/// Инвариант: movement == ZERO только в Idle (и Created).
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AgentBehavior {
    state: AgentState,
    /// Момент входа в текущее состояние. None до первого тика.
    entered_at: Option<Duration>,
    movement: Vec3,
    timing: AgentTiming,
}

impl Default for AgentBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBehavior {
    pub fn new() -> Self {
        Self::with_timing(AgentTiming::default())
    }

    pub fn with_timing(timing: AgentTiming) -> Self {
        Self {
            state: AgentState::Created,
            entered_at: None,
            movement: Vec3::ZERO,
            timing,
        }
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn movement(&self) -> Vec3 {
        self.movement
    }

    pub fn timing(&self) -> AgentTiming {
        self.timing
    }

    pub fn entered_at(&self) -> Option<Duration> {
        self.entered_at
    }

    /// Время в текущем состоянии. None пока агент ни разу не тикал.
    pub fn time_in_state(&self, now: Duration) -> Option<Duration> {
        self.entered_at.map(|entered| now.saturating_sub(entered))
    }

    /// Следующее состояние, если переход разрешён сейчас
    ///
    /// Created переходит безусловно (elapsed не проверяется).
    pub fn next_transition(&self, now: Duration) -> Option<AgentState> {
        match self.state {
            AgentState::Created => Some(AgentState::Walking),
            AgentState::Walking | AgentState::Idle => {
                let elapsed = self.time_in_state(now)?;
                if elapsed < self.timing.dwell() {
                    return None;
                }

                Some(match self.state {
                    AgentState::Walking => AgentState::Idle,
                    _ => AgentState::Walking,
                })
            }
        }
    }

    /// Войти в Walking с заданным движением
    pub fn enter_walking(&mut self, now: Duration, movement: Vec3) {
        self.state = AgentState::Walking;
        self.entered_at = Some(now);
        self.movement = movement;
    }

    pub fn enter_idle(&mut self, now: Duration) {
        self.state = AgentState::Idle;
        self.entered_at = Some(now);
        self.movement = Vec3::ZERO;
    }
}

/// Случайное горизонтальное направление × speed
///
/// x, z ~ U[−1, 1]. Вырожденный sample (почти ноль) перебрасываем,
/// иначе normalize дал бы NaN.
pub fn random_walk_direction<R: Rng + ?Sized>(rng: &mut R, speed: f32) -> Vec3 {
    loop {
        let x: f32 = rng.gen_range(-1.0..=1.0);
        let z: f32 = rng.gen_range(-1.0..=1.0);

        if let Some(direction) = Vec3::new(x, 0.0, z).try_normalize() {
            return direction * speed;
        }
    }
}
