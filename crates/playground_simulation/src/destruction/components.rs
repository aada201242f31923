//! DestructionController — единственный владелец решения об уничтожении entity.

use bevy::prelude::*;
use std::fmt;
use std::time::Duration;

use crate::explosion::PendingExplosions;

/// Стартовое здоровье health-based destructible
pub const INITIAL_HEALTH: i32 = 100;

/// Lifecycle destructible entity
///
/// Active → PendingDestruction (entity отцеплен от мира) → Destroyed (callback отработал)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Lifecycle {
    Active,
    PendingDestruction,
    Destroyed,
}

/// Почему entity уничтожен
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum DestructionCause {
    /// TTL истёк
    Expired,
    /// Health < 1
    Depleted,
}

/// Условие срабатывания
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DestructionTrigger {
    /// Уничтожить когда now >= expires_at
    Timed { expires_at: Duration },
    /// Уничтожить когда health < 1 (raw значение, может быть отрицательным)
    Health { health: i32 },
}

/// Что callback знает об уничтоженном entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DestroyedEntity {
    pub entity: Entity,
    /// Последняя известная позиция. None — у entity не было Transform.
    pub position: Option<Vec3>,
    pub cause: DestructionCause,
    /// SimClock в момент уничтожения
    pub at: Duration,
}

/// One-shot callback уничтожения
///
/// Вызывается синхронно, ровно один раз, уже после detach entity.
/// Через Commands можно спавнить визуал, через PendingExplosions — запросить взрыв
/// (будет применён в следующем тике).
pub type DestructionCallback =
    Box<dyn FnOnce(&DestroyedEntity, &mut Commands, &mut PendingExplosions) + Send + Sync>;

#[derive(Component)]
pub struct DestructionController {
    trigger: DestructionTrigger,
    state: Lifecycle,
    on_destroyed: Option<DestructionCallback>,
}

impl DestructionController {
    /// Timed variant: fires когда с момента `now` прошло `ttl`
    pub fn timed(ttl: Duration, now: Duration) -> Self {
        Self {
            trigger: DestructionTrigger::Timed {
                expires_at: now.saturating_add(ttl),
            },
            state: Lifecycle::Active,
            on_destroyed: None,
        }
    }

    /// Health variant: стартует с INITIAL_HEALTH
    pub fn health_based() -> Self {
        Self {
            trigger: DestructionTrigger::Health {
                health: INITIAL_HEALTH,
            },
            state: Lifecycle::Active,
            on_destroyed: None,
        }
    }

    /// Builder: callback уничтожения (заменяет предыдущий)
    pub fn on_destroyed<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&DestroyedEntity, &mut Commands, &mut PendingExplosions) + Send + Sync + 'static,
    {
        self.on_destroyed = Some(Box::new(callback));
        self
    }

    pub fn trigger(&self) -> DestructionTrigger {
        self.trigger
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == Lifecycle::Active
    }

    pub fn is_health_based(&self) -> bool {
        matches!(self.trigger, DestructionTrigger::Health { .. })
    }

    pub fn expires_at(&self) -> Option<Duration> {
        match self.trigger {
            DestructionTrigger::Timed { expires_at } => Some(expires_at),
            DestructionTrigger::Health { .. } => None,
        }
    }

    /// Raw health (None для timed)
    pub fn health(&self) -> Option<i32> {
        match self.trigger {
            DestructionTrigger::Health { health } => Some(health),
            DestructionTrigger::Timed { .. } => None,
        }
    }

    /// Health для отображения: clamp к >= 0, без мутации
    pub fn display_health(&self) -> Option<i32> {
        self.health().map(|health| health.max(0))
    }

    /// Setter health. Для timed controller — no-op.
    pub fn set_health(&mut self, value: i32) {
        if let DestructionTrigger::Health { health } = &mut self.trigger {
            *health = value;
        }
    }

    /// Вычесть урон (без floor). Возвращает новое raw значение.
    pub fn apply_damage(&mut self, amount: i32) -> Option<i32> {
        if let DestructionTrigger::Health { health } = &mut self.trigger {
            *health = health.saturating_sub(amount);
            Some(*health)
        } else {
            None
        }
    }

    /// Пора ли уничтожать (только для Active)
    pub fn should_fire(&self, now: Duration) -> Option<DestructionCause> {
        if !self.is_active() {
            return None;
        }

        match self.trigger {
            DestructionTrigger::Timed { expires_at } if now >= expires_at => {
                Some(DestructionCause::Expired)
            }
            DestructionTrigger::Health { health } if health < 1 => {
                Some(DestructionCause::Depleted)
            }
            _ => None,
        }
    }

    /// Active → PendingDestruction, забираем callback (второй раз он уже None)
    pub fn begin_destruction(&mut self) -> Option<DestructionCallback> {
        self.state = Lifecycle::PendingDestruction;
        self.on_destroyed.take()
    }

    pub fn mark_destroyed(&mut self) {
        self.state = Lifecycle::Destroyed;
    }
}

impl fmt::Debug for DestructionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestructionController")
            .field("trigger", &self.trigger)
            .field("state", &self.state)
            .field("has_callback", &self.on_destroyed.is_some())
            .finish()
    }
}

/// Событие: entity уничтожен (после callback)
#[derive(Event, Debug, Clone, Copy)]
pub struct EntityDestroyed {
    pub entity: Entity,
    pub position: Option<Vec3>,
    pub cause: DestructionCause,
}
