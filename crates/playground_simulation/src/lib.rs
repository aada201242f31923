//! Playground Simulation Core
//!
//! Reactive entity-lifecycle слой 3D песочницы на Bevy 0.16:
//! - destruction: timed / health-based уничтожение + one-shot callback
//! - explosion: impulse + damage с quadratic falloff
//! - ai: wander FSM (Created → Walking ⇄ Idle)
//! - feedback: health → цвет
//!
//! Rapier step и рендер — внешние коллабораторы: мы пишем ExternalImpulse,
//! HealthTint, AnimationState и читаем Transform.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod clock;
pub mod components;
pub mod config;
pub mod destruction;
pub mod explosion;
pub mod feedback;
pub mod logger;
pub mod physics;
pub mod spawn;

// Re-export для удобства
pub use ai::{AIPlugin, AgentBehavior, AgentState, AgentTiming, AgentTimingParams};
pub use clock::SimClock;
pub use components::{AnimationAction, AnimationState, ObjectKind, WalkController};
pub use config::{ConfigError, SimulationConfig};
pub use destruction::{
    DestroyedEntity, DestructionCallback, DestructionCause, DestructionController, DestructionPlugin,
    EntityDestroyed, Lifecycle,
};
pub use explosion::{Explosion, ExplosionConfig, ExplosionHit, ExplosionParams, ExplosionPlugin, PendingExplosions};
pub use feedback::{health_color, FeedbackPlugin, HealthTint};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter,
};
pub use physics::HeadlessMovementPlugin;

/// Порядок шагов внутри одного тика (FixedUpdate)
///
/// Agents → Explosions → Destruction → Feedback. Взрыв, поставленный
/// callback'ом на шаге Destruction, применяется на шаге Explosions следующего тика.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleSet {
    Agents,
    Explosions,
    Destruction,
    Feedback,
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    config: SimulationConfig,
}

impl SimulationPlugin {
    pub fn new(seed: u64) -> Self {
        Self {
            config: SimulationConfig {
                seed,
                ..SimulationConfig::default()
            },
        }
    }

    /// Plugin с произвольным конфигом (валидируется сразу)
    pub fn with_config(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep (60Hz по умолчанию)
            .insert_resource(Time::<Fixed>::from_hz(self.config.tick_hz))
            // Детерминистичный RNG (seed из конфига)
            .insert_resource(DeterministicRng::new(self.config.seed))
            .insert_resource(self.config.clone())
            .init_resource::<SimClock>()
            .configure_sets(
                FixedUpdate,
                (
                    LifecycleSet::Agents,
                    LifecycleSet::Explosions,
                    LifecycleSet::Destruction,
                    LifecycleSet::Feedback,
                )
                    .chain(),
            )
            .add_systems(FixedPreUpdate, clock::advance_sim_clock)
            // Подсистемы
            .add_plugins((
                AIPlugin,
                ExplosionPlugin,
                DestructionPlugin,
                FeedbackPlugin,
                HeadlessMovementPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin::new(seed));

    app
}

/// Headless App с произвольным конфигом
pub fn create_headless_app_with_config(config: SimulationConfig) -> Result<App, ConfigError> {
    let plugin = SimulationPlugin::with_config(config)?;

    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins).add_plugins(plugin);

    Ok(app)
}

/// Один детерминированный тик без wall clock
///
/// SimClock += fixed timestep, затем FixedUpdate (4 шага lifecycle)
/// и FixedPostUpdate (headless движение).
pub fn step_simulation(world: &mut World) {
    let step = world
        .get_resource::<Time<Fixed>>()
        .map(|time| time.timestep())
        .unwrap_or_default();

    if let Some(mut clock) = world.get_resource_mut::<SimClock>() {
        clock.advance(step);
    }

    // Расписания без систем не создаются — пропускаем молча
    let _ = world.try_run_schedule(FixedUpdate);
    let _ = world.try_run_schedule(FixedPostUpdate);
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Debug-представление компонента как байты
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
