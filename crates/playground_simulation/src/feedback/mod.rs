//! Health visual feedback
//!
//! Read-only: health → цвет renderable. Никогда не пишет в health.

use bevy::color::LinearRgba;
use bevy::prelude::*;

use crate::destruction::DestructionController;
use crate::LifecycleSet;

/// Цвет renderable по здоровью (рендер-слой копирует в материал)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HealthTint {
    pub color: LinearRgba,
}

impl Default for HealthTint {
    fn default() -> Self {
        Self {
            color: LinearRgba::WHITE,
        }
    }
}

/// danger = (100 − h)/100, safety = h/100, h = max(health, 0); каналы в [0, 1]
pub fn health_color(health: i32) -> LinearRgba {
    let clamped = health.max(0) as f32;
    let danger = ((100.0 - clamped) / 100.0).clamp(0.0, 1.0);
    let safety = (clamped / 100.0).clamp(0.0, 1.0);

    LinearRgba::new(danger, safety, 0.0, 1.0)
}

/// Система: обновить HealthTint
///
/// Health-based DestructionController ищется на самом entity, затем на прямом parent.
/// Не нашли → no-op.
pub fn update_health_tint(
    mut tints: Query<(Entity, &mut HealthTint, Option<&ChildOf>)>,
    controllers: Query<&DestructionController>,
) {
    for (entity, mut tint, child_of) in tints.iter_mut() {
        let health = std::iter::once(entity)
            .chain(child_of.map(|c| c.parent()))
            .filter_map(|candidate| controllers.get(candidate).ok())
            .find_map(|controller| controller.health());

        let Some(health) = health else {
            continue;
        };

        let color = health_color(health);
        if tint.color != color {
            tint.color = color;
        }
    }
}

/// Feedback Plugin — последний шаг тика
pub struct FeedbackPlugin;

impl Plugin for FeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            update_health_tint.in_set(LifecycleSet::Feedback),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_headless_app;

    fn channels_in_range(color: LinearRgba) -> bool {
        [color.red, color.green, color.blue, color.alpha]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    #[test]
    fn test_full_health_is_green() {
        assert_eq!(health_color(100), LinearRgba::new(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_zero_health_is_red() {
        assert_eq!(health_color(0), LinearRgba::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_half_health() {
        assert_eq!(health_color(70), LinearRgba::new(0.3, 0.7, 0.0, 1.0));
    }

    #[test]
    fn test_channels_clamped_for_any_health() {
        for health in [-1000, -50, -1, 0, 1, 50, 99, 100, 101, 250, i32::MIN, i32::MAX] {
            let color = health_color(health);
            assert!(channels_in_range(color), "health {} → {:?}", health, color);
        }
        assert_eq!(health_color(-30), health_color(0));
    }

    #[test]
    fn test_tint_reads_parent_health() {
        let mut app = create_headless_app(42);

        let mut controller = DestructionController::health_based();
        controller.set_health(70);
        let parent = app.world_mut().spawn((Transform::default(), controller)).id();
        let geometry = app
            .world_mut()
            .spawn((HealthTint::default(), ChildOf(parent)))
            .id();

        app.world_mut().run_schedule(FixedUpdate);

        let tint = app.world().get::<HealthTint>(geometry).copied().unwrap_or_default();
        assert_eq!(tint.color, LinearRgba::new(0.3, 0.7, 0.0, 1.0));

        // Feedback не трогает health
        let health = app
            .world()
            .get::<DestructionController>(parent)
            .and_then(|c| c.health());
        assert_eq!(health, Some(70));
    }

    #[test]
    fn test_tint_prefers_self_over_parent() {
        let mut app = create_headless_app(42);

        let mut parent_controller = DestructionController::health_based();
        parent_controller.set_health(10);
        let parent = app.world_mut().spawn(parent_controller).id();

        let child = app
            .world_mut()
            .spawn((HealthTint::default(), DestructionController::health_based(), ChildOf(parent)))
            .id();

        app.world_mut().run_schedule(FixedUpdate);

        let tint = app.world().get::<HealthTint>(child).copied().unwrap_or_default();
        assert_eq!(tint.color, health_color(100));
    }

    #[test]
    fn test_tint_without_health_is_noop() {
        let mut app = create_headless_app(42);

        let parent = app
            .world_mut()
            .spawn(DestructionController::timed(std::time::Duration::from_secs(60), std::time::Duration::ZERO))
            .id();
        let orphan = app.world_mut().spawn(HealthTint::default()).id();
        let child = app
            .world_mut()
            .spawn((HealthTint::default(), ChildOf(parent)))
            .id();

        app.world_mut().run_schedule(FixedUpdate);

        assert_eq!(app.world().get::<HealthTint>(orphan).copied(), Some(HealthTint::default()));
        assert_eq!(app.world().get::<HealthTint>(child).copied(), Some(HealthTint::default()));
    }
}
