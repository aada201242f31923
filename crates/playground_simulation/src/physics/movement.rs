//! Headless движение персонажей
//!
//! Без rapier character controller'а: WalkController.walk_direction
//! интегрируется прямо в Transform на fixed timestep.
//! При подключённом RapierPhysicsPlugin эту систему не регистрируем.

use bevy::prelude::*;

use crate::components::WalkController;

/// Система: position += walk_direction × dt, поворот по view_direction
///
/// dt = fixed timestep (а не delta), чтобы ручной прогон FixedPostUpdate
/// в тестах давал тот же результат, что и реальный цикл.
pub fn integrate_walk_direction(
    mut query: Query<(&WalkController, &mut Transform)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.timestep().as_secs_f32();

    for (controller, mut transform) in query.iter_mut() {
        transform.translation += controller.walk_direction * delta;

        // Смотрим только по горизонтали; нулевой view_direction — не поворачиваем
        let facing = Vec3::new(controller.view_direction.x, 0.0, controller.view_direction.z);
        if facing.length_squared() > 1e-6 {
            transform.look_to(facing, Vec3::Y);
        }
    }
}

/// Plugin headless движения (FixedPostUpdate, после lifecycle систем)
pub struct HeadlessMovementPlugin;

impl Plugin for HeadlessMovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedPostUpdate, integrate_walk_direction);
    }
}
