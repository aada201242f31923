//! Quadratic falloff взрыва
//!
//! Формула (t = distance / R):
//! - weight = 1 − t²  для distance < R
//! - weight = 0       для distance >= R
//!
//! Impulse = F × weight, damage = D × weight. Оба от одного t,
//! поэтому damage/D == impulse/F для любого target.

use bevy::prelude::*;

/// Вес falloff в [0, 1]
pub fn falloff_weight(distance: f32, radius: f32) -> f32 {
    if distance.is_nan() || distance >= radius {
        return 0.0;
    }

    let t = distance / radius;
    1.0 - t * t
}

pub fn impulse_magnitude(distance: f32, radius: f32, force: f32) -> f32 {
    force * falloff_weight(distance, radius)
}

pub fn damage_amount(distance: f32, radius: f32, damage: f32) -> f32 {
    damage * falloff_weight(distance, radius)
}

/// Направление толчка от центра взрыва
///
/// distance == 0 → нормализация не определена, толкаем вверх (world up).
pub fn impulse_direction(diff: Vec3) -> Vec3 {
    diff.try_normalize().unwrap_or(Vec3::Y)
}
