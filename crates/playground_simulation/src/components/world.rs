//! World компоненты: тип объекта в песочнице

use bevy::prelude::*;

/// Тег типа объекта (аналог "object_type" атрибута на entity)
///
/// Сравнивается по значению. Explosion scan пропускает Terrain и Grenade.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum ObjectKind {
    Terrain,
    Grenade,
    Box,
    Npc,
    /// Визуальные эффекты (взрыв, огонь) — без физики
    Effect,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Terrain => "terrain",
            ObjectKind::Grenade => "grenade",
            ObjectKind::Box => "box",
            ObjectKind::Npc => "npc",
            ObjectKind::Effect => "effect",
        }
    }

    /// Объекты, которые взрыв не толкает и не ранит
    pub fn is_explosion_immune(&self) -> bool {
        matches!(self, ObjectKind::Terrain | ObjectKind::Grenade)
    }
}
