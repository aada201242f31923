//! Movement компоненты: walk direction персонажа и текущая анимация

use bevy::prelude::*;

/// Character controller (walk + view direction)
///
/// AI пишет сюда направление, physics слой интегрирует в Transform.
/// Отсутствие компонента = entity не умеет ходить (AI тихо пропускает движение).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WalkController {
    /// Скорость ходьбы (не нормализована, units/sec)
    pub walk_direction: Vec3,
    /// Куда смотрит персонаж
    pub view_direction: Vec3,
}

impl WalkController {
    pub fn set_walk_direction(&mut self, direction: Vec3) {
        self.walk_direction = direction;
    }

    pub fn set_view_direction(&mut self, direction: Vec3) {
        self.view_direction = direction;
    }

    pub fn stand_still(&mut self) {
        self.walk_direction = Vec3::ZERO;
    }

    pub fn is_moving(&self) -> bool {
        self.walk_direction != Vec3::ZERO
    }
}

/// Анимационные action'ы NPC модели
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AnimationAction {
    Walk,
    Stand,
}

impl AnimationAction {
    /// Имя клипа в модели
    pub fn clip_name(&self) -> &'static str {
        match self {
            AnimationAction::Walk => "Walk",
            AnimationAction::Stand => "stand",
        }
    }
}

/// Текущий animation action (рендер-слой читает и проигрывает клип)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AnimationState {
    pub current: Option<AnimationAction>,
}

impl AnimationState {
    pub fn play(&mut self, action: AnimationAction) {
        self.current = Some(action);
    }
}
