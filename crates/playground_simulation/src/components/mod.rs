//! ECS Components, общие для всех lifecycle систем
//!
//! Организация по доменам:
//! - world: тип объекта (ObjectKind)
//! - movement: character controller и анимация (WalkController, AnimationState)
//!
//! Доменные компоненты живут рядом со своими системами:
//! DestructionController в destruction, AgentBehavior в ai, HealthTint в feedback.

pub mod movement;
pub mod world;

pub use movement::*;
pub use world::*;
