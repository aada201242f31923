//! Physics module
//!
//! Rapier — внешний коллаборатор (solver, broad-phase). Здесь только
//! headless интеграция ходьбы для прогонов без rapier.

pub mod movement;

pub use movement::{integrate_walk_direction, HeadlessMovementPlugin};
