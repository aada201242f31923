//! Spawn module
//!
//! Фабрики гранаты, ящика, NPC, terrain и эффектов.

pub mod factories;


pub use factories::*;
