//! AI systems

pub mod fsm;


pub use fsm::*;
