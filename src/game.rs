//! Game state and the betting-round engine.

pub mod betting;
pub mod dealing;
pub mod engine;
pub mod flow;
pub mod showdown;

pub use engine::{Game, Player};
