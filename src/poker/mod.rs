//! Hand evaluation and comparison.

pub mod evaluation;

pub use evaluation::{compare_hands, evaluate, evaluate_hole};
