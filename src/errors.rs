//! Engine error taxonomy.

use thiserror::Error;

/// Errors surfaced by the deck and game state.
///
/// `EmptyDeck` should never fire under correct street bookkeeping and is
/// treated as an invariant violation when it does. `IllegalAction` is
/// recovered locally by the table driver (clamp or fall back to the
/// safest legal action) and never escapes a full hand. `Uninitialized`
/// is fatal and surfaced to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("cannot deal {requested} card(s), only {remaining} remain in the deck")]
    EmptyDeck { requested: usize, remaining: usize },

    #[error("illegal action: {reason}")]
    IllegalAction { reason: String },

    #[error("table not set up: no active game state")]
    Uninitialized,
}

impl EngineError {
    pub(crate) fn illegal(reason: impl Into<String>) -> Self {
        EngineError::IllegalAction {
            reason: reason.into(),
        }
    }
}
