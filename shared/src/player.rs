//! Player identifiers and the public per-seat view.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::ActionKind;

/// Unique identifier for a seat at the table.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PlayerId(pub usize);

impl From<usize> for PlayerId {
    fn from(v: usize) -> Self {
        PlayerId(v)
    }
}

impl From<PlayerId> for usize {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the table exposes about one seat in a snapshot. Hole cards are
/// `None` until dealt; whether other seats' cards are included is the
/// snapshot producer's call (broadcast mode shows everything).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerPublic {
    pub id: PlayerId,
    pub name: String,
    pub stack: u32,
    pub cards: Option<[Card; 2]>,
    pub bet_this_round: u32,
    pub has_folded: bool,
    pub all_in: bool,
    pub last_action: Option<ActionKind>,
}
