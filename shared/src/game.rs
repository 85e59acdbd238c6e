//! Stages, actions, events and snapshots: the vocabulary the engine,
//! decision sources and observers exchange.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::HandResult;
use crate::player::{PlayerId, PlayerPublic};

/// The current street of a hand. Transitions are forward-only and each
/// stage is entered at most once per hand.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Stage {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

/// A decision returned by a seat's decision source. `Bet` and `Raise`
/// carry the chips the player wants to *add* with this action; the
/// engine clamps amounts to the stack and the table minimums.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    Bet(u32),
    Raise(u32),
}

/// Types of blinds that can be posted.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlindKind {
    SmallBlind,
    BigBlind,
}

/// What actually happened when an action was applied, with the settled
/// amounts after clamping. This is the log/history-grade record.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionKind {
    Fold,
    Check,
    Call(u32),
    Bet(u32),
    Raise { to: u32, by: u32 },
    PostBlind { kind: BlindKind, amount: u32 },
}

/// Dealer- and table-level events.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum GameAction {
    HandStarted { hand_no: u32, button: PlayerId },
    StageChanged(Stage),
    DealtHole { player_id: PlayerId },
    DealtCommunity { cards: Vec<Card> },
    Showdown { results: Vec<HandResult> },
    PotAwarded { winners: Vec<PlayerId>, amount: u32 },
    HandEnded,
    GameEnded { standings: Vec<(PlayerId, u32)> },
}

/// A single recorded event. The canonical, typed source of truth for
/// observers and logs: `PlayerAction` for seat-initiated actions,
/// `GameAction` for everything the dealer does.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ActionEvent {
    PlayerAction {
        player_id: PlayerId,
        action: ActionKind,
    },
    GameAction(GameAction),
}

impl ActionEvent {
    pub fn player(player_id: PlayerId, action: ActionKind) -> Self {
        ActionEvent::PlayerAction { player_id, action }
    }

    pub fn game(action: GameAction) -> Self {
        ActionEvent::GameAction(action)
    }
}

/// The set of actions the engine will accept from the seat to act,
/// with the amounts it quotes. Fold is always legal.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegalActions {
    /// Nothing is owed; a check is legal.
    pub can_check: bool,
    /// Chips owed to match the current bet (pre-cap; a short stack calls
    /// for less and is all-in).
    pub call: Option<u32>,
    /// Minimum chips for an opening bet, when no bet stands.
    pub bet_min: Option<u32>,
    /// Minimum chips to add for a full raise over the standing bet.
    pub raise_min: Option<u32>,
}

impl LegalActions {
    /// Whether an action of this kind is acceptable right now. Amounts
    /// are not checked here; the engine clamps them on application.
    pub fn allows(&self, action: PlayerAction) -> bool {
        match action {
            PlayerAction::Fold => true,
            PlayerAction::Check => self.can_check,
            PlayerAction::Call => self.call.is_some(),
            PlayerAction::Bet(_) => self.bet_min.is_some(),
            PlayerAction::Raise(_) => self.raise_min.is_some(),
        }
    }
}

/// Read-only view of the table handed to decision sources and observers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub hand_no: u32,
    pub players: Vec<PlayerPublic>,
    pub community: Vec<Card>,
    pub pot: u32,
    pub sb: u32,
    pub bb: u32,
    pub button: PlayerId,
    pub to_act: PlayerId,
    pub stage: Stage,
    pub action_log: Vec<ActionEvent>,
}

impl GameSnapshot {
    /// The seat's own view of its public record, if present.
    pub fn player(&self, id: PlayerId) -> Option<&PlayerPublic> {
        self.players.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legal_actions_gate_by_kind() {
        let open = LegalActions {
            can_check: true,
            call: None,
            bet_min: Some(10),
            raise_min: None,
        };
        assert!(open.allows(PlayerAction::Fold));
        assert!(open.allows(PlayerAction::Check));
        assert!(open.allows(PlayerAction::Bet(25)));
        assert!(!open.allows(PlayerAction::Call));
        assert!(!open.allows(PlayerAction::Raise(30)));

        let facing_bet = LegalActions {
            can_check: false,
            call: Some(40),
            bet_min: None,
            raise_min: Some(80),
        };
        assert!(facing_bet.allows(PlayerAction::Call));
        assert!(facing_bet.allows(PlayerAction::Raise(80)));
        assert!(!facing_bet.allows(PlayerAction::Check));
    }

    #[test]
    fn events_round_trip_through_json() {
        let ev = ActionEvent::player(
            PlayerId(2),
            ActionKind::Raise { to: 60, by: 30 },
        );
        let json = serde_json::to_string(&ev).unwrap();
        let back: ActionEvent = serde_json::from_str(&json).unwrap();
        match back {
            ActionEvent::PlayerAction { player_id, action } => {
                assert_eq!(player_id, PlayerId(2));
                assert_eq!(action, ActionKind::Raise { to: 60, by: 30 });
            }
            _ => panic!("wrong variant"),
        }
    }
}
