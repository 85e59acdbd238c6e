//! Decision sources: the pluggable strategies behind each seat.
//!
//! The engine hands a decision source a redacted [`GameSnapshot`] plus
//! the [`LegalActions`] it will accept, and gets back a typed
//! [`PlayerAction`]. The table driver validates the choice and recovers
//! from failures with [`fallback_action`], so a misbehaving source can
//! never corrupt the game state.

use anyhow::{anyhow, Result};
use holdem_shared::{Card, GameSnapshot, HandCategory, LegalActions, PlayerAction, PlayerId};
use rand::Rng;

use crate::poker::evaluate_hole;

/// A seat's brain. Implementations may be slow or fallible (a remote
/// model, a human prompt); the driver treats any error as "no answer"
/// and falls back.
pub trait DecisionSource {
    fn decide(
        &mut self,
        view: &GameSnapshot,
        seat: PlayerId,
        legal: &LegalActions,
    ) -> Result<PlayerAction>;
}

/// Safest legal action when a decision source fails or misbehaves:
/// check if legal, else call the minimum, else fold.
pub fn fallback_action(legal: &LegalActions) -> PlayerAction {
    if legal.can_check {
        PlayerAction::Check
    } else if legal.call.is_some() {
        PlayerAction::Call
    } else {
        PlayerAction::Fold
    }
}

/// What a strategy needs to know about its own situation.
struct SeatView {
    stack: u32,
    hole: [Card; 2],
    owed: u32,
    bb: u32,
}

fn seat_view(view: &GameSnapshot, seat: PlayerId, legal: &LegalActions) -> Result<SeatView> {
    let me = view
        .player(seat)
        .ok_or_else(|| anyhow!("seat {} missing from snapshot", seat))?;
    let hole = me
        .cards
        .ok_or_else(|| anyhow!("snapshot carries no hole cards for seat {}", seat))?;
    Ok(SeatView {
        stack: me.stack,
        hole,
        owed: legal.call.unwrap_or(0),
        bb: view.bb,
    })
}

fn hole_values(hole: &[Card; 2]) -> (u8, u8) {
    let a = hole[0].rank.value();
    let b = hole[1].rank.value();
    (a.max(b), a.min(b))
}

/// Postflop strength: the evaluator's category mapped onto 0..1 via a
/// per-strategy table.
fn postflop_strength(hole: [Card; 2], community: &[Card], table: &[f64; 10]) -> f64 {
    let value = evaluate_hole(hole, community);
    let idx = match value.category {
        HandCategory::HighCard => 0,
        HandCategory::OnePair => 1,
        HandCategory::TwoPair => 2,
        HandCategory::ThreeOfAKind => 3,
        HandCategory::Straight => 4,
        HandCategory::Flush => 5,
        HandCategory::FullHouse => 6,
        HandCategory::FourOfAKind => 7,
        HandCategory::StraightFlush => 8,
        HandCategory::RoyalFlush => 9,
    };
    table[idx]
}

/// A seat that picks uniformly among whatever is legal, with random
/// sizes. Useful as an opponent baseline and for soak-testing the
/// engine.
#[derive(Debug, Clone, Default)]
pub struct RandomBot;

impl DecisionSource for RandomBot {
    fn decide(
        &mut self,
        view: &GameSnapshot,
        seat: PlayerId,
        legal: &LegalActions,
    ) -> Result<PlayerAction> {
        let sv = seat_view(view, seat, legal)?;
        let mut rng = rand::rng();

        let mut choices = vec![PlayerAction::Fold];
        if legal.can_check {
            choices.push(PlayerAction::Check);
        }
        if legal.call.is_some() && sv.stack >= sv.owed {
            choices.push(PlayerAction::Call);
        }
        if let Some(min) = legal.bet_min {
            choices.push(PlayerAction::Bet(rng.random_range(min..=sv.stack)));
        }
        if let Some(min) = legal.raise_min {
            choices.push(PlayerAction::Raise(rng.random_range(min..=sv.stack)));
        }
        Ok(choices[rng.random_range(0..choices.len())])
    }
}

/// Plays only strong hands: folds weak ones, calls small bets with
/// medium strength, bets and raises the top of its range.
#[derive(Debug, Clone, Default)]
pub struct ConservativeBot;

impl ConservativeBot {
    fn strength(hole: [Card; 2], community: &[Card]) -> f64 {
        if community.is_empty() {
            let (high, low) = hole_values(&hole);
            if high == low {
                return 0.5 + 0.4 * f64::from(high - 2) / 12.0;
            }
            let suited = hole[0].suit == hole[1].suit;
            let connected = high - low == 1;
            let mut strength = 0.1 + 0.3 * f64::from(high - 2) / 12.0;
            if suited {
                strength += 0.1;
            }
            if connected {
                strength += 0.1;
            }
            return strength.min(0.5);
        }
        postflop_strength(
            hole,
            community,
            &[0.1, 0.2, 0.4, 0.6, 0.7, 0.8, 0.9, 0.95, 0.98, 1.0],
        )
    }
}

impl DecisionSource for ConservativeBot {
    fn decide(
        &mut self,
        view: &GameSnapshot,
        seat: PlayerId,
        legal: &LegalActions,
    ) -> Result<PlayerAction> {
        let sv = seat_view(view, seat, legal)?;
        let strength = Self::strength(sv.hole, &view.community);

        if strength < 0.3 {
            return Ok(if legal.can_check {
                PlayerAction::Check
            } else {
                PlayerAction::Fold
            });
        }
        if strength < 0.6 {
            return Ok(if legal.can_check {
                PlayerAction::Check
            } else if sv.owed <= sv.bb * 2 {
                PlayerAction::Call
            } else {
                PlayerAction::Fold
            });
        }
        if legal.bet_min.is_some() {
            return Ok(PlayerAction::Bet((sv.bb * 2).min(sv.stack)));
        }
        if strength > 0.8 && sv.stack > sv.owed * 2 && legal.raise_min.is_some() {
            return Ok(PlayerAction::Raise((sv.owed * 2).min(sv.stack)));
        }
        Ok(fallback_action(legal))
    }
}

/// Bets and raises often, with a random bluff boost on top of its hand
/// strength.
#[derive(Debug, Clone, Default)]
pub struct AggressiveBot;

impl AggressiveBot {
    fn strength(hole: [Card; 2], community: &[Card]) -> f64 {
        if community.is_empty() {
            let (high, low) = hole_values(&hole);
            if high == low {
                return 0.6 + 0.35 * f64::from(high - 2) / 12.0;
            }
            let suited = hole[0].suit == hole[1].suit;
            let connected = high - low == 1;
            let mut strength = 0.2 + 0.4 * f64::from(high - 2) / 12.0;
            if suited {
                strength += 0.15;
            }
            if connected {
                strength += 0.15;
            }
            return strength.min(0.6);
        }
        postflop_strength(
            hole,
            community,
            &[0.2, 0.4, 0.6, 0.7, 0.8, 0.85, 0.9, 0.95, 0.98, 1.0],
        )
    }
}

impl DecisionSource for AggressiveBot {
    fn decide(
        &mut self,
        view: &GameSnapshot,
        seat: PlayerId,
        legal: &LegalActions,
    ) -> Result<PlayerAction> {
        let sv = seat_view(view, seat, legal)?;
        let bluff: f64 = rand::random::<f64>() * 0.3;
        let strength = (Self::strength(sv.hole, &view.community) + bluff).min(1.0);

        if strength < 0.2 {
            if legal.can_check {
                return Ok(PlayerAction::Check);
            }
            // the occasional bluff raise with air
            if rand::random::<f64>() < 0.1 && legal.raise_min.is_some() {
                return Ok(PlayerAction::Raise((sv.bb * 2).min(sv.stack)));
            }
            return Ok(PlayerAction::Fold);
        }
        if strength < 0.4 {
            if legal.can_check {
                if rand::random::<f64>() < 0.3 && legal.bet_min.is_some() {
                    return Ok(PlayerAction::Bet((sv.bb * 2).min(sv.stack)));
                }
                return Ok(PlayerAction::Check);
            }
            if sv.owed <= sv.bb * 3 {
                return Ok(PlayerAction::Call);
            }
            return Ok(PlayerAction::Fold);
        }
        if legal.bet_min.is_some() {
            let sized = (f64::from(sv.bb) * (2.0 + strength * 4.0)) as u32;
            return Ok(PlayerAction::Bet(sized.min(sv.stack)));
        }
        if strength > 0.5 && sv.stack > sv.owed * 2 && legal.raise_min.is_some() {
            let factor = 2 + (strength * 3.0) as u32;
            return Ok(PlayerAction::Raise((sv.owed * factor).min(sv.stack)));
        }
        Ok(fallback_action(legal))
    }
}

/// Tight-aggressive: plays few hands, gated on a premium preflop range,
/// but plays them hard.
#[derive(Debug, Clone, Default)]
pub struct TightAggressiveBot;

impl TightAggressiveBot {
    const PREMIUM_OFFSUIT: [(u8, u8); 3] = [(14, 13), (14, 12), (13, 12)];
    const PREMIUM_SUITED: [(u8, u8); 4] = [(14, 13), (14, 12), (14, 11), (13, 12)];

    fn strength(hole: [Card; 2], community: &[Card]) -> f64 {
        if community.is_empty() {
            let (high, low) = hole_values(&hole);
            if high == low {
                if high >= 10 {
                    return 0.8 + 0.2 * f64::from(high - 10) / 4.0;
                }
                return 0.4 + 0.4 * f64::from(high - 2) / 8.0;
            }
            let suited = hole[0].suit == hole[1].suit;
            let premium = if suited {
                Self::PREMIUM_SUITED.contains(&(high, low))
            } else {
                Self::PREMIUM_OFFSUIT.contains(&(high, low))
            };
            if premium {
                return 0.7 + 0.1 * f64::from(high.saturating_sub(11)) / 3.0;
            }
            let connected = high - low == 1;
            let gap = f64::from(high - low);
            let mut strength = 0.2 + 0.3 * f64::from(high - 2) / 12.0 - 0.05 * gap;
            if suited {
                strength += 0.1;
            }
            if connected {
                strength += 0.1;
            }
            return strength.clamp(0.1, 0.6);
        }
        postflop_strength(
            hole,
            community,
            &[0.1, 0.3, 0.5, 0.7, 0.8, 0.85, 0.9, 0.95, 0.98, 1.0],
        )
    }
}

impl DecisionSource for TightAggressiveBot {
    fn decide(
        &mut self,
        view: &GameSnapshot,
        seat: PlayerId,
        legal: &LegalActions,
    ) -> Result<PlayerAction> {
        let sv = seat_view(view, seat, legal)?;
        let strength = Self::strength(sv.hole, &view.community);

        if strength < 0.4 {
            if legal.can_check {
                return Ok(PlayerAction::Check);
            }
            // a rare positional bluff
            if rand::random::<f64>() < 0.05 && legal.raise_min.is_some() {
                return Ok(PlayerAction::Raise((sv.bb * 2).min(sv.stack)));
            }
            return Ok(PlayerAction::Fold);
        }
        if strength < 0.6 {
            if legal.can_check {
                if rand::random::<f64>() < 0.4 && legal.bet_min.is_some() {
                    return Ok(PlayerAction::Bet((sv.bb * 2).min(sv.stack)));
                }
                return Ok(PlayerAction::Check);
            }
            if sv.owed <= sv.bb * 3 {
                return Ok(PlayerAction::Call);
            }
            return Ok(PlayerAction::Fold);
        }
        if legal.bet_min.is_some() {
            let sized = (f64::from(sv.bb) * (3.0 + strength * 3.0)) as u32;
            return Ok(PlayerAction::Bet(sized.min(sv.stack)));
        }
        if strength > 0.7 && legal.raise_min.is_some() {
            let factor = 2 + (strength * 2.0) as u32;
            return Ok(PlayerAction::Raise((sv.owed * factor).min(sv.stack)));
        }
        Ok(fallback_action(legal))
    }
}
