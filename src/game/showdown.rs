//! Showdown resolution and pot awarding.

use holdem_shared::{ActionEvent, GameAction, HandResult, PlayerId};

use crate::game::Game;
use crate::poker::evaluate_hole;

impl Game {
    /// Resolve the hand: evaluate every non-folded seat, split the pot
    /// among the best hands and pay it out. When all but one seat
    /// folded the survivor takes the pot without showing.
    ///
    /// One shared pot only; side pots for uneven all-ins are not
    /// modeled. Odd chips from a split are handed out one at a time in
    /// seat order so no chip is ever created or destroyed.
    pub(crate) fn resolve_showdown(&mut self) {
        let live = self.active_players();

        let winners: Vec<PlayerId> = if live.len() == 1 {
            vec![self.players[live[0]].id]
        } else {
            let mut results: Vec<HandResult> = Vec::with_capacity(live.len());
            for &idx in &live {
                let p = &self.players[idx];
                let Some(hole) = p.hole else { continue };
                results.push(HandResult {
                    player_id: p.id,
                    value: evaluate_hole(hole, &self.community),
                });
            }
            let winners = match results.iter().map(|r| r.value).max() {
                Some(best) => results
                    .iter()
                    .filter(|r| r.value == best)
                    .map(|r| r.player_id)
                    .collect(),
                None => Vec::new(),
            };
            self.log(ActionEvent::game(GameAction::Showdown { results }));
            winners
        };

        self.winner_ids = winners.clone();

        if !winners.is_empty() && self.pot > 0 {
            let amount = self.pot;
            let share = amount / winners.len() as u32;
            let mut remainder = amount % winners.len() as u32;
            for &w in &winners {
                let mut win = share;
                if remainder > 0 {
                    win += 1;
                    remainder -= 1;
                }
                let idx = usize::from(w);
                self.players[idx].stack += win;
            }
            self.pot = 0;
            self.log(ActionEvent::game(GameAction::PotAwarded { winners, amount }));
        }

        self.log(ActionEvent::game(GameAction::HandEnded));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_shared::{Card, PlayerAction, Rank, Stage, Suit};

    fn seat_names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Seat {}", i)).collect()
    }

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    /// Rig a two-seat hand so both play the board: community is a broadway
    /// straight, hole cards are irrelevant low cards.
    fn rigged_split_game(pot: u32) -> Game {
        let mut g = Game::new(seat_names(2), 1000, 5, 10).unwrap();
        g.start_new_hand().unwrap();
        g.community = vec![
            c(Rank::Ace, Suit::Spades),
            c(Rank::King, Suit::Hearts),
            c(Rank::Queen, Suit::Diamonds),
            c(Rank::Jack, Suit::Clubs),
            c(Rank::Ten, Suit::Spades),
        ];
        g.players[0].hole = Some([c(Rank::Two, Suit::Hearts), c(Rank::Three, Suit::Clubs)]);
        g.players[1].hole = Some([c(Rank::Two, Suit::Diamonds), c(Rank::Four, Suit::Spades)]);
        g.players[0].stack = 0;
        g.players[1].stack = 0;
        g.pot = pot;
        g.stage = Stage::Showdown;
        g
    }

    #[test]
    fn equal_hands_split_the_pot() {
        let mut g = rigged_split_game(200);
        g.resolve_showdown();
        assert_eq!(g.winner_ids.len(), 2);
        assert_eq!(g.players[0].stack, 100);
        assert_eq!(g.players[1].stack, 100);
        assert_eq!(g.pot, 0);
    }

    #[test]
    fn odd_chip_goes_to_the_earliest_seat() {
        let mut g = rigged_split_game(201);
        g.resolve_showdown();
        // floor share is 100; the leftover chip lands on seat 0
        assert_eq!(g.players[0].stack, 101);
        assert_eq!(g.players[1].stack, 100);
        assert_eq!(g.players[0].stack + g.players[1].stack, 201);
    }

    #[test]
    fn best_hand_takes_the_whole_pot() {
        let mut g = rigged_split_game(300);
        // seat 1 now holds a flush-proof better hand: ace-high straight
        // is on the board, give seat 1 a royal flush instead
        g.community = vec![
            c(Rank::Ace, Suit::Spades),
            c(Rank::King, Suit::Spades),
            c(Rank::Queen, Suit::Spades),
            c(Rank::Seven, Suit::Hearts),
            c(Rank::Two, Suit::Diamonds),
        ];
        g.players[1].hole = Some([c(Rank::Jack, Suit::Spades), c(Rank::Ten, Suit::Spades)]);
        g.resolve_showdown();
        assert_eq!(g.winner_ids, vec![holdem_shared::PlayerId(1)]);
        assert_eq!(g.players[1].stack, 300);
        assert_eq!(g.players[0].stack, 0);
    }

    #[test]
    fn showdown_results_are_logged_for_observers() {
        let mut g = rigged_split_game(100);
        g.resolve_showdown();
        let saw_showdown = g.recent_actions.iter().any(|e| {
            matches!(
                e,
                ActionEvent::GameAction(GameAction::Showdown { results }) if results.len() == 2
            )
        });
        let saw_award = g
            .recent_actions
            .iter()
            .any(|e| matches!(e, ActionEvent::GameAction(GameAction::PotAwarded { .. })));
        assert!(saw_showdown);
        assert!(saw_award);
    }

    #[test]
    fn folded_seats_never_contest_the_pot() {
        let mut g = Game::new_seeded(seat_names(3), 1000, 5, 10, 77).unwrap();
        g.start_new_hand().unwrap();
        // everyone calls, then the hand is checked to the river
        g.apply_action(0, PlayerAction::Call).unwrap();
        g.apply_action(1, PlayerAction::Call).unwrap();
        g.apply_action(2, PlayerAction::Check).unwrap();
        // flop: seat 1 bets, seat 2 folds, seat 0 calls
        g.apply_action(1, PlayerAction::Bet(20)).unwrap();
        g.apply_action(2, PlayerAction::Fold).unwrap();
        g.apply_action(0, PlayerAction::Call).unwrap();
        // turn and river get checked down
        g.apply_action(1, PlayerAction::Check).unwrap();
        g.apply_action(0, PlayerAction::Check).unwrap();
        g.apply_action(1, PlayerAction::Check).unwrap();
        g.apply_action(0, PlayerAction::Check).unwrap();

        assert_eq!(g.stage, Stage::Showdown);
        assert!(!g.winner_ids.contains(&holdem_shared::PlayerId(2)));
        assert_eq!(g.total_chips(), 3000);
    }
}
