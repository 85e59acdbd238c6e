//! Turn order, round completion and street advancement.

use holdem_shared::{ActionEvent, GameAction, Stage};

use crate::errors::EngineError;
use crate::game::Game;

impl Game {
    /// After an action is applied, update the flow: rebuild the acting
    /// queue on aggression, detect hand/round completion, advance
    /// streets, or move to the next pending seat.
    pub(crate) fn post_action_update(
        &mut self,
        actor: usize,
        prev_current_bet: u32,
    ) -> Result<(), EngineError> {
        // A bet or raise re-opens the action: everyone else must act again.
        if self.current_bet > prev_current_bet {
            self.rebuild_pending_to_act(actor);
        }

        // The actor is no longer owed a decision this street.
        self.remove_from_pending(actor);

        let total = self.total_chips();
        if total != self.chips_in_play {
            // invariant violation; keep the hand alive but make it loud
            tracing::error!(total, expected = self.chips_in_play, "chip conservation violated");
        }

        // Hand over: everyone else folded.
        if self.active_players().len() <= 1 {
            self.stage = Stage::Showdown;
            self.log(ActionEvent::game(GameAction::StageChanged(Stage::Showdown)));
            self.resolve_showdown();
            return Ok(());
        }

        if self.is_betting_round_complete() {
            self.advance_until_actionable()?;
        } else {
            self.to_act = self.pending_to_act.first().copied().unwrap_or(self.to_act);
        }
        Ok(())
    }

    /// Seats that have not folded (all-in seats stay showdown-eligible).
    pub(crate) fn active_players(&self) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter_map(|(i, p)| (!p.has_folded).then_some(i))
            .collect()
    }

    /// Rebuild the queue of seats still owed a decision, in rotation
    /// order starting after the aggressor.
    fn rebuild_pending_to_act(&mut self, actor: usize) {
        let n = self.players.len();
        self.pending_to_act.clear();
        for i in 1..=n {
            let idx = (actor + i) % n;
            let p = &self.players[idx];
            if !p.has_folded && !p.all_in && self.round_bets[idx] < self.current_bet {
                self.pending_to_act.push(idx);
            }
        }
    }

    pub(crate) fn remove_from_pending(&mut self, actor: usize) {
        if let Some(pos) = self.pending_to_act.iter().position(|&i| i == actor) {
            self.pending_to_act.remove(pos);
        }
    }

    /// A betting round ends when no seat is owed a decision: every
    /// still-active player has acted since the last aggressive action
    /// and contributions are matched (or the shortfall is an all-in).
    pub(crate) fn is_betting_round_complete(&self) -> bool {
        self.pending_to_act.is_empty()
    }

    /// Set up per-street state and the acting queue for the current
    /// stage. Preflop keeps the posted blinds in `round_bets`.
    pub(crate) fn init_round_for_stage(&mut self) {
        if self.stage != Stage::Preflop {
            self.round_bets = vec![0; self.players.len()];
            self.current_bet = 0;
            self.min_raise = self.bb;
            for p in &mut self.players {
                p.last_action = None;
            }
        }

        let n = self.players.len();
        let start = match self.stage {
            // first seat after the big blind
            Stage::Preflop => (self.button + 3) % n,
            // first seat after the button
            Stage::Flop | Stage::Turn | Stage::River => (self.button + 1) % n,
            Stage::Showdown => self.button,
        };

        self.pending_to_act.clear();
        for i in 0..n {
            let idx = (start + i) % n;
            let p = &self.players[idx];
            if !p.has_folded && !p.all_in {
                self.pending_to_act.push(idx);
            }
        }
        // A lone actionable seat owing nothing has no meaningful
        // decision left (everyone else is all-in): skip the round.
        if let &[only] = &self.pending_to_act[..] {
            if self.current_bet <= self.round_bets[only] {
                self.pending_to_act.clear();
            }
        }
        self.to_act = self.pending_to_act.first().copied().unwrap_or(self.button);
    }

    /// Advance streets until a seat has a decision to make, the board
    /// runs out, or the hand resolves. Handles all-in hands where whole
    /// streets go by with nobody able to act.
    pub(crate) fn advance_until_actionable(&mut self) -> Result<(), EngineError> {
        loop {
            self.advance_stage()?;
            if self.stage == Stage::Showdown {
                self.resolve_showdown();
                return Ok(());
            }
            self.init_round_for_stage();
            if !self.pending_to_act.is_empty() {
                return Ok(());
            }
        }
    }

    /// Deal the next street (burning one card first) and advance the
    /// stage marker. Transitions are forward-only.
    pub(crate) fn advance_stage(&mut self) -> Result<(), EngineError> {
        match self.stage {
            Stage::Preflop => {
                self.deck.burn()?;
                let flop = self.deck.deal_many(3)?;
                self.community.extend_from_slice(&flop);
                self.stage = Stage::Flop;
                tracing::debug!(board = ?self.community, "flop dealt");
                self.log(ActionEvent::game(GameAction::DealtCommunity { cards: flop }));
            }
            Stage::Flop => {
                self.deck.burn()?;
                let turn = self.deck.deal()?;
                self.community.push(turn);
                self.stage = Stage::Turn;
                tracing::debug!(card = %turn, "turn dealt");
                self.log(ActionEvent::game(GameAction::DealtCommunity {
                    cards: vec![turn],
                }));
            }
            Stage::Turn => {
                self.deck.burn()?;
                let river = self.deck.deal()?;
                self.community.push(river);
                self.stage = Stage::River;
                tracing::debug!(card = %river, "river dealt");
                self.log(ActionEvent::game(GameAction::DealtCommunity {
                    cards: vec![river],
                }));
            }
            Stage::River => {
                self.stage = Stage::Showdown;
            }
            Stage::Showdown => {}
        }
        self.log(ActionEvent::game(GameAction::StageChanged(self.stage)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_shared::PlayerAction;

    fn seat_names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Seat {}", i)).collect()
    }

    #[test]
    fn calls_around_advance_to_the_flop() {
        let mut g = Game::new_seeded(seat_names(3), 1000, 5, 10, 21).unwrap();
        g.start_new_hand().unwrap();
        assert_eq!(g.stage, Stage::Preflop);

        // button calls, small blind completes, big blind checks
        g.apply_action(0, PlayerAction::Call).unwrap();
        g.apply_action(1, PlayerAction::Call).unwrap();
        g.apply_action(2, PlayerAction::Check).unwrap();

        assert_eq!(g.stage, Stage::Flop);
        assert_eq!(g.community.len(), 3);
        // post-flop betting resets and starts left of the button
        assert_eq!(g.current_bet, 0);
        assert_eq!(g.round_bets, vec![0, 0, 0]);
        assert_eq!(g.to_act, 1);
        // burn + flop leaves 52 - 6 - 1 - 3
        assert_eq!(g.deck.remaining(), 42);
    }

    #[test]
    fn raise_reopens_the_action() {
        let mut g = Game::new_seeded(seat_names(3), 1000, 5, 10, 22).unwrap();
        g.start_new_hand().unwrap();

        g.apply_action(0, PlayerAction::Call).unwrap();
        g.apply_action(1, PlayerAction::Raise(30)).unwrap();

        // both remaining seats owe a decision again, big blind first
        assert_eq!(g.pending_to_act, vec![2, 0]);
        assert_eq!(g.stage, Stage::Preflop);
        assert_eq!(g.to_act, 2);

        g.apply_action(2, PlayerAction::Call).unwrap();
        assert_eq!(g.stage, Stage::Preflop);
        g.apply_action(0, PlayerAction::Call).unwrap();
        assert_eq!(g.stage, Stage::Flop);
    }

    #[test]
    fn fold_out_ends_the_hand_with_a_default_win() {
        let mut g = Game::new_seeded(seat_names(3), 1000, 5, 10, 23).unwrap();
        g.start_new_hand().unwrap();
        let pot_before = g.pot;

        g.apply_action(0, PlayerAction::Fold).unwrap();
        g.apply_action(1, PlayerAction::Fold).unwrap();

        assert_eq!(g.stage, Stage::Showdown);
        assert_eq!(g.winner_ids.len(), 1);
        assert_eq!(usize::from(g.winner_ids[0]), 2);
        assert_eq!(g.pot, 0);
        // big blind keeps its own blind and collects the small blind
        assert_eq!(g.players[2].stack, 1000 - 10 + pot_before);
    }

    #[test]
    fn all_in_hands_run_the_board_out() {
        let mut g = Game::new_seeded(seat_names(2), 1000, 5, 10, 24).unwrap();
        g.start_new_hand().unwrap();

        // seat 1 (small blind, first to act) shoves, seat 0 calls
        g.apply_action(1, PlayerAction::Raise(995)).unwrap();
        g.apply_action(0, PlayerAction::Call).unwrap();

        assert_eq!(g.stage, Stage::Showdown);
        assert_eq!(g.community.len(), 5);
        assert_eq!(g.total_chips(), 2000);
        assert_eq!(g.pot, 0);
    }

    #[test]
    fn streets_burn_one_card_each() {
        let mut g = Game::new_seeded(seat_names(2), 1000, 5, 10, 25).unwrap();
        g.start_new_hand().unwrap();
        assert_eq!(g.deck.remaining(), 48);

        // walk the hand to the river with checks and calls
        g.apply_action(1, PlayerAction::Call).unwrap();
        g.apply_action(0, PlayerAction::Check).unwrap();
        assert_eq!(g.stage, Stage::Flop);
        assert_eq!(g.deck.remaining(), 44); // burn + 3

        g.apply_action(1, PlayerAction::Check).unwrap();
        g.apply_action(0, PlayerAction::Check).unwrap();
        assert_eq!(g.stage, Stage::Turn);
        assert_eq!(g.deck.remaining(), 42); // burn + 1

        g.apply_action(1, PlayerAction::Check).unwrap();
        g.apply_action(0, PlayerAction::Check).unwrap();
        assert_eq!(g.stage, Stage::River);
        assert_eq!(g.deck.remaining(), 40); // burn + 1
    }
}
