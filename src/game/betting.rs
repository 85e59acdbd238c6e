//! Betting and action handling for Game.

use holdem_shared::{ActionEvent, ActionKind, LegalActions, PlayerAction, Stage};

use crate::errors::EngineError;
use crate::game::Game;

impl Game {
    /// The action set the engine will accept from `seat` right now,
    /// with quoted minimums. Fold is always legal; check only when
    /// nothing is owed; call only when something is owed; bet only as
    /// the opening wager of a street; raise only over a standing bet
    /// when the stack exceeds the call amount.
    pub fn legal_actions(&self, seat: usize) -> LegalActions {
        let owed = self.current_bet.saturating_sub(self.round_bets[seat]);
        let stack = self.players[seat].stack;
        if owed == 0 {
            LegalActions {
                can_check: true,
                call: None,
                // covers both a fresh street and the big blind's option
                // to re-open its own blind
                bet_min: (stack > 0).then(|| self.open_bet_min(seat)),
                raise_min: None,
            }
        } else {
            LegalActions {
                can_check: false,
                call: (stack > 0).then_some(owed),
                bet_min: None,
                raise_min: (stack > owed).then(|| (owed + self.min_raise).min(stack)),
            }
        }
    }

    /// Minimum chips for an opening bet: the big blind, or the whole
    /// stack when shorter.
    fn open_bet_min(&self, seat: usize) -> u32 {
        self.bb.min(self.players[seat].stack)
    }

    /// Apply one action for the seat to act. Amounts are clamped to the
    /// stack and table minimums (all-in capping is unconditional); kind
    /// mismatches that cannot be resolved by clamping are rejected as
    /// `IllegalAction` for the driver to recover from.
    pub fn apply_action(&mut self, seat: usize, action: PlayerAction) -> Result<(), EngineError> {
        if self.stage == Stage::Showdown {
            return Err(EngineError::illegal("the hand is already over"));
        }
        if seat >= self.players.len() {
            return Err(EngineError::illegal(format!("no such seat: {}", seat)));
        }
        if seat != self.to_act {
            return Err(EngineError::illegal("not this seat's turn"));
        }
        if self.players[seat].has_folded {
            return Err(EngineError::illegal("seat has folded"));
        }
        if self.players[seat].all_in {
            return Err(EngineError::illegal("seat is all-in"));
        }

        let prev_current_bet = self.current_bet;
        let owed = self.current_bet.saturating_sub(self.round_bets[seat]);

        match action {
            PlayerAction::Fold => self.do_fold(seat),
            PlayerAction::Check => {
                if owed != 0 {
                    return Err(EngineError::illegal("cannot check facing a bet"));
                }
                self.do_check(seat);
            }
            // a call with nothing owed settles as a check
            PlayerAction::Call => self.do_call(seat),
            PlayerAction::Bet(add) | PlayerAction::Raise(add) => {
                if add == 0 {
                    self.do_call(seat);
                } else if self.current_bet == 0 {
                    self.do_open_bet(seat, add);
                } else {
                    self.do_raise(seat, add);
                }
            }
        }

        self.post_action_update(seat, prev_current_bet)
    }

    fn do_fold(&mut self, seat: usize) {
        self.players[seat].has_folded = true;
        self.record(seat, ActionKind::Fold);
    }

    fn do_check(&mut self, seat: usize) {
        self.record(seat, ActionKind::Check);
    }

    /// Pay off the standing bet, capped at the stack (all-in for less).
    fn do_call(&mut self, seat: usize) {
        let owed = self.current_bet.saturating_sub(self.round_bets[seat]);
        if owed == 0 {
            self.do_check(seat);
            return;
        }
        let pay = owed.min(self.players[seat].stack);
        self.move_chips(seat, pay);
        self.record(seat, ActionKind::Call(pay));
    }

    /// Opening wager of a street. The total is pulled up to the big
    /// blind minimum and capped at the stack.
    fn do_open_bet(&mut self, seat: usize, desired_add: u32) {
        let add = desired_add.max(self.open_bet_min(seat)).min(self.players[seat].stack);
        self.move_chips(seat, add);
        self.current_bet = self.round_bets[seat];
        self.min_raise = add;
        self.record(seat, ActionKind::Bet(add));
    }

    /// Raise over a standing bet. The added chips are pulled up to a
    /// full raise (call + current minimum) when the stack covers it,
    /// otherwise the whole stack goes in; if even that cannot exceed
    /// the standing bet the action settles as a call.
    fn do_raise(&mut self, seat: usize, desired_add: u32) {
        let prev_bet = self.current_bet;
        let owed = prev_bet.saturating_sub(self.round_bets[seat]);
        let stack = self.players[seat].stack;

        let full_raise_add = owed.saturating_add(self.min_raise);
        let add = desired_add.max(full_raise_add).min(stack);

        if add <= owed {
            // all-in that cannot exceed the standing bet: a call
            self.do_call(seat);
            return;
        }

        self.move_chips(seat, add);
        let new_total = self.round_bets[seat];
        let by = new_total - prev_bet;
        self.current_bet = new_total;
        self.min_raise = by;
        self.record(
            seat,
            ActionKind::Raise {
                to: new_total,
                by,
            },
        );
    }

    /// Move chips from the stack into this street's bet and the pot,
    /// flagging all-in when the stack is exhausted. No action may
    /// create a negative balance.
    fn move_chips(&mut self, seat: usize, amount: u32) {
        debug_assert!(amount <= self.players[seat].stack);
        self.players[seat].stack -= amount;
        self.round_bets[seat] += amount;
        self.pot += amount;
        if self.players[seat].stack == 0 {
            self.players[seat].all_in = true;
        }
    }

    fn record(&mut self, seat: usize, action: ActionKind) {
        self.players[seat].last_action = Some(action);
        self.log(ActionEvent::player(self.players[seat].id, action));
    }
}
