//! Dealing and hand initialization.

use holdem_shared::{ActionEvent, ActionKind, BlindKind, GameAction, PlayerId, Stage};

use crate::deck::Deck;
use crate::errors::EngineError;

use super::Game;

impl Game {
    /// Start a new hand: advance the button, reshuffle, reset transient
    /// state, deal hole cards and post blinds. Stacks persist.
    pub fn start_new_hand(&mut self) -> Result<(), EngineError> {
        self.hand_no += 1;
        self.button = (self.button + 1) % self.players.len();
        self.deck.reset();
        match self.seed {
            // vary the shuffle per hand while keeping the game reproducible
            Some(seed) => self.deck.shuffle_seeded(seed.wrapping_add(self.hand_no as u64)),
            None => self.deck.shuffle(),
        }
        self.start_hand_with_current_deck()
    }

    /// Start a hand from an explicitly prepared deck. Used for
    /// reproducing exact boards (tests, replays of logged hands).
    pub fn start_new_hand_with_deck(&mut self, deck: Deck) -> Result<(), EngineError> {
        self.hand_no += 1;
        self.button = (self.button + 1) % self.players.len();
        self.deck = deck;
        self.start_hand_with_current_deck()
    }

    fn start_hand_with_current_deck(&mut self) -> Result<(), EngineError> {
        let n = self.players.len();

        // Reset table state
        self.community.clear();
        self.pot = 0;
        self.stage = Stage::Preflop;
        self.current_bet = 0;
        self.min_raise = self.bb;
        self.round_bets = vec![0; n];
        self.recent_actions.clear();
        self.winner_ids.clear();
        for p in &mut self.players {
            p.reset_for_new_hand();
            if p.stack == 0 {
                // busted seats are dealt in but cannot act
                p.all_in = true;
            }
        }
        self.chips_in_play = self.total_chips();

        self.log(ActionEvent::game(GameAction::HandStarted {
            hand_no: self.hand_no,
            button: PlayerId(self.button),
        }));

        // Deal hole cards
        for idx in 0..n {
            let hole = self.deck.deal_many(2)?;
            self.players[idx].hole = Some([hole[0], hole[1]]);
            let player_id = self.players[idx].id;
            self.log(ActionEvent::game(GameAction::DealtHole { player_id }));
            tracing::debug!(
                player = %self.players[idx].name,
                card0 = %hole[0],
                card1 = %hole[1],
                "dealt hole cards"
            );
        }

        // Post blinds
        let sb_idx = (self.button + 1) % n;
        let bb_idx = (self.button + 2) % n;
        self.post_blind(sb_idx, BlindKind::SmallBlind, self.sb);
        self.post_blind(bb_idx, BlindKind::BigBlind, self.bb);
        // the amount to match is the full big blind even when the blind
        // was posted short
        self.current_bet = self.bb;
        self.min_raise = self.bb;

        self.init_round_for_stage();
        self.log(ActionEvent::game(GameAction::StageChanged(self.stage)));

        // Blinds can leave nobody with a meaningful decision (short
        // stacks all-in from the posts): run the board out right away.
        if self.pending_to_act.is_empty() {
            self.advance_until_actionable()?;
        }
        Ok(())
    }

    /// Post a blind, capping at the stack and marking all-in when the
    /// seat cannot cover it (or is left with nothing).
    fn post_blind(&mut self, idx: usize, kind: BlindKind, amount: u32) {
        let paid = amount.min(self.players[idx].stack);
        self.players[idx].stack -= paid;
        self.round_bets[idx] += paid;
        self.pot += paid;
        if self.players[idx].stack == 0 {
            self.players[idx].all_in = true;
        }
        let action = ActionKind::PostBlind { kind, amount: paid };
        self.players[idx].last_action = Some(action);
        self.log(ActionEvent::player(self.players[idx].id, action));
        tracing::debug!(
            player = %self.players[idx].name,
            kind = ?kind,
            amount = paid,
            stack = self.players[idx].stack,
            "posted blind"
        );
    }
}
