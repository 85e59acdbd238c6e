//! Core Game and Player definitions + constructors and small helpers.

use holdem_shared::{
    ActionEvent, ActionKind, Card, GameSnapshot, PlayerId, PlayerPublic, Stage,
};

use crate::deck::Deck;
use crate::errors::EngineError;

/// Upper bound on the in-memory event log. The log is cleared at every
/// hand start, so this only guards a runaway hand.
pub(crate) const MAX_RECENT_ACTIONS: usize = 256;

/// One seat's state. Created once at game setup and reset (never
/// recreated) at the start of every hand, so stacks persist.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub stack: u32,
    /// Two cards once dealt, none between hands.
    pub hole: Option<[Card; 2]>,
    pub has_folded: bool,
    pub all_in: bool,
    /// Last action taken this street.
    pub last_action: Option<ActionKind>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, stack: u32) -> Self {
        Player {
            id,
            name: name.into(),
            stack,
            hole: None,
            has_folded: false,
            all_in: false,
            last_action: None,
        }
    }

    pub(crate) fn reset_for_new_hand(&mut self) {
        self.hole = None;
        self.has_folded = false;
        self.all_in = false;
        self.last_action = None;
    }
}

/// The hand-scoped aggregate. Seat order is the `players` vector order
/// and is fixed for the lifetime of the game; all turn arithmetic works
/// on seat indices, never on container iteration order.
#[derive(Clone, Debug)]
pub struct Game {
    // Table
    pub players: Vec<Player>,
    pub deck: Deck,
    pub community: Vec<Card>,

    // Betting state
    pub pot: u32,
    pub stage: Stage,
    pub button: usize,
    pub to_act: usize,
    pub current_bet: u32,
    pub min_raise: u32,
    pub round_bets: Vec<u32>, // contributions this street, by seat index

    // Blinds
    pub sb: u32,
    pub bb: u32,

    // Flow bookkeeping
    pub hand_no: u32,
    pub pending_to_act: Vec<usize>, // seats still owed a decision this street
    pub recent_actions: Vec<ActionEvent>,
    pub winner_ids: Vec<PlayerId>,

    pub(crate) seed: Option<u64>,
    pub(crate) chips_in_play: u32,
}

impl Game {
    /// Build a table from seat names. No hand is started yet.
    pub fn new(
        names: Vec<String>,
        starting_stack: u32,
        sb: u32,
        bb: u32,
    ) -> Result<Self, EngineError> {
        if names.len() < 2 {
            return Err(EngineError::illegal("a game needs at least two seats"));
        }
        let player_count = names.len();
        let players = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Player::new(PlayerId(i), name, starting_stack))
            .collect();
        Ok(Self {
            players,
            deck: Deck::new(),
            community: Vec::with_capacity(5),

            pot: 0,
            stage: Stage::Preflop,
            // one seat "before" seat 0, so the first hand's button is 0
            button: player_count - 1,
            to_act: 0,
            current_bet: 0,
            min_raise: bb,
            round_bets: vec![0; player_count],

            sb,
            bb,

            hand_no: 0,
            pending_to_act: Vec::new(),
            recent_actions: Vec::new(),
            winner_ids: Vec::new(),

            seed: None,
            chips_in_play: 0,
        })
    }

    /// Same, with a deck seed for reproducible hands.
    pub fn new_seeded(
        names: Vec<String>,
        starting_stack: u32,
        sb: u32,
        bb: u32,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let mut g = Self::new(names, starting_stack, sb, bb)?;
        g.seed = Some(seed);
        Ok(g)
    }

    /// Full snapshot with every seat's hole cards, for observers and
    /// broadcast views.
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot_for(None)
    }

    /// Snapshot redacted for one viewer: only that seat's hole cards are
    /// included. This is what decision sources see.
    pub fn snapshot_for(&self, viewer: Option<PlayerId>) -> GameSnapshot {
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, p)| PlayerPublic {
                id: p.id,
                name: p.name.clone(),
                stack: p.stack,
                cards: match viewer {
                    None => p.hole,
                    Some(v) if v == p.id => p.hole,
                    Some(_) => None,
                },
                bet_this_round: self.round_bets[idx],
                has_folded: p.has_folded,
                all_in: p.all_in,
                last_action: p.last_action,
            })
            .collect();

        GameSnapshot {
            hand_no: self.hand_no,
            players,
            community: self.community.clone(),
            pot: self.pot,
            sb: self.sb,
            bb: self.bb,
            button: PlayerId(self.button),
            to_act: PlayerId(self.to_act),
            stage: self.stage,
            action_log: self.recent_actions.clone(),
        }
    }

    /// Stacks plus pot, constant within a hand.
    pub fn total_chips(&self) -> u32 {
        self.players.iter().map(|p| p.stack).sum::<u32>() + self.pot
    }

    pub(crate) fn log(&mut self, ev: ActionEvent) {
        self.recent_actions.push(ev);
        if self.recent_actions.len() > MAX_RECENT_ACTIONS {
            let overflow = self.recent_actions.len() - MAX_RECENT_ACTIONS;
            self.recent_actions.drain(0..overflow);
        }
    }
}
