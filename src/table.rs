//! The table driver: owns the seats and observers and drives hands to
//! completion, one decision at a time.
//!
//! Exactly one seat acts at a time; the driver blocks on the decision
//! source, validates its answer against the legal action set, and only
//! then mutates game state. Observer notification is fire-and-forget;
//! the core never depends on observer output.

use anyhow::{Context, Result};
use holdem_shared::{
    ActionEvent, GameAction, GameSnapshot, LegalActions, PlayerAction, PlayerId, Stage,
};

use crate::bot::{fallback_action, DecisionSource};
use crate::errors::EngineError;
use crate::game::Game;

/// Receives every table event together with a full snapshot taken just
/// after the event. Must not block; failures are the observer's problem.
pub trait TableObserver {
    fn on_event(&mut self, event: &ActionEvent, snapshot: &GameSnapshot);
}

struct Seat {
    name: String,
    source: Box<dyn DecisionSource>,
}

/// Table stakes and session parameters.
#[derive(Clone, Copy, Debug)]
pub struct Stakes {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub seed: Option<u64>,
}

pub struct Table {
    stakes: Stakes,
    seats: Vec<Seat>,
    observers: Vec<Box<dyn TableObserver>>,
    game: Option<Game>,
    emitted: usize,
}

impl Table {
    pub fn new(stakes: Stakes) -> Self {
        Table {
            stakes,
            seats: Vec::new(),
            observers: Vec::new(),
            game: None,
            emitted: 0,
        }
    }

    /// Add a seat before `setup`. Seat order is fixed for the game.
    pub fn add_seat(&mut self, name: impl Into<String>, source: Box<dyn DecisionSource>) {
        self.seats.push(Seat {
            name: name.into(),
            source,
        });
    }

    pub fn add_observer(&mut self, observer: Box<dyn TableObserver>) {
        self.observers.push(observer);
    }

    /// Create the game state for the registered seats. Betting or
    /// dealing before this fails with `Uninitialized`.
    pub fn setup(&mut self) -> Result<(), EngineError> {
        let names = self.seats.iter().map(|s| s.name.clone()).collect();
        let mut game = Game::new(
            names,
            self.stakes.starting_stack,
            self.stakes.small_blind,
            self.stakes.big_blind,
        )?;
        game.seed = self.stakes.seed;
        self.game = Some(game);
        Ok(())
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// Play one complete hand: deal, drive every betting round, resolve
    /// the pot. Decision-source failures are absorbed via the fallback
    /// policy and never abort the hand.
    pub fn play_hand(&mut self) -> Result<()> {
        {
            let game = self.game.as_mut().ok_or(EngineError::Uninitialized)?;
            game.start_new_hand().context("starting a new hand")?;
        }
        self.emitted = 0;
        self.flush_events();

        loop {
            let turn = {
                let game = self.game.as_ref().ok_or(EngineError::Uninitialized)?;
                if game.stage == Stage::Showdown {
                    break;
                }
                let seat = game.to_act;
                (
                    seat,
                    game.snapshot_for(Some(PlayerId(seat))),
                    game.legal_actions(seat),
                )
            };
            let (seat, view, legal) = turn;
            let action = self.decide_for(seat, &view, &legal);

            let game = self.game.as_mut().ok_or(EngineError::Uninitialized)?;
            game.apply_action(seat, action)
                .context("applying a validated action")?;
            self.flush_events();
        }

        // showdown resolution logs events of its own
        self.flush_events();
        Ok(())
    }

    /// Play up to `hands` hands, stopping early once fewer than two
    /// seats still have chips. Emits a final `GameEnded` with standings.
    pub fn play(&mut self, hands: u32) -> Result<()> {
        for _ in 0..hands {
            let funded = {
                let game = self.game.as_ref().ok_or(EngineError::Uninitialized)?;
                game.players.iter().filter(|p| p.stack > 0).count()
            };
            if funded < 2 {
                tracing::info!("only one funded seat left, ending the session early");
                break;
            }
            self.play_hand()?;
        }

        let (event, snapshot) = {
            let game = self.game.as_ref().ok_or(EngineError::Uninitialized)?;
            let mut standings: Vec<(PlayerId, u32)> =
                game.players.iter().map(|p| (p.id, p.stack)).collect();
            standings.sort_by(|a, b| b.1.cmp(&a.1));
            (
                ActionEvent::game(GameAction::GameEnded { standings }),
                game.snapshot(),
            )
        };
        for obs in &mut self.observers {
            obs.on_event(&event, &snapshot);
        }
        Ok(())
    }

    /// Ask the seat's decision source and sanitize the answer: any
    /// error or action outside the legal set degrades to the safest
    /// legal action instead of poisoning the hand.
    fn decide_for(&mut self, seat: usize, view: &GameSnapshot, legal: &LegalActions) -> PlayerAction {
        match self.seats[seat].source.decide(view, PlayerId(seat), legal) {
            Ok(action) if legal.allows(action) => action,
            Ok(action) => {
                tracing::warn!(seat, ?action, "illegal decision, using fallback");
                fallback_action(legal)
            }
            Err(err) => {
                tracing::warn!(seat, %err, "decision source failed, using fallback");
                fallback_action(legal)
            }
        }
    }

    /// Forward events logged since the last flush to every observer,
    /// each with a post-event snapshot.
    fn flush_events(&mut self) {
        let (snapshot, new_events) = match self.game.as_ref() {
            Some(game) => {
                let start = self.emitted.min(game.recent_actions.len());
                (game.snapshot(), game.recent_actions[start..].to_vec())
            }
            None => return,
        };
        self.emitted += new_events.len();
        if self.observers.is_empty() {
            return;
        }
        for event in &new_events {
            for obs in &mut self.observers {
                obs.on_event(event, &snapshot);
            }
        }
    }
}
