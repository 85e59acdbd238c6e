//! A shuffleable, depletable deck of 52 cards.

use holdem_shared::{standard_deck, Card};
use rand::seq::SliceRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::errors::EngineError;

/// An owned deck. `reset` restores the canonical 52-card order; cards
/// are dealt from the back of the vector. A live deck never holds
/// duplicates; it only shrinks between resets.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A fresh, unshuffled deck in canonical order.
    pub fn new() -> Self {
        Deck {
            cards: standard_deck(),
        }
    }

    /// Restore all 52 cards in canonical order.
    pub fn reset(&mut self) {
        self.cards = standard_deck();
    }

    /// Build a deck with an explicit order; the last card is dealt
    /// first. For replaying logged boards and rigging test decks.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        debug_assert!(
            {
                let mut seen = std::collections::HashSet::new();
                cards.iter().all(|c| seen.insert(*c))
            },
            "deck contains duplicate cards"
        );
        Deck { cards }
    }

    /// Uniform random permutation from the thread RNG.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rand::rng());
    }

    /// Deterministic uniform permutation for reproducible hands.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Remove and return the top card.
    pub fn deal(&mut self) -> Result<Card, EngineError> {
        self.cards.pop().ok_or(EngineError::EmptyDeck {
            requested: 1,
            remaining: 0,
        })
    }

    /// Deal `n` cards atomically: if fewer than `n` remain the deck is
    /// left untouched.
    pub fn deal_many(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        if self.cards.len() < n {
            return Err(EngineError::EmptyDeck {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let split = self.cards.len() - n;
        let mut dealt = self.cards.split_off(split);
        // split_off keeps deck order; the top card should come first
        dealt.reverse();
        Ok(dealt)
    }

    /// Discard the top card face-down.
    pub fn burn(&mut self) -> Result<(), EngineError> {
        self.deal().map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}
