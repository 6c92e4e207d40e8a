use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Hole cards for both seats plus the full runout, in dealing order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub hole: [[Card; 2]; 2],
    pub board: [Card; 5],
}

/// A 52-card deck dealt from the top, driven by its own ChaCha20 stream.
#[derive(Debug)]
pub struct Deck {
    order: Vec<Card>,
    dealt: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Unshuffled deck in id order; call [`Deck::shuffle`] before dealing.
    pub fn new_with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    /// Shuffled deck for one hand of a match. Each `hand_index` selects its
    /// own ChaCha stream under `base_seed`, so a hand's order does not depend
    /// on how many hands were shuffled before it.
    pub fn for_hand(base_seed: u64, hand_index: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(base_seed);
        rng.set_stream(hand_index);
        let mut deck = Self::from_rng(rng);
        deck.shuffle();
        deck
    }

    fn from_rng(rng: ChaCha20Rng) -> Self {
        Self {
            order: full_deck(),
            dealt: 0,
            rng,
        }
    }

    /// Restores all 52 cards and shuffles them with the next draws from the
    /// deck's stream.
    pub fn shuffle(&mut self) {
        self.reset();
        self.order.shuffle(&mut self.rng);
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let card = self.order.get(self.dealt).copied()?;
        self.dealt += 1;
        Some(card)
    }

    pub fn burn_card(&mut self) {
        self.deal_card();
    }

    /// Deals two hole cards to each seat (alternating), then burn-and-turn
    /// for flop, turn and river.
    pub fn deal_hand(&mut self) -> Result<Deal, GameError> {
        let first = [self.draw()?, self.draw()?];
        let second = [self.draw()?, self.draw()?];
        let hole = [[first[0], second[0]], [first[1], second[1]]];

        let mut board = [first[0]; 5];
        self.burn_card();
        for slot in &mut board[..3] {
            *slot = self.draw()?;
        }
        for slot in &mut board[3..] {
            self.burn_card();
            *slot = self.draw()?;
        }
        Ok(Deal { hole, board })
    }

    /// Puts every card back in id order without touching the stream.
    pub fn reset(&mut self) {
        self.order = full_deck();
        self.dealt = 0;
    }

    pub fn remaining(&self) -> usize {
        self.order.len() - self.dealt
    }

    fn draw(&mut self) -> Result<Card, GameError> {
        self.deal_card().ok_or(GameError::DeckExhausted)
    }
}
