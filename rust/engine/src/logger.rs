use serde::{Deserialize, Serialize};

use crate::player::Action;

/// Betting round of a hand, in dealing order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of community cards visible while this street is bet.
    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }
}

/// How an applied action actually moved chips.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    Fold,
    Check,
    Call { amount: u32 },
    /// Short call: `amount` is the whole stack, `refund` went back to the opponent.
    AllInCall { amount: u32, refund: u32 },
    Raise { amount: u32 },
}

/// One applied action: what the strategy picked and what it did to the chips.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat index (0 or 1)
    pub player: usize,
    /// Street the action was taken on
    pub street: Street,
    /// The action sampled from the strategy's distribution
    pub action: Action,
    /// What the engine did with it
    pub resolution: Resolution,
}
