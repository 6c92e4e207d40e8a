use serde::{Deserialize, Serialize};

/// Seat role for one hand. The button posts the small blind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Position {
    Button,
    /// Big blind position, out of position after the flop
    BigBlind,
}

impl Position {
    pub fn of(seat: usize, button: usize) -> Position {
        if seat == button {
            Position::Button
        } else {
            Position::BigBlind
        }
    }
}

/// The fixed action set every strategy chooses from.
///
/// `Call` doubles as a check when nothing is owed, and `Raise` as an opening
/// bet; the chip amount is decided by the engine, not the strategy.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Call,
    Raise,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Fold, Action::Call, Action::Raise];

    pub fn index(self) -> usize {
        match self {
            Action::Fold => 0,
            Action::Call => 1,
            Action::Raise => 2,
        }
    }
}

/// Default starting stack size for each player in chips (200 big blinds)
pub const STARTING_STACK: u32 = 20_000;
pub const SMALL_BLIND: u32 = 50;
pub const BIG_BLIND: u32 = 100;
