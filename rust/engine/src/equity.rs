//! Monte Carlo equity against a uniformly random opponent holding.
//!
//! Each sample draws the opponent's two hole cards and the missing board
//! cards without replacement from the unseen deck, then compares both
//! 7-card scores. Sampling is independent of the per-hand deal seed; use
//! [`EquityEstimator::with_seed`] when results must be reproducible.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;
use crate::hand::evaluate;

/// Raw win/tie counts from a sampling run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EquityTally {
    pub wins: u32,
    pub ties: u32,
    pub iterations: u32,
}

impl EquityTally {
    /// `(wins + ties / 2) / iterations`, always within `[0, 1]`.
    pub fn equity(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        (self.wins as f64 + self.ties as f64 / 2.0) / self.iterations as f64
    }
}

#[derive(Debug, Clone)]
pub struct EquityEstimator {
    rng: ChaCha8Rng,
}

impl Default for EquityEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl EquityEstimator {
    /// Estimator seeded from the thread-local generator.
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn equity(
        &mut self,
        hero: [Card; 2],
        board: &[Card],
        iterations: u32,
    ) -> Result<f64, GameError> {
        simulate(hero, board, iterations, &mut self.rng).map(|t| t.equity())
    }

    pub fn tally(
        &mut self,
        hero: [Card; 2],
        board: &[Card],
        iterations: u32,
    ) -> Result<EquityTally, GameError> {
        simulate(hero, board, iterations, &mut self.rng)
    }
}

/// Runs `iterations` samples with the caller's random source.
///
/// # Errors
///
/// - [`GameError::InvalidBoard`] if more than five board cards are given
/// - [`GameError::DuplicateCard`] if a card repeats across hero and board
/// - [`GameError::InvalidIterations`] if `iterations` is zero
///
/// # Examples
///
/// ```
/// use headsup_engine::cards::parse_cards;
/// use headsup_engine::equity::simulate;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let hero = parse_cards("As Ah").unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let tally = simulate([hero[0], hero[1]], &[], 2_000, &mut rng).unwrap();
/// assert!(tally.equity() > 0.75);
/// ```
pub fn simulate<R: Rng + ?Sized>(
    hero: [Card; 2],
    board: &[Card],
    iterations: u32,
    rng: &mut R,
) -> Result<EquityTally, GameError> {
    if board.len() > 5 {
        return Err(GameError::InvalidBoard { len: board.len() });
    }
    if iterations == 0 {
        return Err(GameError::InvalidIterations);
    }
    let mut seen = 0u64;
    for &c in hero.iter().chain(board) {
        if seen & c.mask() != 0 {
            return Err(GameError::DuplicateCard { card: c });
        }
        seen |= c.mask();
    }

    let mut unseen: Vec<Card> = full_deck()
        .into_iter()
        .filter(|c| seen & c.mask() == 0)
        .collect();
    let missing = 5 - board.len();

    let mut runout = [hero[0]; 5];
    runout[..board.len()].copy_from_slice(board);

    let mut tally = EquityTally {
        wins: 0,
        ties: 0,
        iterations,
    };
    for _ in 0..iterations {
        let (drawn, _) = unseen.partial_shuffle(rng, 2 + missing);
        runout[board.len()..].copy_from_slice(&drawn[2..]);
        let villain = [drawn[0], drawn[1]];

        let mine = evaluate(&seven(hero, &runout));
        let theirs = evaluate(&seven(villain, &runout));
        if mine > theirs {
            tally.wins += 1;
        } else if mine == theirs {
            tally.ties += 1;
        }
    }
    Ok(tally)
}

fn seven(hole: [Card; 2], board: &[Card; 5]) -> [Card; 7] {
    [
        hole[0], hole[1], board[0], board[1], board[2], board[3], board[4],
    ]
}

/// Suggested sample count for a street, scaled up as the pot grows.
///
/// `street_index` is 0 for preflop through 3 for the river; `pot_in_bb` is
/// the pot measured in big blinds. Later streets have fewer unknown cards
/// and converge faster, so they get fewer samples.
pub fn iterations_for(street_index: usize, pot_in_bb: f64) -> u32 {
    let base: u32 = match street_index {
        0 => 1_000,
        1 => 600,
        2 => 400,
        _ => 300,
    };
    if pot_in_bb >= 50.0 {
        base * 4
    } else if pot_in_bb >= 10.0 {
        base * 2
    } else {
        base
    }
}
