use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GameConfig;
use crate::deck::{Deal, Deck};
use crate::errors::GameError;
use crate::game::{BettingState, RoundEnd};
use crate::hand::HandScore;
use crate::logger::{ActionRecord, Street};
use crate::strategy::{PerturbationContext, Strategy};

/// Keeps the action sampler's streams apart from the deal streams.
const ACTION_SEED_SALT: u64 = 0x5EED_AC71_0000_0001;

/// How a hand finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HandOutcome {
    Fold {
        winner: usize,
        street: Street,
    },
    Showdown {
        /// One seat, or both on a split pot.
        winners: Vec<usize>,
        scores: [HandScore; 2],
    },
    /// Pot limit tripped; every chip went back to its owner.
    Aborted { street: Street },
}

/// Result of one simulated hand, seen from both seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandResult {
    pub hand_index: u64,
    pub button: usize,
    pub deal: Deal,
    pub outcome: HandOutcome,
    pub final_stacks: [u32; 2],
    /// Chips won (positive) or lost (negative) per seat; they sum to zero.
    pub profits: [i64; 2],
    pub big_blind: u32,
    pub actions: Vec<ActionRecord>,
}

impl HandResult {
    pub fn profit_bb(&self, seat: usize) -> f64 {
        self.profits[seat] as f64 / self.big_blind as f64
    }
}

/// Runs complete hands between two strategies.
///
/// Holds only the table configuration; every hand is played on a fresh
/// [`BettingState`], so hands never share chip state.
///
/// # Examples
///
/// ```
/// use headsup_engine::config::GameConfig;
/// use headsup_engine::engine::HandSimulator;
/// use headsup_engine::player::Action;
/// use headsup_engine::strategy::{ActionWeights, Observation, PerturbationContext, Strategy};
///
/// struct Caller;
/// impl Strategy for Caller {
///     fn action_weights(&mut self, _: &Observation, _: &PerturbationContext) -> ActionWeights {
///         ActionWeights::only(Action::Call)
///     }
///     fn name(&self) -> &str {
///         "caller"
///     }
/// }
///
/// let sim = HandSimulator::new(GameConfig::default()).unwrap();
/// let ctx = [PerturbationContext::default(); 2];
/// let result = sim.play_hand(&mut Caller, &mut Caller, &ctx, 0, 0).unwrap();
/// assert_eq!(result.profits[0] + result.profits[1], 0);
/// ```
#[derive(Debug, Clone)]
pub struct HandSimulator {
    config: GameConfig,
}

impl HandSimulator {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Cards for `hand_index`, identical on every call for the same base seed.
    pub fn deal(&self, hand_index: u64) -> Result<Deal, GameError> {
        Deck::for_hand(self.config.base_seed, hand_index).deal_hand()
    }

    /// Button seat for `hand_index` under the configured rotation.
    pub fn button_for(&self, hand_index: u64) -> usize {
        if self.config.alternate_button {
            (hand_index % 2) as usize
        } else {
            0
        }
    }

    /// Plays one hand from blinds to showdown or fold.
    ///
    /// `p0` sits in seat 0 and `p1` in seat 1; `button` names the seat that
    /// posts the small blind.
    pub fn play_hand<A: Strategy, B: Strategy>(
        &self,
        p0: &mut A,
        p1: &mut B,
        contexts: &[PerturbationContext; 2],
        hand_index: u64,
        button: usize,
    ) -> Result<HandResult, GameError> {
        for ctx in contexts {
            ctx.validate()?;
        }
        let deal = self.deal(hand_index)?;
        let mut state = BettingState::new(&self.config, button, deal.hole);
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.base_seed ^ ACTION_SEED_SALT);
        rng.set_stream(hand_index);
        let mut actions = Vec::new();
        let mut seats: [&mut dyn Strategy; 2] = [p0, p1];

        let outcome = loop {
            match state.run_street(&mut seats, contexts, &mut rng, &mut actions) {
                RoundEnd::Folded { winner } => {
                    break HandOutcome::Fold {
                        winner,
                        street: state.street(),
                    };
                }
                RoundEnd::PotLimitExceeded => {
                    let street = state.street();
                    state.refund_all();
                    break HandOutcome::Aborted { street };
                }
                RoundEnd::Closed => {}
            }
            let revealed = match state.street() {
                Street::Preflop => &deal.board[..3],
                Street::Flop => &deal.board[3..4],
                Street::Turn => &deal.board[4..5],
                Street::River => {
                    let (scores, winners) = state
                        .showdown()
                        .ok_or(GameError::InvalidBoard { len: state.board().len() })?;
                    break HandOutcome::Showdown { winners, scores };
                }
            };
            state.advance_street(revealed);
        };

        let final_stacks = state.stacks();
        let start = self.config.starting_stack as i64;
        let profits = [final_stacks[0] as i64 - start, final_stacks[1] as i64 - start];
        debug!(hand_index, button, ?outcome, ?profits, "hand complete");
        Ok(HandResult {
            hand_index,
            button: state.button(),
            deal,
            outcome,
            final_stacks,
            profits,
            big_blind: self.config.big_blind,
            actions,
        })
    }

    /// Plays hands `0..num_hands` between the same two strategies.
    pub fn run_match<A: Strategy, B: Strategy>(
        &self,
        p0: &mut A,
        p1: &mut B,
        contexts: &[PerturbationContext; 2],
        num_hands: u64,
    ) -> Result<Vec<HandResult>, GameError> {
        (0..num_hands)
            .map(|i| self.play_hand(p0, p1, contexts, i, self.button_for(i)))
            .collect()
    }
}
