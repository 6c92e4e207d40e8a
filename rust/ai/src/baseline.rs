//! Baseline strategy for benchmarking other strategies.
//!
//! Preflop it scores the starting hand on a 0-10 scale; postflop it compares
//! Monte Carlo equity against the price of calling.

use headsup_engine::cards::{Card, Rank};
use headsup_engine::equity::{iterations_for, EquityEstimator};
use headsup_engine::logger::Street;
use headsup_engine::player::Action;
use headsup_engine::strategy::{ActionWeights, Observation, PerturbationContext, Strategy};
use tracing::warn;

/// Simple rule-based reference opponent.
///
/// **Preflop:**
/// - Premium hands (QQ+, JJ, AKs): raise
/// - Strong hands (TT-99, AK, AQ, KQs): call any price
/// - Medium hands: call when the price is reasonable
/// - Weak hands: check if free, otherwise fold
///
/// **Postflop:**
/// - Equity above 0.6 with nothing to call: bet
/// - Facing a bet: call when equity covers the pot odds, raise above 0.75
/// - Otherwise check or fold
///
/// Equity is estimated with a seeded [`EquityEstimator`], so a seeded
/// baseline plays the same hand the same way every time.
///
/// # Example
///
/// ```rust
/// use headsup_ai::baseline::BaselineStrategy;
/// use headsup_engine::strategy::Strategy;
///
/// let s = BaselineStrategy::with_seed(42);
/// assert_eq!(s.name(), "baseline");
/// ```
#[derive(Debug, Clone)]
pub struct BaselineStrategy {
    estimator: EquityEstimator,
}

impl BaselineStrategy {
    pub fn new() -> Self {
        Self {
            estimator: EquityEstimator::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            estimator: EquityEstimator::with_seed(seed),
        }
    }

    /// Starting hand strength on a 0-10 scale.
    ///
    /// - 9-10: Premium hands (AA, KK, QQ, JJ, AKs)
    /// - 7-8: Strong hands (TT-99, AK, AQ, KQs)
    /// - 5-6: Medium hands (88-77, AJ, KQ, suited connectors)
    /// - 3-4: Marginal hands (66-22, Ax, broadway)
    /// - 0-2: Weak hands (offsuit low cards)
    pub fn preflop_strength(hole: [Card; 2]) -> u8 {
        let (high, low) = if hole[0].rank() >= hole[1].rank() {
            (hole[0].rank(), hole[1].rank())
        } else {
            (hole[1].rank(), hole[0].rank())
        };
        let suited = hole[0].suit() == hole[1].suit();
        let pick = |s: u8, o: u8| if suited { s } else { o };

        if high == low {
            return match high {
                Rank::Ace | Rank::King => 10,
                Rank::Queen | Rank::Jack => 9,
                Rank::Ten => 8,
                Rank::Nine => 7,
                Rank::Eight => 6,
                Rank::Seven => 5,
                _ => 4,
            };
        }

        match (high, low) {
            (Rank::Ace, Rank::King) => pick(10, 8),
            (Rank::Ace, Rank::Queen) => pick(8, 7),
            (Rank::Ace, Rank::Jack) => pick(7, 6),
            (Rank::Ace, Rank::Ten) => pick(6, 5),
            (Rank::Ace, _) => pick(5, 4),
            (Rank::King, Rank::Queen) => pick(7, 6),
            (Rank::King, Rank::Jack) => pick(6, 5),
            (Rank::King, Rank::Ten) => pick(5, 4),
            (Rank::Queen, Rank::Jack) => pick(6, 5),
            (Rank::Queen, Rank::Ten) => pick(5, 4),
            _ => {
                let gap = high.index() - low.index();
                if suited && gap <= 2 {
                    if high >= Rank::Nine { 5 } else { 4 }
                } else if high >= Rank::Jack && low >= Rank::Nine {
                    4
                } else {
                    2
                }
            }
        }
    }

    fn preflop_weights(obs: &Observation) -> ActionWeights {
        let strength = Self::preflop_strength(obs.hole_cards);
        let price = obs.pot_odds();
        let action = match strength {
            9..=10 => Action::Raise,
            7..=8 => Action::Call,
            5..=6 if price <= 0.35 => Action::Call,
            3..=4 if price <= 0.25 => Action::Call,
            _ if obs.can_check() => Action::Call,
            _ => Action::Fold,
        };
        ActionWeights::only(action)
    }

    fn postflop_weights(&mut self, obs: &Observation) -> ActionWeights {
        let iterations = iterations_for(obs.street.index(), obs.pot_in_bb());
        let equity = match self
            .estimator
            .equity(obs.hole_cards, &obs.community_cards, iterations)
        {
            Ok(e) => e,
            Err(err) => {
                warn!(%err, "equity estimate failed, checking or calling");
                return ActionWeights::only(Action::Call);
            }
        };

        if obs.can_check() {
            return if equity > 0.6 {
                ActionWeights::only(Action::Raise)
            } else {
                ActionWeights::only(Action::Call)
            };
        }
        if equity >= obs.pot_odds() {
            if equity > 0.75 {
                ActionWeights::new(0.0, 0.2, 0.8)
            } else {
                ActionWeights::only(Action::Call)
            }
        } else {
            ActionWeights::only(Action::Fold)
        }
    }
}

impl Default for BaselineStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for BaselineStrategy {
    fn action_weights(&mut self, obs: &Observation, _ctx: &PerturbationContext) -> ActionWeights {
        match obs.street {
            Street::Preflop => Self::preflop_weights(obs),
            _ => self.postflop_weights(obs),
        }
    }

    fn name(&self) -> &str {
        "baseline"
    }
}
