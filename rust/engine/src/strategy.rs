//! The contract between the betting engine and decision-making agents.
//!
//! A [`Strategy`] sees an [`Observation`] of its own seat plus the caller's
//! [`PerturbationContext`] and answers with unnormalized [`ActionWeights`].
//! The engine turns those into an [`ActionDistribution`] and samples it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cards::Card;
use crate::errors::GameError;
use crate::logger::Street;
use crate::player::{Action, Position};

/// Tolerance used when checking that probabilities sum to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Everything the acting seat is allowed to see.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub hole_cards: [Card; 2],
    pub community_cards: Vec<Card>,
    pub position: Position,
    pub pot_size: u32,
    pub stack_size: u32,
    pub to_call: u32,
    pub street: Street,
    pub valid_actions: &'static [Action],
    /// Big blind in chips, for strategies that reason in bb units.
    pub big_blind: u32,
}

impl Observation {
    pub fn can_check(&self) -> bool {
        self.to_call == 0
    }

    /// Fraction of the final pot the caller must put in: `to_call / (pot + to_call)`.
    pub fn pot_odds(&self) -> f64 {
        if self.to_call == 0 {
            return 0.0;
        }
        self.to_call as f64 / (self.pot_size as f64 + self.to_call as f64)
    }

    pub fn pot_in_bb(&self) -> f64 {
        self.pot_size as f64 / self.big_blind.max(1) as f64
    }
}

/// Caller-supplied knobs that perturb a strategy's play.
///
/// The engine never interprets these; it hands them through to the strategy
/// on every decision. Each knob lives in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerturbationContext {
    pub range_distortion: f64,
    pub action_entropy: f64,
    pub ev_floor: f64,
}

impl PerturbationContext {
    pub fn new(range_distortion: f64, action_entropy: f64, ev_floor: f64) -> Result<Self, GameError> {
        let ctx = Self {
            range_distortion,
            action_entropy,
            ev_floor,
        };
        ctx.validate()?;
        Ok(ctx)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        for (field, value) in [
            ("range_distortion", self.range_distortion),
            ("action_entropy", self.action_entropy),
            ("ev_floor", self.ev_floor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GameError::InvalidPerturbation {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// EV floor expressed in big blinds, in `[-10, 0]`.
    pub fn ev_floor_bb(&self) -> f64 {
        self.ev_floor * -10.0
    }
}

/// Unnormalized, per-action weights as returned by a strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionWeights([f64; 3]);

impl ActionWeights {
    pub fn new(fold: f64, call: f64, raise: f64) -> Self {
        Self([fold, call, raise])
    }

    pub fn only(action: Action) -> Self {
        let mut w = Self::default();
        w.0[action.index()] = 1.0;
        w
    }

    pub fn uniform() -> Self {
        Self([1.0; 3])
    }

    pub fn with(mut self, action: Action, weight: f64) -> Self {
        self.0[action.index()] = weight;
        self
    }

    pub fn get(&self, action: Action) -> f64 {
        self.0[action.index()]
    }
}

/// Normalized probabilities over {Fold, Call, Raise}.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionDistribution([f64; 3]);

impl ActionDistribution {
    /// Strict constructor: every probability must be finite and non-negative
    /// and they must sum to one within [`PROBABILITY_TOLERANCE`].
    pub fn new(fold: f64, call: f64, raise: f64) -> Result<Self, GameError> {
        let p = [fold, call, raise];
        if p.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(GameError::InvalidDistribution {
                reason: format!("negative or non-finite probability in {:?}", p),
            });
        }
        let sum: f64 = p.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(GameError::InvalidDistribution {
                reason: format!("probabilities sum to {}", sum),
            });
        }
        Ok(Self(p))
    }

    pub fn certain(action: Action) -> Self {
        let mut p = [0.0; 3];
        p[action.index()] = 1.0;
        Self(p)
    }

    /// Lenient constructor used on strategy output.
    ///
    /// Weights for actions outside `valid` and negative or non-finite weights
    /// are dropped. If nothing positive remains the result is a certain Call.
    pub fn from_weights(weights: ActionWeights, valid: &[Action]) -> Self {
        let mut p = [0.0; 3];
        for &a in valid {
            let w = weights.get(a);
            if w.is_finite() && w > 0.0 {
                p[a.index()] = w;
            }
        }
        let total: f64 = p.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            warn!(?weights, "degenerate strategy output, falling back to call");
            return Self::certain(Action::Call);
        }
        for v in p.iter_mut() {
            *v /= total;
        }
        Self(p)
    }

    pub fn probability(&self, action: Action) -> f64 {
        self.0[action.index()]
    }

    /// Inverse-CDF sample over Fold, Call, Raise in that order.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Action {
        let r: f64 = rng.random();
        let mut cum = 0.0;
        for a in Action::ALL {
            let p = self.probability(a);
            cum += p;
            if p > 0.0 && r < cum {
                return a;
            }
        }
        // rounding left r above the last bucket
        Action::ALL
            .into_iter()
            .rev()
            .find(|&a| self.probability(a) > 0.0)
            .unwrap_or(Action::Call)
    }
}

/// A pluggable decision maker for one seat.
///
/// # Example Implementation
///
/// ```rust
/// use headsup_engine::player::Action;
/// use headsup_engine::strategy::{ActionWeights, Observation, PerturbationContext, Strategy};
///
/// struct AlwaysRaise;
///
/// impl Strategy for AlwaysRaise {
///     fn action_weights(&mut self, _obs: &Observation, _ctx: &PerturbationContext) -> ActionWeights {
///         ActionWeights::only(Action::Raise)
///     }
///
///     fn name(&self) -> &str {
///         "always_raise"
///     }
/// }
/// ```
pub trait Strategy: Send {
    /// Weights for each action in `observation.valid_actions`. They need not
    /// be normalized; an all-zero answer is played as a call.
    fn action_weights(
        &mut self,
        observation: &Observation,
        context: &PerturbationContext,
    ) -> ActionWeights;

    /// Identifier used in logs and by the registry.
    fn name(&self) -> &str;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn action_weights(
        &mut self,
        observation: &Observation,
        context: &PerturbationContext,
    ) -> ActionWeights {
        (**self).action_weights(observation, context)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
