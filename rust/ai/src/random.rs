//! Control-group strategies with no notion of hand strength.

use headsup_engine::player::Action;
use headsup_engine::strategy::{ActionWeights, Observation, PerturbationContext, Strategy};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random play over the legal actions.
///
/// In uniform mode every legal action gets the same weight. In jittered mode
/// each decision draws fresh weights from a seeded generator, so play is
/// random but reproducible.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: Option<ChaCha8Rng>,
}

impl RandomStrategy {
    pub fn uniform() -> Self {
        Self { rng: None }
    }

    pub fn jittered(seed: u64) -> Self {
        Self {
            rng: Some(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl Strategy for RandomStrategy {
    fn action_weights(&mut self, obs: &Observation, _ctx: &PerturbationContext) -> ActionWeights {
        let mut weights = ActionWeights::default();
        for &action in obs.valid_actions {
            let w = match self.rng.as_mut() {
                Some(rng) => rng.random::<f64>(),
                None => 1.0,
            };
            weights = weights.with(action, w);
        }
        weights
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Never folds, never raises.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingStation;

impl Strategy for CallingStation {
    fn action_weights(&mut self, _obs: &Observation, _ctx: &PerturbationContext) -> ActionWeights {
        ActionWeights::only(Action::Call)
    }

    fn name(&self) -> &str {
        "calling_station"
    }
}
