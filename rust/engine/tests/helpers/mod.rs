#![allow(dead_code)]

use headsup_engine::cards::{parse_cards, Card};
use headsup_engine::player::Action;
use headsup_engine::strategy::{ActionWeights, Observation, PerturbationContext, Strategy};

pub fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).expect("valid card list")
}

pub fn seven(s: &str) -> [Card; 7] {
    cards(s).try_into().expect("exactly seven cards")
}

/// Returns the same weights on every decision.
pub struct Fixed {
    pub weights: ActionWeights,
    pub label: &'static str,
}

impl Fixed {
    pub fn always(action: Action) -> Self {
        Self {
            weights: ActionWeights::only(action),
            label: "fixed",
        }
    }

    pub fn uniform() -> Self {
        Self {
            weights: ActionWeights::uniform(),
            label: "uniform",
        }
    }
}

impl Strategy for Fixed {
    fn action_weights(&mut self, _: &Observation, _: &PerturbationContext) -> ActionWeights {
        self.weights
    }

    fn name(&self) -> &str {
        self.label
    }
}

/// Plays a scripted list of actions, then calls; records every observation.
pub struct Scripted {
    pub script: Vec<Action>,
    pub seen: Vec<Observation>,
}

impl Scripted {
    pub fn new(script: &[Action]) -> Self {
        Self {
            script: script.iter().rev().copied().collect(),
            seen: Vec::new(),
        }
    }
}

impl Strategy for Scripted {
    fn action_weights(&mut self, obs: &Observation, _: &PerturbationContext) -> ActionWeights {
        self.seen.push(obs.clone());
        ActionWeights::only(self.script.pop().unwrap_or(Action::Call))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
