use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, GameError};
use crate::player::{BIG_BLIND, SMALL_BLIND, STARTING_STACK};

/// Largest accepted starting stack. Both stacks together must fit in a
/// `u32` pot.
pub const MAX_STARTING_STACK: u32 = u32::MAX / 2;

/// Table and simulation parameters shared by every hand of a match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    /// Both stacks are reset to this at the start of every hand.
    pub starting_stack: u32,
    /// Deals are seeded by `(base_seed, hand_index)`.
    pub base_seed: u64,
    /// A pot above `pot_limit_multiple * starting_stack` aborts the hand.
    pub pot_limit_multiple: u32,
    /// Alternate the button by hand index in [`crate::engine::HandSimulator::run_match`].
    pub alternate_button: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            small_blind: SMALL_BLIND,
            big_blind: BIG_BLIND,
            starting_stack: STARTING_STACK,
            base_seed: 42,
            pot_limit_multiple: 2,
            alternate_button: true,
        }
    }
}

impl GameConfig {
    /// Reads a TOML file; missing keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let f: FileConfig = toml::from_str(s)?;
        let mut cfg = GameConfig::default();
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
        }
        if let Some(v) = f.base_seed {
            cfg.base_seed = v;
        }
        if let Some(v) = f.pot_limit_multiple {
            cfg.pot_limit_multiple = v;
        }
        if let Some(v) = f.alternate_button {
            cfg.alternate_button = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.small_blind == 0 {
            return Err(GameError::InvalidConfig("small_blind must be >0".into()));
        }
        if self.big_blind < self.small_blind {
            return Err(GameError::InvalidConfig(
                "big_blind must be >= small_blind".into(),
            ));
        }
        if self.starting_stack <= self.big_blind {
            return Err(GameError::InvalidConfig(
                "starting_stack must exceed big_blind".into(),
            ));
        }
        if self.starting_stack > MAX_STARTING_STACK {
            return Err(GameError::InvalidConfig(format!(
                "starting_stack must be <= {}",
                MAX_STARTING_STACK
            )));
        }
        if self.pot_limit_multiple == 0 {
            return Err(GameError::InvalidConfig(
                "pot_limit_multiple must be >=1".into(),
            ));
        }
        Ok(())
    }

    pub fn pot_limit(&self) -> u64 {
        self.pot_limit_multiple as u64 * self.starting_stack as u64
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    base_seed: Option<u64>,
    #[serde(default)]
    pot_limit_multiple: Option<u32>,
    #[serde(default)]
    alternate_button: Option<bool>,
}
