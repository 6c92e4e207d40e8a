use thiserror::Error;

use crate::cards::Card;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card: rank '{rank}', suit '{suit}'")]
    InvalidCard { rank: char, suit: char },
    #[error("Invalid card token: {token:?}")]
    InvalidCardToken { token: String },
    #[error("Invalid card id: {id} (expected 0..52)")]
    InvalidCardId { id: u8 },
    #[error("Card {card} appears more than once")]
    DuplicateCard { card: Card },
    #[error("Board has {len} cards, at most 5 allowed")]
    InvalidBoard { len: usize },
    #[error("Iteration count must be positive")]
    InvalidIterations,
    #[error("Invalid action distribution: {reason}")]
    InvalidDistribution { reason: String },
    #[error("Perturbation field {field} must be in [0, 1], got {value}")]
    InvalidPerturbation { field: &'static str, value: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Deck exhausted")]
    DeckExhausted,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] GameError),
}
