//! # headsup-engine: Heads-Up Hold'em Simulation Core
//!
//! Simulates heads-up No-Limit Texas Hold'em hands between two pluggable
//! strategies and scores the result. Deals are reproducible from a
//! `(base_seed, hand_index)` pair so strategies can be compared on
//! identical cards.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card ids (`0..52`) and the token codec (`"As"`, `"Td"`)
//! - [`deck`] - Deterministic per-hand shuffling with ChaCha20 streams
//! - [`hand`] - Closed-form 7-card evaluation into a total-ordered score
//! - [`equity`] - Monte Carlo equity against a random holding
//! - [`strategy`] - The strategy contract and action distributions
//! - [`rules`] - Raise sizing and all-in call resolution
//! - [`game`] - Per-hand betting state and the street procedure
//! - [`engine`] - Hand simulator and match runner
//! - [`config`] - Table configuration, loadable from TOML
//! - [`logger`] - Streets and per-action history records
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use headsup_engine::cards::parse_cards;
//! use headsup_engine::hand::{evaluate, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let score = evaluate(&cards.try_into().unwrap());
//! assert_eq!(score.category(), Category::StraightFlush);
//! ```
//!
//! ## Deterministic Deals
//!
//! ```rust
//! use headsup_engine::deck::Deck;
//!
//! let a = Deck::for_hand(42, 7).deal_hand().unwrap();
//! let b = Deck::for_hand(42, 7).deal_hand().unwrap();
//! assert_eq!(a, b);
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod equity;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod rules;
pub mod strategy;
