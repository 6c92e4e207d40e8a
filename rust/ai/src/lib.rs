//! # headsup-ai: Strategies for the Heads-Up Simulator
//!
//! Ready-made [`Strategy`] implementations and a name-keyed registry to
//! build them from configuration or command-line input.
//!
//! ## Core Components
//!
//! - [`StrategyRegistry`] - Maps strategy names to constructors
//! - [`baseline`] - Hand-strength and equity driven strategy
//! - [`random`] - Uniform/jittered random play and a calling station
//! - [`table`] - Preflop lookup tables in the GTOB binary format
//!
//! ## Quick Start
//!
//! ```rust
//! use headsup_ai::StrategyRegistry;
//! use headsup_engine::config::GameConfig;
//! use headsup_engine::engine::HandSimulator;
//! use headsup_engine::strategy::PerturbationContext;
//!
//! let registry = StrategyRegistry::with_builtins();
//! let mut hero = registry.create("calling_station", 1).unwrap();
//! let mut villain = registry.create("random", 2).unwrap();
//!
//! let sim = HandSimulator::new(GameConfig::default()).unwrap();
//! let ctx = [PerturbationContext::default(); 2];
//! let results = sim.run_match(&mut hero, &mut villain, &ctx, 10).unwrap();
//! assert_eq!(results.len(), 10);
//! ```
//!
//! ## Built-in Strategies
//!
//! - `"random"` - Seeded random weights over the legal actions
//! - `"calling_station"` - Always checks or calls
//! - `"baseline"` - Preflop strength score, postflop equity against pot odds
//! - `"preflop_table"` - Preflop weights from a GTOB table; checks down postflop

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

pub use headsup_engine::strategy::Strategy;

pub mod baseline;
pub mod random;
pub mod table;

use baseline::BaselineStrategy;
use random::{CallingStation, RandomStrategy};
use table::{PreflopTable, TableStrategy};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown strategy '{name}'. Available strategies: {}", .available.join(", "))]
    Unknown {
        name: String,
        available: Vec<String>,
    },
}

/// Builds a fresh strategy from a seed.
pub type StrategyFactory = Box<dyn Fn(u64) -> Box<dyn Strategy> + Send + Sync>;

/// Name-keyed constructors for strategies.
///
/// The registry is an ordinary value: build one, register what you need, and
/// pass it to whatever picks strategies by name.
///
/// # Example
///
/// ```rust
/// use headsup_ai::StrategyRegistry;
/// use headsup_ai::random::CallingStation;
///
/// let mut registry = StrategyRegistry::new();
/// registry.register("station", |_seed| Box::new(CallingStation));
/// assert_eq!(registry.names(), vec!["station"]);
/// assert!(registry.create("nope", 0).is_err());
/// ```
#[derive(Default)]
pub struct StrategyRegistry {
    factories: BTreeMap<String, StrategyFactory>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in strategies. `preflop_table` starts with
    /// an empty table; see [`StrategyRegistry::register_table`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("random", |seed| Box::new(RandomStrategy::jittered(seed)));
        registry.register("calling_station", |_| Box::new(CallingStation));
        registry.register("baseline", |seed| Box::new(BaselineStrategy::with_seed(seed)));
        registry.register_table(PreflopTable::default());
        registry
    }

    /// Registers `factory` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(u64) -> Box<dyn Strategy> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            warn!(strategy = %name, "strategy already registered, overwriting");
        }
        debug!(strategy = %name, "registered strategy");
        self.factories.insert(name, Box::new(factory));
    }

    /// Points `preflop_table` at `table`; every created instance shares it.
    pub fn register_table(&mut self, table: PreflopTable) {
        let table = Arc::new(table);
        self.register("preflop_table", move |_| {
            Box::new(TableStrategy::new(Arc::clone(&table)))
        });
    }

    pub fn create(&self, name: &str, seed: u64) -> Result<Box<dyn Strategy>, RegistryError> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory(seed)),
            None => Err(RegistryError::Unknown {
                name: name.to_string(),
                available: self.names().into_iter().map(String::from).collect(),
            }),
        }
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

/// Creates a built-in strategy by name.
///
/// ```rust
/// use headsup_ai::create_strategy;
///
/// let s = create_strategy("baseline", 7).unwrap();
/// assert_eq!(s.name(), "baseline");
/// ```
pub fn create_strategy(name: &str, seed: u64) -> Result<Box<dyn Strategy>, RegistryError> {
    StrategyRegistry::with_builtins().create(name, seed)
}
