//! Engine configuration
//!
//! Supplied by whatever front end drives the engine, usually as JSON.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::payoff::PayoffTable;
use crate::population::PopulationSnapshot;
use crate::registry::StrategyRegistry;
use crate::strategy::Strategy;

/// Everything needed to run a simulation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Strategy names taking part, in tie-break order
    pub active_strategies: Vec<String>,
    /// Total agents per generation (positive, even)
    pub player_count: u32,
    pub payoff_table: PayoffTable,
    /// Generations to play; 0 only builds the initial population
    pub generation_count: u32,
    /// Rounds in every pairwise game
    pub rounds_per_game: u32,
    /// Explicit starting head counts; even split when absent
    pub initial_distribution: Option<BTreeMap<String, u32>>,
    /// Seed for the pairing RNG
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            active_strategies: ["AllCooperate", "AllDefect", "TitForTat", "TitForTwoTats"]
                .into_iter()
                .map(String::from)
                .collect(),
            player_count: 120,
            payoff_table: PayoffTable::default(),
            generation_count: 20,
            rounds_per_game: 100,
            initial_distribution: None,
            seed: 0,
        }
    }
}

/// A configuration whose strategies have been resolved and whose
/// starting distribution is known to be consistent.
///
/// Only [`SimulationConfig::validate`] can produce one.
#[derive(Clone, Debug)]
pub struct ValidatedConfig {
    pub(crate) strategies: Vec<Arc<dyn Strategy>>,
    pub(crate) player_count: u32,
    pub(crate) payoff_table: PayoffTable,
    pub(crate) generation_count: u32,
    pub(crate) rounds_per_game: u32,
    pub(crate) initial_distribution: PopulationSnapshot,
    pub(crate) seed: u64,
}

impl ValidatedConfig {
    pub fn strategies(&self) -> &[Arc<dyn Strategy>] {
        &self.strategies
    }

    pub fn player_count(&self) -> u32 {
        self.player_count
    }

    pub fn payoff_table(&self) -> &PayoffTable {
        &self.payoff_table
    }

    pub fn generation_count(&self) -> u32 {
        self.generation_count
    }

    pub fn rounds_per_game(&self) -> u32 {
        self.rounds_per_game
    }

    pub fn initial_distribution(&self) -> &PopulationSnapshot {
        &self.initial_distribution
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl SimulationConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every input invariant and resolve strategy names
    pub fn validate(&self, registry: &StrategyRegistry) -> Result<ValidatedConfig, ConfigError> {
        if self.player_count == 0 {
            return Err(ConfigError::ZeroPlayers);
        }
        if self.player_count % 2 != 0 {
            return Err(ConfigError::OddPlayerCount(self.player_count));
        }
        if self.active_strategies.is_empty() {
            return Err(ConfigError::EmptyStrategySet);
        }

        let mut seen = HashSet::new();
        let mut strategies = Vec::with_capacity(self.active_strategies.len());
        for name in &self.active_strategies {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateStrategy(name.clone()));
            }
            strategies.push(registry.resolve(name)?);
        }

        let initial_distribution = match &self.initial_distribution {
            Some(explicit) => self.explicit_distribution(explicit)?,
            None => self.even_split(),
        };

        Ok(ValidatedConfig {
            strategies,
            player_count: self.player_count,
            payoff_table: self.payoff_table,
            generation_count: self.generation_count,
            rounds_per_game: self.rounds_per_game,
            initial_distribution,
            seed: self.seed,
        })
    }

    fn explicit_distribution(
        &self,
        explicit: &BTreeMap<String, u32>,
    ) -> Result<PopulationSnapshot, ConfigError> {
        if let Some(stray) = explicit
            .keys()
            .find(|name| !self.active_strategies.contains(name))
        {
            return Err(ConfigError::DistributionOutsideActiveSet(stray.clone()));
        }

        let actual: u64 = explicit.values().map(|&c| u64::from(c)).sum();
        if actual != u64::from(self.player_count) {
            return Err(ConfigError::DistributionMismatch {
                expected: self.player_count,
                actual,
            });
        }

        Ok(self
            .active_strategies
            .iter()
            .map(|name| (name.clone(), explicit.get(name).copied().unwrap_or(0)))
            .collect())
    }

    /// Equal shares; leftover agents go one each to the first strategies listed
    fn even_split(&self) -> PopulationSnapshot {
        let n = self.active_strategies.len() as u32;
        let base = self.player_count / n;
        let remainder = self.player_count % n;

        self.active_strategies
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let extra = u32::from((i as u32) < remainder);
                (name.clone(), base + extra)
            })
            .collect()
    }
}
