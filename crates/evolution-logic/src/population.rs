//! Live agent set and per-strategy accounting

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::strategy::Strategy;

/// Agent count per strategy for one generation.
///
/// Keys are exactly the active strategy set, including strategies with
/// no members.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PopulationSnapshot {
    counts: BTreeMap<String, u32>,
}

impl PopulationSnapshot {
    pub fn new(counts: BTreeMap<String, u32>) -> Self {
        Self { counts }
    }

    /// Count for `name`, zero if the strategy is not tracked
    pub fn get(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(name, &count)| (name.as_str(), count))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, u32> {
        &self.counts
    }
}

impl FromIterator<(String, u32)> for PopulationSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// The agents of a single generation
#[derive(Clone, Debug, Default)]
pub struct Population {
    agents: Vec<Agent>,
}

impl Population {
    /// Create fresh agents for `distribution`, ids 1..=N in `strategies` order
    pub fn instantiate(strategies: &[Arc<dyn Strategy>], distribution: &PopulationSnapshot) -> Self {
        let capacity = distribution.total() as usize;
        let mut agents = Vec::with_capacity(capacity);

        for strategy in strategies {
            for _ in 0..distribution.get(strategy.name()) {
                let id = agents.len() as u32 + 1;
                agents.push(Agent::new(id, Arc::clone(strategy)));
            }
        }

        Self { agents }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Current head count of every active strategy
    pub fn snapshot(&self, strategies: &[Arc<dyn Strategy>]) -> PopulationSnapshot {
        let mut counts: BTreeMap<String, u32> = strategies
            .iter()
            .map(|s| (s.name().to_string(), 0))
            .collect();
        for agent in &self.agents {
            if let Some(count) = counts.get_mut(agent.strategy_name()) {
                *count += 1;
            }
        }
        PopulationSnapshot::new(counts)
    }

    /// Summed agent scores of every active strategy, in `strategies` order.
    ///
    /// Totals are `u128`: many agents near the per-agent maximum can
    /// exceed `u64` together.
    pub fn scores_by_strategy(&self, strategies: &[Arc<dyn Strategy>]) -> Vec<u128> {
        strategies
            .iter()
            .map(|s| {
                self.agents
                    .iter()
                    .filter(|a| a.strategy_name() == s.name())
                    .map(|a| u128::from(a.score()))
                    .sum()
            })
            .collect()
    }
}
