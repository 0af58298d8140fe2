//! Generation loop
//!
//! ```text
//! Uninitialized --initialize--> Ready --step--> Running --last step--> Done
//! ```
//!
//! Every generation pairs the agents at random, plays one game per pair,
//! records the head counts, and then reallocates the population in
//! proportion to each strategy's aggregate score.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{SimulationConfig, ValidatedConfig};
use crate::error::{Result, SimulationError};
use crate::game::play_game;
use crate::pairing::random_matching;
use crate::population::{Population, PopulationSnapshot};
use crate::registry::StrategyRegistry;
use crate::selection::next_distribution;

/// Engine lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Uninitialized,
    Ready,
    Running,
    Done,
}

/// Per-strategy head counts over time.
///
/// Entry `g` of every series is generation `g`'s population before it was
/// reallocated, so index 0 is the initial distribution.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationHistory {
    series: BTreeMap<String, Vec<u32>>,
}

impl SimulationHistory {
    fn for_strategies<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            series: names
                .into_iter()
                .map(|name| (name.to_string(), Vec::new()))
                .collect(),
        }
    }

    fn record(&mut self, snapshot: &PopulationSnapshot) {
        for (name, counts) in self.series.iter_mut() {
            counts.push(snapshot.get(name));
        }
    }

    /// Counts for one strategy, oldest first
    pub fn series(&self, name: &str) -> Option<&[u32]> {
        self.series.get(name).map(Vec::as_slice)
    }

    /// Number of generations recorded
    pub fn generations(&self) -> usize {
        self.series.values().next().map_or(0, Vec::len)
    }

    /// Snapshot for generation `index`
    pub fn snapshot(&self, index: usize) -> Option<PopulationSnapshot> {
        if index >= self.generations() {
            return None;
        }
        Some(
            self.series
                .iter()
                .map(|(name, counts)| (name.clone(), counts[index]))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.series
            .iter()
            .map(|(name, counts)| (name.as_str(), counts.as_slice()))
    }

    pub fn as_map(&self) -> &BTreeMap<String, Vec<u32>> {
        &self.series
    }
}

/// How a run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Completion {
    /// All configured generations were played
    Complete,
    /// A stop was requested; `generation` was discarded unplayed
    Cancelled { generation: u32 },
    /// Nobody scored in `generation`, so no further reallocation was possible
    Degenerate { generation: u32 },
}

/// Final result of a run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub history: SimulationHistory,
    pub final_snapshot: PopulationSnapshot,
    pub completion: Completion,
}

impl SimulationOutcome {
    pub fn is_complete(&self) -> bool {
        self.completion == Completion::Complete
    }
}

/// Summary of one played generation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generation: u32,
    /// Agent ids of every game played
    pub pairs: Vec<(u32, u32)>,
    /// Population that played this generation
    pub snapshot: PopulationSnapshot,
    /// Aggregate score per strategy
    pub scores: BTreeMap<String, u128>,
    /// Population of the following generation
    pub next: PopulationSnapshot,
}

/// Cloneable flag for aborting a run from elsewhere
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Drives a simulation generation by generation
pub struct SimulationEngine {
    config: ValidatedConfig,
    rng: StdRng,
    state: EngineState,
    population: Population,
    current: PopulationSnapshot,
    history: SimulationHistory,
    generation: u32,
}

impl SimulationEngine {
    /// Validate `config` against `registry`. Nothing is played yet.
    pub fn new(config: &SimulationConfig, registry: &StrategyRegistry) -> Result<Self> {
        let config = config.validate(registry)?;
        Ok(Self::from_validated(config))
    }

    /// Build from a config that [`SimulationConfig::validate`] already accepted
    pub fn from_validated(config: ValidatedConfig) -> Self {
        let history = SimulationHistory::for_strategies(config.strategies.iter().map(|s| s.name()));
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            current: config.initial_distribution.clone(),
            state: EngineState::Uninitialized,
            population: Population::default(),
            history,
            generation: 0,
            config,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Generations played so far
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn history(&self) -> &SimulationHistory {
        &self.history
    }

    /// Distribution of the population about to play (or the last one played,
    /// after a degenerate generation)
    pub fn current_snapshot(&self) -> &PopulationSnapshot {
        &self.current
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Instantiate the initial population
    pub fn initialize(&mut self) -> Result<()> {
        if self.state != EngineState::Uninitialized {
            return Err(SimulationError::InvalidState(self.state));
        }

        self.population = Population::instantiate(&self.config.strategies, &self.current);
        self.state = if self.config.generation_count == 0 {
            EngineState::Done
        } else {
            EngineState::Ready
        };

        if !self.config.payoff_table.has_positive_outcome() {
            warn!("payoff table never awards points; the first generation will be degenerate");
        }

        info!(
            players = self.config.player_count,
            strategies = self.config.strategies.len(),
            generations = self.config.generation_count,
            rounds_per_game = self.config.rounds_per_game,
            seed = self.config.seed,
            "simulation initialized"
        );
        Ok(())
    }

    /// Play one full generation
    pub fn step(&mut self) -> Result<GenerationReport> {
        match self.play_generation(None)? {
            Some(report) => Ok(report),
            None => Err(SimulationError::InvalidState(self.state)),
        }
    }

    /// Play every remaining generation
    pub fn run(self) -> Result<SimulationOutcome> {
        self.run_until_stopped(&StopHandle::new())
    }

    /// Play every remaining generation unless `stop` is raised first
    ///
    /// Configuration problems are returned as errors. A degenerate generation
    /// or a stop request ends the run early with the history gathered so far.
    pub fn run_until_stopped(mut self, stop: &StopHandle) -> Result<SimulationOutcome> {
        if self.state == EngineState::Uninitialized {
            self.initialize()?;
        }

        while self.state != EngineState::Done {
            match self.play_generation(Some(stop)) {
                Ok(Some(_)) => {}
                Ok(None) => {
                    warn!(generation = self.generation, "simulation stopped on request");
                    let generation = self.generation;
                    return Ok(self.into_outcome(Completion::Cancelled { generation }));
                }
                Err(SimulationError::DegenerateState { generation }) => {
                    warn!(generation, "all scores zero, ending simulation early");
                    return Ok(self.into_outcome(Completion::Degenerate { generation }));
                }
                Err(e) => return Err(e),
            }
        }

        info!(generations = self.generation, "simulation complete");
        Ok(self.into_outcome(Completion::Complete))
    }

    fn into_outcome(self, completion: Completion) -> SimulationOutcome {
        SimulationOutcome {
            history: self.history,
            final_snapshot: self.current,
            completion,
        }
    }

    /// Returns `None` if `stop` was raised before the generation finished;
    /// the partial generation is thrown away.
    fn play_generation(&mut self, stop: Option<&StopHandle>) -> Result<Option<GenerationReport>> {
        match self.state {
            EngineState::Ready | EngineState::Running => {}
            state => return Err(SimulationError::InvalidState(state)),
        }
        self.state = EngineState::Running;

        let stopped = || stop.is_some_and(StopHandle::is_stop_requested);
        if stopped() {
            return Ok(None);
        }

        let generation = self.generation;
        let pairs = random_matching(self.population.agents_mut(), &mut self.rng)?;
        debug!(generation, pairs = pairs.len(), "agents paired");

        let table = self.config.payoff_table;
        let rounds = self.config.rounds_per_game;
        let mut interrupted = false;
        for pair in self.population.agents_mut().chunks_exact_mut(2) {
            if stopped() {
                interrupted = true;
                break;
            }
            if let [a, b] = pair {
                play_game(a, b, &table, rounds);
            }
        }

        if interrupted || stopped() {
            self.population = Population::instantiate(&self.config.strategies, &self.current);
            return Ok(None);
        }

        let snapshot = self.population.snapshot(&self.config.strategies);
        self.history.record(&snapshot);
        self.generation += 1;

        let names: Vec<&str> = self.config.strategies.iter().map(|s| s.name()).collect();
        let scores = self.population.scores_by_strategy(&self.config.strategies);

        let next = match next_distribution(&names, &scores, self.config.player_count, generation) {
            Ok(next) => next,
            Err(e) => {
                self.state = EngineState::Done;
                return Err(e);
            }
        };

        debug!(generation, ?scores, next = ?next.as_map(), "population reallocated");

        self.population = Population::instantiate(&self.config.strategies, &next);
        self.current = next.clone();
        if self.generation >= self.config.generation_count {
            self.state = EngineState::Done;
        }

        Ok(Some(GenerationReport {
            generation,
            pairs,
            snapshot,
            scores: names
                .iter()
                .map(|name| name.to_string())
                .zip(scores)
                .collect(),
            next,
        }))
    }
}
