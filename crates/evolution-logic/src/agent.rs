//! A single player within one generation

use std::sync::Arc;

use crate::strategy::{Move, Round, Strategy};

/// Identity, strategy, running score and private round history.
///
/// Agents live for exactly one generation. The history is append-only and
/// is only extended by the game the agent is currently playing.
#[derive(Clone, Debug)]
pub struct Agent {
    id: u32,
    strategy: Arc<dyn Strategy>,
    score: u64,
    history: Vec<Round>,
}

impl Agent {
    pub fn new(id: u32, strategy: Arc<dyn Strategy>) -> Self {
        Self {
            id,
            strategy,
            score: 0,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn strategy(&self) -> &Arc<dyn Strategy> {
        &self.strategy
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn history(&self) -> &[Round] {
        &self.history
    }

    /// Ask the strategy for the next move given this agent's own history
    pub fn choose_move(&self) -> Move {
        self.strategy.decide(&self.history)
    }

    /// Record a finished round and the points it earned
    pub(crate) fn record(&mut self, own: Move, opponent: Move, points: u32) {
        self.score += u64::from(points);
        self.history.push(Round::new(own, opponent));
    }

    #[cfg(test)]
    pub(crate) fn with_score(mut self, score: u64) -> Self {
        self.score = score;
        self
    }
}
