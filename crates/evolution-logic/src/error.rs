//! Error types for configuration and simulation

use thiserror::Error;

use crate::strategy::Move;

/// Problems detected before any generation is played.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("player_count must be even, got {0}")]
    OddPlayerCount(u32),

    #[error("player_count must be positive")]
    ZeroPlayers,

    #[error("at least one active strategy is required")]
    EmptyStrategySet,

    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("strategy listed more than once in active set: {0}")]
    DuplicateStrategy(String),

    #[error("strategy already registered: {0}")]
    DuplicateRegistration(String),

    #[error("initial distribution sums to {actual}, expected player_count {expected}")]
    DistributionMismatch { expected: u32, actual: u64 },

    #[error("initial distribution names a strategy outside the active set: {0}")]
    DistributionOutsideActiveSet(String),

    #[error("payoff table is missing ({0:?}, {1:?})")]
    IncompletePayoffTable(Move, Move),

    #[error("payoff table defines ({0:?}, {1:?}) more than once")]
    DuplicatePayoffEntry(Move, Move),

    #[error("invalid configuration JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Errors raised by the engine.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Selection is undefined when no strategy scored a single point.
    #[error("grand total score is zero in generation {generation}; reallocation undefined")]
    DegenerateState { generation: u32 },

    #[error("operation not valid in engine state {0:?}")]
    InvalidState(crate::engine::EngineState),
}

pub type Result<T, E = SimulationError> = std::result::Result<T, E>;
