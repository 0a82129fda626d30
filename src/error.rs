//! Error types for engine configuration and setup.
//!
//! Rules operations never fail: illegal moves are reported through
//! `MoveOutcome`/`Option`. Only building a game from outside input can.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Scenario id outside the known set
    #[error("Unknown scenario id: {0} (valid ids are 1-11)")]
    UnknownScenario(u8),

    /// Search depth must be positive
    #[error("Invalid search depth {depth} for {side}: depth must be at least 1")]
    InvalidDepth { side: String, depth: u32 },

    /// Unrecognized side name
    #[error("Invalid side: {0:?} (expected \"w\" or \"b\")")]
    InvalidSide(String),

    /// Unrecognized control mode
    #[error("Invalid player type: {0:?} (expected \"human\" or \"engine\")")]
    InvalidControl(String),

    /// Board text that does not describe an 8x8 position
    #[error("Invalid board layout: {0}")]
    InvalidBoard(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
