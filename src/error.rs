//! Error types for the trainer.
//!
//! Configuration errors are fatal to a round and propagate to the caller.
//! Answer errors are recoverable: the round stays in the input phase and the
//! learner sees a message. Persistence errors are reported by the store and
//! swallowed by whoever calls it.

use thiserror::Error;

/// A setting outside the range the trainer can work with.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("digit count must be between 1 and 9, got {0}")]
    DigitCount(u8),

    #[error("display time must be between 0.1 and 5.0 seconds, got {0}")]
    DisplayTime(f64),

    #[error("a session needs at least one example")]
    TotalExamples,

    #[error("series count must be at least 1")]
    SeriesCount,
}

/// Why a typed answer was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("answer is empty")]
    EmptyInput,

    #[error("answer is not a whole number")]
    InvalidFormat,
}

impl AnswerError {
    /// Dictionary key of the message shown to the learner.
    pub fn message_key(&self) -> &'static str {
        match self {
            AnswerError::EmptyInput => "errors.emptyAnswer",
            AnswerError::InvalidFormat => "errors.invalidAnswer",
        }
    }
}

/// Settings storage failures.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("settings storage unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("settings could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors that end a round.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrainerError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}
