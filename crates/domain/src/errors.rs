//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Operation requires at least one turn in the log
    #[error("Conversation log is empty")]
    EmptyLog,

    /// A pending-turn token no longer matches the log's pending entry
    #[error("Pending turn is stale: {0}")]
    StalePendingTurn(String),

    /// Font scale outside the supported range
    #[error("Invalid font scale: {percent}% (supported range {min}%-{max}%)")]
    InvalidFontScale {
        percent: u16,
        min: u16,
        max: u16,
    },
}
