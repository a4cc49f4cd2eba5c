//! Scheduler error types

use thiserror::Error;

/// Result type for scheduler construction
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Errors raised by the scheduler itself, as opposed to backend failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    /// A scheduler needs at least one backend
    #[error("At least one backend is required")]
    NoBackends,

    /// The scoring policy failed validation
    #[error("Invalid scoring policy: {0}")]
    InvalidPolicy(String),
}
