//! Provider error types and handling

use crate::scheduler::SchedulerError;
use thiserror::Error;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors that can occur when calling a backend
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Network or connection error
    #[error("Network error: {0}")]
    Network(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        retry_after_secs: Option<u64>,
    },

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Backend returned an error
    #[error("Backend error: {code}: {message}")]
    Backend { code: String, message: String },

    /// Timeout occurred
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Response parsing error
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Service unavailable
    #[error("Service temporarily unavailable: {0}")]
    ServiceUnavailable(String),

    /// Call completed but the result itself reports a failure
    #[error("Backend reported an error result: {0}")]
    ErrorResult(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The combined model could not be built
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Whether retrying the same request elsewhere can plausibly succeed.
    ///
    /// Failover does not consult this; every error advances to the next
    /// backend. Callers layering their own retries on top can use it.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::RateLimit { .. } => true,
            Self::Timeout(_) => true,
            Self::ServiceUnavailable(_) => true,
            Self::ModelNotFound(_) => true,
            Self::ErrorResult(_) => true,
            Self::Backend { .. } => true,
            Self::Authentication(_) => false,
            Self::InvalidRequest(_) => false,
            Self::ParseError(_) => false,
            Self::Configuration(_) => false,
            Self::Scheduler(_) => false,
            Self::Other(_) => false,
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(ProviderError::Timeout(30).is_retryable());
        assert!(ProviderError::ErrorResult("finish reason error".into()).is_retryable());
        assert!(!ProviderError::Authentication("bad key".into()).is_retryable());
        assert!(!ProviderError::Scheduler(SchedulerError::NoBackends).is_retryable());
    }

    #[test]
    fn test_scheduler_error_is_transparent() {
        let err: ProviderError = SchedulerError::NoBackends.into();
        assert_eq!(err.to_string(), "At least one backend is required");
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(ProviderError::from(err), ProviderError::ParseError(_)));
    }
}
