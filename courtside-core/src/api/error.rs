use thiserror::Error;

/// Everything that can go wrong talking to the stats backend.
///
/// Displayable as-is in both the CLI and the TUI status bar.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("backend unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("not found: {endpoint}")]
    NotFound { endpoint: String },

    #[error("unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("backend calls suspended after repeated failures (circuit breaker open)")]
    CircuitOpen,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::NetworkUnreachable(_) | ApiError::Timeout(_) => true,
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
