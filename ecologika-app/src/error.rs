//! Application error types

use ecologika_client::ClientError;
use shared::MarketError;
use thiserror::Error;

/// Application core error type
///
/// Workflow methods return this; recoverable cases are converted into
/// notices at the call site instead of propagating to the view layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Market(#[from] MarketError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether retrying the same operation can succeed without the user
    /// changing anything (transient backend/network conditions).
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Client(ClientError::Http(_)) => true,
            AppError::Client(ClientError::Backend(_)) => true,
            AppError::Market(err) => err.code == shared::ErrorCode::BackendError,
            _ => false,
        }
    }
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;
