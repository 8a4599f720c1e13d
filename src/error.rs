//! Error types for device registry synchronization.

use thiserror::Error;

use crate::types::ErrorKind;

/// Result type alias for registry sync operations.
pub type Result<T> = std::result::Result<T, RegistrySyncError>;

/// Failures a single [`RegistryGateway`](crate::RegistryGateway) call can
/// produce.
///
/// Per-device problems inside an otherwise-accepted bulk call travel in the
/// [`BulkResult`](crate::BulkResult) instead; an `Err` from a bulk call
/// means the whole batch was rejected.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The requested device is not registered
    #[error("device '{0}' is not registered")]
    NotFound(String),

    /// The registry rejected the caller's credentials
    #[error("registry authorization failed: {0}")]
    Unauthorized(String),

    /// The registry throttled the request
    #[error("registry throttled the request: {0}")]
    Throttled(String),

    /// The registry could not be reached
    #[error("registry transport error: {0}")]
    Transport(String),
}

impl GatewayError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Classify this failure the way bulk results classify per-device
    /// errors, so a failed fetch can be reported alongside them.
    pub fn error_kind(&self) -> ErrorKind {
        match self {
            GatewayError::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Other,
        }
    }
}

/// Errors surfaced to the caller of the sync service.
///
/// Per-device problems and unusable requests are not errors at this level:
/// they travel in [`OperationError`](crate::OperationError) lists and
/// [`BatchOutcome`](crate::BatchOutcome) respectively. An `Err` here means
/// the batch never completed.
#[derive(Debug, Error)]
pub enum RegistrySyncError {
    /// A registry call failed outright, aborting the batch
    #[error("registry gateway error: {0}")]
    Gateway(#[from] GatewayError),
}
