use thiserror::Error;

use crate::store::StoreError;

/// Application-wide error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing, malformed or oversized input. Reported verbatim.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Best-effort uniqueness violation (e.g. an already subscribed email).
    #[error("{0}")]
    Duplicate(String),

    /// The content store call failed for a reason other than not-found.
    ///
    /// Only `message` reaches the caller; `source` is logged.
    #[error("{message}")]
    Upstream {
        message: String,
        #[source]
        source: StoreError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build a mapper for `Result::map_err` that logs the store failure and
    /// wraps it with a caller-facing message.
    pub fn upstream(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| {
            tracing::error!("{message} ({source})");
            AppError::Upstream {
                message: message.to_string(),
                source,
            }
        }
    }
}

/// Helper conversion from anyhow::Error
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
