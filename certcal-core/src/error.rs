//! Error types for certcal.

use thiserror::Error;

/// Errors that can occur in certcal operations.
#[derive(Error, Debug)]
pub enum CertCalError {
    #[error("Invalid expiry date {value:?} for certificate '{name}'")]
    InvalidExpiry { name: String, value: String },

    #[error("Invalid event UID {0:?}: control characters are not allowed")]
    InvalidUid(String),

    #[error("Duplicate event UID: {0}")]
    DuplicateUid(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CertCalError {
    /// Whether the error was caused by client-supplied data.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CertCalError::InvalidExpiry { .. }
                | CertCalError::InvalidUid(_)
                | CertCalError::DuplicateUid(_)
        )
    }
}

/// Result type alias for certcal operations.
pub type CertCalResult<T> = Result<T, CertCalError>;
