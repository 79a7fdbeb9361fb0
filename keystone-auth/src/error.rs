//! Error types for authentication operations
//!
//! Covers session verification, verification-token validation, and store
//! failures. Handlers map these onto the generic envelope; the variants
//! exist so server-side logs stay precise while clients learn nothing.

use thiserror::Error;

/// Authentication error types.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token has expired
    #[error("Token has expired")]
    TokenExpired,

    /// Token has been revoked server-side
    #[error("Token has been revoked")]
    TokenRevoked,

    /// Token is invalid (unknown, malformed, bad signature, wrong
    /// issuer/audience)
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// No credential was presented
    #[error("No credential presented")]
    MissingCredential,

    /// A verification token carried the wrong purpose claim
    #[error("Token purpose mismatch")]
    PurposeMismatch,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Token store failure
    #[error("Session store error: {0}")]
    Store(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Check if this error should be logged at error level.
    ///
    /// Expected failures (bad or expired tokens) are not server errors.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            AuthError::ConfigError(_) | AuthError::Store(_) | AuthError::Internal(_)
        )
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::TokenExpired
            | AuthError::TokenRevoked
            | AuthError::InvalidToken(_)
            | AuthError::MissingCredential => 401,

            AuthError::PurposeMismatch => 400,

            AuthError::ConfigError(_) | AuthError::Store(_) | AuthError::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::TokenRevoked => "TOKEN_REVOKED",
            AuthError::InvalidToken(_) => "INVALID_TOKEN",
            AuthError::MissingCredential => "MISSING_CREDENTIAL",
            AuthError::PurposeMismatch => "PURPOSE_MISMATCH",
            AuthError::ConfigError(_) => "CONFIG_ERROR",
            AuthError::Store(_) => "STORE_ERROR",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
