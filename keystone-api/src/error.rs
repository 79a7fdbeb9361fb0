//! Boundary error taxonomy
//!
//! Everything a handler can fail with, mapped onto HTTP statuses and the
//! `{success: false, message}` envelope. Internal causes are logged at
//! conversion time and replaced with a generic message - clients never
//! see store errors, stack traces, or internal identifiers.

use serde_json::{json, Value};
use thiserror::Error;

use keystone_auth::AuthError;
use keystone_resolver::ResolveError;

/// Boundary error types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No valid credential -> 401.
    #[error("Unauthorized")]
    Unauthenticated,

    /// Valid identity, insufficient permission -> 403.
    #[error("Forbidden")]
    Forbidden,

    /// Malformed query or body -> 400.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Referenced module/record absent -> 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The user's tenant could not be resolved -> 400.
    ///
    /// A data-integrity condition, not a client mistake, but surfaced as
    /// a 400 so clients do not retry.
    #[error("Tenant not found for user")]
    TenantUnresolved,

    /// Unexpected failure -> 500 with a generic message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for boundary operations.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Unauthenticated => 401,
            ApiError::Forbidden => 403,
            ApiError::Validation(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::TenantUnresolved => 400,
            ApiError::Internal(_) => 500,
        }
    }

    /// The message safe to put in the response body.
    pub fn client_message(&self) -> String {
        match self {
            // Never leak the internal cause
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// The `{success: false, message}` error envelope.
    pub fn envelope(&self) -> Value {
        json!({
            "success": false,
            "message": self.client_message(),
        })
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Store(cause) => {
                tracing::error!(error = %cause, "directory store failure");
                ApiError::Internal(cause.to_string())
            }
            ResolveError::ModuleNotFound(code) => ApiError::NotFound(format!("module {code}")),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.is_server_error() {
            tracing::error!(error = %err, "authentication subsystem failure");
            return ApiError::Internal(err.to_string());
        }
        match err {
            AuthError::PurposeMismatch => ApiError::Validation("invalid token".to_string()),
            _ => ApiError::Unauthenticated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_resolver::StoreError;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::Unauthenticated.status_code(), 401);
        assert_eq!(ApiError::Forbidden.status_code(), 403);
        assert_eq!(ApiError::Validation("bad".into()).status_code(), 400);
        assert_eq!(ApiError::NotFound("module x".into()).status_code(), 404);
        assert_eq!(ApiError::TenantUnresolved.status_code(), 400);
        assert_eq!(ApiError::Internal("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_internal_detail_never_leaks() {
        let err = ApiError::Internal("connection to 10.0.0.3:5432 refused".to_string());
        let envelope = err.envelope();
        assert_eq!(envelope["success"], false);
        assert_eq!(envelope["message"], "Internal server error");
    }

    #[test]
    fn test_store_error_becomes_internal() {
        let err: ApiError = ResolveError::Store(StoreError("timeout".into())).into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.envelope()["message"], "Internal server error");
    }

    #[test]
    fn test_module_not_found_becomes_404() {
        let err: ApiError = ResolveError::ModuleNotFound("legacy".into()).into();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.envelope()["message"], "Not found: module legacy");
    }

    #[test]
    fn test_auth_errors_become_401() {
        for auth_err in [
            AuthError::TokenExpired,
            AuthError::TokenRevoked,
            AuthError::MissingCredential,
            AuthError::InvalidToken("bad".into()),
        ] {
            let err: ApiError = auth_err.into();
            assert_eq!(err.status_code(), 401);
        }
    }

    #[test]
    fn test_auth_store_failure_becomes_500() {
        let err: ApiError = AuthError::Store("redis down".into()).into();
        assert_eq!(err.status_code(), 500);
    }
}
