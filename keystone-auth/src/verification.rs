//! Purpose-scoped verification tokens
//!
//! Stateless signed tokens for out-of-band flows: email verification,
//! password reset, invitations. Unlike sessions these are never stored;
//! validity comes from the signature, the issuer/audience claims, the
//! expiry, and a `purpose` claim that MUST match the flow consuming the
//! token - a cryptographically valid reset token is useless for email
//! verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// What a verification token is allowed to be used for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Confirming ownership of an email address.
    EmailVerification,

    /// Authorizing a password reset.
    PasswordReset,

    /// Accepting an invitation to a tenant.
    Invitation,
}

impl TokenPurpose {
    /// Get the string representation of the purpose.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::EmailVerification => "email_verification",
            TokenPurpose::PasswordReset => "password_reset",
            TokenPurpose::Invitation => "invitation",
        }
    }
}

/// Claims carried by a verification token.
///
/// Standard JWT claims plus the `purpose` discriminator. The subject is
/// the email address the flow is about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationClaims {
    /// Email address (subject).
    pub sub: String,

    /// Issuer.
    pub iss: String,

    /// Audience.
    pub aud: String,

    /// What this token may be used for.
    pub purpose: TokenPurpose,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Unique token id.
    pub jti: String,
}

/// Verification token configuration.
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// HMAC signing secret.
    pub secret: String,

    /// Token issuer.
    pub issuer: String,

    /// Token audience.
    pub audience: String,

    /// Default validity in hours.
    pub default_ttl_hours: i64,
}

impl VerificationConfig {
    /// Create a configuration with the platform defaults.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: "keystone-admin".to_string(),
            audience: "keystone-admin-web".to_string(),
            default_ttl_hours: 24,
        }
    }

    /// Set the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Set the audience.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Set the default validity.
    pub fn with_default_ttl_hours(mut self, hours: i64) -> Self {
        self.default_ttl_hours = hours;
        self
    }
}

/// Issues and verifies purpose-scoped tokens.
pub struct VerificationService {
    config: VerificationConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for VerificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .field("keys", &"[REDACTED]")
            .finish()
    }
}

impl VerificationService {
    /// Create a service from a configuration (HS256).
    pub fn new(config: VerificationConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Create with a secret and default settings.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self::new(VerificationConfig::new(secret))
    }

    /// Get the configuration.
    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Issue an email-verification token with the default validity.
    pub fn issue(&self, email: impl Into<String>) -> AuthResult<String> {
        self.issue_for(
            email,
            TokenPurpose::EmailVerification,
            self.config.default_ttl_hours,
        )
    }

    /// Issue a token for an explicit purpose and validity.
    pub fn issue_for(
        &self,
        email: impl Into<String>,
        purpose: TokenPurpose,
        ttl_hours: i64,
    ) -> AuthResult<String> {
        let now = Utc::now();
        let claims = VerificationClaims {
            sub: email.into(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            purpose,
            iat: now.timestamp(),
            exp: (now + Duration::hours(ttl_hours)).timestamp(),
            jti: Uuid::now_v7().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("token encoding failed: {e}")))
    }

    /// Verify a token and return the embedded email address.
    ///
    /// Rejects tokens whose signature, issuer, audience, or expiry fail,
    /// and tokens carrying the wrong `purpose` - even when otherwise
    /// valid.
    pub fn verify(&self, token: &str, expected: TokenPurpose) -> AuthResult<String> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);

        let token_data = decode::<VerificationClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AuthError::InvalidToken("Malformed token".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AuthError::InvalidToken("Invalid signature".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AuthError::InvalidToken("Invalid issuer".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                    AuthError::InvalidToken("Invalid audience".to_string())
                }
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        if token_data.claims.purpose != expected {
            return Err(AuthError::PurposeMismatch);
        }

        Ok(token_data.claims.sub)
    }
}
