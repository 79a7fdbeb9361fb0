//! # Keystone Authentication
//!
//! Identity and token verification for the Keystone admin platform.
//!
//! ## Overview
//!
//! The keystone-auth crate handles:
//! - **Credentials**: bearer extraction from header or cookie (header wins)
//! - **Sessions**: opaque, revocable tokens backed by a [`SessionStore`];
//!   only SHA-256 digests are persisted
//! - **Verification tokens**: stateless, purpose-scoped signed tokens for
//!   out-of-band flows (email verification, password reset, invitations)
//!
//! Session verification is deliberately silent: a failed check yields
//! `None` and the reason is logged, never surfaced to the client. This
//! keeps credential probing uninformative.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use keystone_auth::{CredentialSource, InMemorySessionStore, SessionService};
//! use uuid::Uuid;
//!
//! # async fn demo() -> keystone_auth::AuthResult<()> {
//! let sessions = SessionService::new(InMemorySessionStore::new());
//!
//! let token = sessions.issue(Uuid::now_v7()).await?;
//! let creds = CredentialSource::from_header(format!("Bearer {token}"));
//! assert!(sessions.verify(&creds).await.is_some());
//!
//! sessions.revoke(&token).await?;
//! assert!(sessions.verify(&creds).await.is_none());
//! # Ok(())
//! # }
//! ```
//!
//! ### Verification tokens
//!
//! ```rust
//! use keystone_auth::{TokenPurpose, VerificationService};
//!
//! let service = VerificationService::with_secret("a-32-byte-minimum-signing-secret!");
//! let token = service.issue("user@example.com").unwrap();
//! let email = service.verify(&token, TokenPurpose::EmailVerification).unwrap();
//! assert_eq!(email, "user@example.com");
//! ```

pub mod credential;
pub mod error;
pub mod session;
pub mod verification;

// Re-export main types
pub use credential::CredentialSource;
pub use error::{AuthError, AuthResult};
pub use session::{
    hash_token, InMemorySessionStore, SessionConfig, SessionRecord, SessionService, SessionStore,
};
pub use verification::{TokenPurpose, VerificationClaims, VerificationConfig, VerificationService};
