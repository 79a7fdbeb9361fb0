//! Session tokens and the revocable token store
//!
//! Sessions are opaque random tokens handed to the client; the store
//! persists only their SHA-256 digest together with expiry and revocation
//! state, so a leaked store never yields usable credentials. Revocation is
//! server-side: flipping `revoked_at` invalidates the token everywhere on
//! the next check.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::credential::CredentialSource;
use crate::error::{AuthError, AuthResult};

/// Digest a raw session token for storage or lookup.
///
/// SHA-256, base64url without padding.
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

/// A persisted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// The authenticated user.
    pub user_id: Uuid,

    /// Digest of the opaque token (never the token itself).
    pub token_hash: String,

    /// When the session was issued.
    pub issued_at: DateTime<Utc>,

    /// When the session expires.
    pub expires_at: DateTime<Utc>,

    /// Server-side invalidation timestamp, if revoked.
    pub revoked_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// Whether the session has expired as of `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the session has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Whether the session is usable as of `now`.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired(now) && !self.is_revoked()
    }
}

/// Persisted, revocable token store.
///
/// Implementations are read-mostly: `find` runs on every authenticated
/// request, `insert`/`revoke` only on login/logout.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Look up a session by token digest.
    async fn find(&self, token_hash: &str) -> AuthResult<Option<SessionRecord>>;

    /// Persist a new session.
    async fn insert(&self, record: SessionRecord) -> AuthResult<()>;

    /// Revoke a session by token digest.
    ///
    /// Returns `true` if a live session was revoked.
    async fn revoke(&self, token_hash: &str) -> AuthResult<bool>;
}

/// In-memory [`SessionStore`].
///
/// Reference implementation used by tests and single-node deployments;
/// production consumers back the trait with their own store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    records: RwLock<HashMap<String, SessionRecord>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn find(&self, token_hash: &str) -> AuthResult<Option<SessionRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| AuthError::Store("session store lock poisoned".to_string()))?;
        Ok(records.get(token_hash).cloned())
    }

    async fn insert(&self, record: SessionRecord) -> AuthResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| AuthError::Store("session store lock poisoned".to_string()))?;
        records.insert(record.token_hash.clone(), record);
        Ok(())
    }

    async fn revoke(&self, token_hash: &str) -> AuthResult<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|_| AuthError::Store("session store lock poisoned".to_string()))?;
        match records.get_mut(token_hash) {
            Some(record) if record.revoked_at.is_none() => {
                record.revoked_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Session service configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Name of the session cookie consumers should read.
    pub cookie_name: String,

    /// Session lifetime.
    pub ttl: Duration,

    /// Length of generated tokens (alphanumeric characters).
    pub token_length: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "keystone_session".to_string(),
            ttl: Duration::hours(12),
            token_length: 48,
        }
    }
}

/// Issues and verifies opaque session tokens.
///
/// Verification is silent: [`SessionService::verify`] returns `None` on
/// any failure and logs the reason, so callers cannot distinguish an
/// unknown token from a revoked one.
pub struct SessionService<S> {
    store: S,
    config: SessionConfig,
}

impl<S: SessionStore> SessionService<S> {
    /// Create a session service with the default configuration.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: SessionConfig::default(),
        }
    }

    /// Create a session service with an explicit configuration.
    pub fn with_config(store: S, config: SessionConfig) -> Self {
        Self { store, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Issue a new session for a user.
    ///
    /// Returns the raw token to hand to the client; only its digest is
    /// stored.
    pub async fn issue(&self, user_id: Uuid) -> AuthResult<String> {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.config.token_length)
            .map(char::from)
            .collect();

        let now = Utc::now();
        let record = SessionRecord {
            user_id,
            token_hash: hash_token(&token),
            issued_at: now,
            expires_at: now + self.config.ttl,
            revoked_at: None,
        };
        self.store.insert(record).await?;

        Ok(token)
    }

    /// Verify the credential on a request.
    ///
    /// Returns the user id for a live session, `None` otherwise. Failure
    /// reasons are logged and never surfaced.
    pub async fn verify(&self, credentials: &CredentialSource) -> Option<Uuid> {
        let token = match credentials.bearer() {
            Some(token) => token,
            None => {
                tracing::debug!("no bearer credential presented");
                return None;
            }
        };

        match self.verify_token(token).await {
            Ok(user_id) => Some(user_id),
            Err(err) => {
                if err.is_server_error() {
                    tracing::error!(error = %err, "session verification failed");
                } else {
                    tracing::debug!(reason = err.error_code(), "session rejected");
                }
                None
            }
        }
    }

    /// Verify a raw token, with explicit failure reasons.
    pub async fn verify_token(&self, token: &str) -> AuthResult<Uuid> {
        let record = self
            .store
            .find(&hash_token(token))
            .await?
            .ok_or_else(|| AuthError::InvalidToken("unknown session token".to_string()))?;

        if record.is_revoked() {
            return Err(AuthError::TokenRevoked);
        }
        if record.is_expired(Utc::now()) {
            return Err(AuthError::TokenExpired);
        }

        Ok(record.user_id)
    }

    /// Revoke a session by raw token.
    pub async fn revoke(&self, token: &str) -> AuthResult<bool> {
        self.store.revoke(&hash_token(token)).await
    }
}
