//! # Keystone API Boundary
//!
//! The transport-agnostic boundary of the access-control layer: error
//! taxonomy mapped to HTTP statuses, `{success: …}` response envelopes,
//! authentication/permission guards, and the read-only listing endpoints
//! (field permissions, navigation, module catalog).
//!
//! Consumers wire these methods into their HTTP framework of choice; the
//! shapes here are the contract, not the framing. Authentication and
//! permission failures resolve in the guards and never reach business
//! logic; unexpected store failures are logged server-side and surfaced
//! as a generic envelope.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use keystone_api::AccessApi;
//! use keystone_auth::{CredentialSource, InMemorySessionStore, SessionService};
//! use keystone_registry::default_registry;
//! use keystone_resolver::{AccessResolver, InMemoryDirectory};
//!
//! # async fn demo(creds: CredentialSource) {
//! let api = AccessApi::new(
//!     AccessResolver::new(InMemoryDirectory::new()),
//!     SessionService::new(InMemorySessionStore::new()),
//!     default_registry(),
//! );
//!
//! match api.navigation(&creds).await {
//!     Ok(_response) => { /* render the menu */ }
//!     Err(err) => { let (_status, _body) = (err.status_code(), err.envelope()); }
//! }
//! # }
//! ```

pub mod endpoints;
pub mod error;
pub mod guard;

// Re-export main types
pub use endpoints::{
    AccessApi, FieldPermissionsResponse, ModuleCatalogEntry, ModuleCatalogResponse,
    NavigationResponse,
};
pub use error::{ApiError, ApiResult};
pub use guard::{
    require_auth, require_permission, user_has_all_permissions, user_has_any_permission,
    user_has_permission,
};
