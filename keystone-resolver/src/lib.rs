//! # Keystone Access Resolver
//!
//! Store-backed resolution for the Keystone admin platform: which roles a
//! user currently holds, which permissions those roles add up to, what
//! each data field looks like to that user, and where the user may land.
//!
//! ## Overview
//!
//! The keystone-resolver crate handles:
//! - **Directory models**: users, roles, role assignments, module/field
//!   catalog rows, field grants
//! - **The `DirectoryStore` trait**: the read-only lookup seam to the
//!   persistent store, with an in-memory reference implementation
//! - **Role & permission resolution**: active roles under tenant scoping,
//!   flattened permission sets, the `SUPER_ADMIN` short-circuit
//! - **Field aggregation**: per-field visibility/editability OR-ed across
//!   every active role
//! - **Route resolution**: the first accessible route and the filtered
//!   navigation list
//!
//! All operations are read-only and idempotent: resolving twice against
//! unchanged data returns identical output. Nothing here caches; callers
//! may, with their own invalidation signal.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use keystone_resolver::{AccessResolver, InMemoryDirectory};
//! use uuid::Uuid;
//!
//! # async fn demo(directory: InMemoryDirectory, user_id: Uuid) {
//! let resolver = AccessResolver::new(directory);
//!
//! let perms = resolver.effective_permissions(user_id, None).await.unwrap();
//! if perms.allows_code("orders:read") {
//!     // shape the response for this user
//! }
//! # }
//! ```

pub mod error;
pub mod fields;
pub mod models;
pub mod resolver;
pub mod routes;
pub mod store;

// Re-export main types for convenience
pub use error::ResolveError;
pub use fields::{FieldPermission, ModuleFieldReport};
pub use models::{
    FieldGrant, FieldRecord, ModuleRecord, Role, RoleAssignment, RoleStatus, UserRecord,
};
pub use resolver::{AccessResolver, EffectivePermissions};
pub use routes::{first_route_for, navigation_for, DEFAULT_LANDING_ROUTE};
pub use store::{DirectoryStore, InMemoryDirectory, StoreError};
