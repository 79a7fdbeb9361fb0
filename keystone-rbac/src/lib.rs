//! # Keystone RBAC (Role-Based Access Control)
//!
//! This crate provides the permission algebra for the Keystone admin
//! platform, shared by the resolver, registry, and API crates.
//!
//! ## Overview
//!
//! The keystone-rbac crate handles:
//! - **Actions**: the fixed vocabulary of operations on a module
//! - **Permissions**: a small closed algebra of grant shapes
//! - **Permission Sets**: union-semantics collections held by a user
//! - **Field Access**: per-field visibility/editability flags
//!
//! ## Architecture
//!
//! ```text
//! Permission = module:action | module:* | admin:*
//!
//! Examples:
//!   "orders:read"       - Read access to the orders module
//!   "orders:*"          - Every action within the orders module
//!   "admin:*"           - Everything, globally
//! ```
//!
//! Matching is a pure function over the three shapes above. There is no
//! substring matching and no action implication: a set allows a code iff
//! the exact code, the module wildcard, or the global wildcard is present.
//!
//! ## Usage
//!
//! ```rust
//! use keystone_rbac::{Action, Permission, PermissionSet};
//!
//! let mut set = PermissionSet::new();
//! set.insert(Permission::of("orders", Action::Read));
//! set.insert(Permission::module_wildcard("products"));
//!
//! assert!(set.allows_code("orders:read"));
//! assert!(set.allows_code("products:delete")); // via products:*
//! assert!(!set.allows_code("orders:delete"));
//! ```
//!
//! ## Super administrator
//!
//! The reserved role code [`SUPER_ADMIN`] is recognized by the resolver
//! crate and short-circuits every permission and field check. It never
//! needs explicit grants and is deliberately not expressible as a
//! permission code.

pub mod actions;
pub mod field;
pub mod permission;
pub mod set;

// Re-export main types for convenience
pub use actions::Action;
pub use field::FieldAccess;
pub use permission::{Permission, GLOBAL_MODULE};
pub use set::PermissionSet;

/// Reserved role code that bypasses all permission and field checks.
///
/// Wherever this code appears among a user's active roles, resolution
/// short-circuits to universal allow. The literal role list is still
/// reported for auditing.
pub const SUPER_ADMIN: &str = "SUPER_ADMIN";
