//! # Keystone Module Registry
//!
//! The declarative catalog of the admin application's modules, shared by
//! the route resolver, the edge gate, and the navigation/catalog listing
//! endpoints.
//!
//! ## Overview
//!
//! The keystone-registry crate handles:
//! - **Module descriptors**: routes, navigation metadata, API endpoint
//!   metadata, and declared permission codes per module
//! - **The registry**: an immutable index built once at process start
//! - **The default catalog**: the Keystone back-office modules
//!
//! The registry is the single source of truth that keeps the edge gate's
//! static protected-path list, the navigation UI, and the permission
//! resolver's module vocabulary consistent. A module added here must also
//! have its permission codes and field definitions present in the
//! directory store, or resolution for that module degrades to
//! default-deny.
//!
//! ## Usage
//!
//! ```rust
//! use keystone_registry::{default_registry, ModuleRegistry};
//!
//! let registry = default_registry();
//! assert!(registry.module("orders").is_some());
//! assert!(registry.protected_paths().contains("/orders"));
//! ```

pub mod defaults;
pub mod module;
pub mod registry;

// Re-export main types for convenience
pub use defaults::default_registry;
pub use module::{EndpointDescriptor, HttpMethod, ModuleDescriptor, NavEntry, RouteDescriptor};
pub use registry::{ModuleRegistry, RegistryBuilder, RegistryError};
