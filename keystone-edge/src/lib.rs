//! # Keystone Edge Gate
//!
//! The store-free, pre-authentication path classifier. It runs before
//! any session lookup is possible, so it only ever checks credential
//! *presence* - fine-grained authorization happens downstream once store
//! access is available.
//!
//! The gate's protected-path set is snapshotted from the module registry
//! at construction. That is a deliberate latency/portability trade-off:
//! nothing is looked up live, and the set stays consistent with the
//! registry because it is derived, not hand-maintained. Rebuild the gate
//! whenever the registry changes.
//!
//! ## Usage
//!
//! ```rust
//! use keystone_edge::{EdgeGate, EdgeGateConfig, GateDecision};
//! use keystone_registry::default_registry;
//!
//! let registry = default_registry();
//! let gate = EdgeGate::from_registry(&registry, EdgeGateConfig::default());
//!
//! // Unauthenticated request for a protected page
//! match gate.evaluate("/orders", false) {
//!     GateDecision::Redirect { location } => {
//!         assert_eq!(location, "/login?redirect=/orders");
//!     }
//!     GateDecision::Pass => unreachable!(),
//! }
//! ```

pub mod gate;

pub use gate::{EdgeGate, EdgeGateConfig, GateDecision};
