//! The edge route gate
//!
//! Per-request rules, evaluated in order with zero store access:
//!
//! 1. registration path while registration is disabled -> redirect to login
//! 2. protected, non-public path without a session cookie -> redirect to
//!    login carrying the original path as a return target
//! 3. everything else passes through unchanged; in particular, a public
//!    path with a session cookie passes - redirect-to-landing needs store
//!    access and is deferred to the API layer

use std::collections::BTreeSet;

use keystone_registry::ModuleRegistry;

/// Gate configuration.
#[derive(Debug, Clone)]
pub struct EdgeGateConfig {
    /// Whether self-registration is administratively enabled.
    pub registration_enabled: bool,

    /// Name of the session cookie (presence-only check).
    pub cookie_name: String,

    /// Login page path.
    pub login_path: String,

    /// Registration page path.
    pub register_path: String,

    /// Additional public paths beyond login/registration.
    pub public_paths: Vec<String>,
}

impl Default for EdgeGateConfig {
    fn default() -> Self {
        Self {
            registration_enabled: false,
            cookie_name: "keystone_session".to_string(),
            login_path: "/login".to_string(),
            register_path: "/register".to_string(),
            public_paths: Vec::new(),
        }
    }
}

impl EdgeGateConfig {
    /// Enable self-registration.
    pub fn with_registration_enabled(mut self, enabled: bool) -> Self {
        self.registration_enabled = enabled;
        self
    }

    /// Add a public path.
    pub fn with_public_path(mut self, path: impl Into<String>) -> Self {
        self.public_paths.push(path.into());
        self
    }
}

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through unchanged.
    Pass,

    /// Redirect the request.
    Redirect {
        /// Redirect target, possibly carrying a `redirect` return target.
        location: String,
    },
}

impl GateDecision {
    /// Whether this decision redirects.
    pub fn is_redirect(&self) -> bool {
        matches!(self, GateDecision::Redirect { .. })
    }
}

/// The store-free path classifier.
///
/// Holds a static snapshot of the registry's protected paths; evaluating
/// a request touches nothing but this struct.
#[derive(Debug, Clone)]
pub struct EdgeGate {
    config: EdgeGateConfig,
    protected: BTreeSet<String>,
}

impl EdgeGate {
    /// Build a gate from the registry's current route set.
    ///
    /// Must be rebuilt whenever the registry changes; the protected set
    /// is derived here, once, not looked up live.
    pub fn from_registry(registry: &ModuleRegistry, config: EdgeGateConfig) -> Self {
        Self {
            config,
            protected: registry.protected_paths(),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &EdgeGateConfig {
        &self.config
    }

    /// Whether a path is in the protected snapshot (prefix-aware).
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected
            .iter()
            .any(|protected| path_matches(protected, path))
    }

    /// Whether a path is public.
    ///
    /// Login is always public; registration only while enabled; plus any
    /// configured extras.
    pub fn is_public(&self, path: &str) -> bool {
        if path_matches(&self.config.login_path, path) {
            return true;
        }
        if self.config.registration_enabled && path_matches(&self.config.register_path, path) {
            return true;
        }
        self.config
            .public_paths
            .iter()
            .any(|public| path_matches(public, path))
    }

    /// Classify one request.
    ///
    /// `has_session_cookie` is presence only - the cookie's validity is
    /// checked downstream where the store is reachable.
    pub fn evaluate(&self, path: &str, has_session_cookie: bool) -> GateDecision {
        // Registration switched off: always back to login
        if path_matches(&self.config.register_path, path) && !self.config.registration_enabled {
            return GateDecision::Redirect {
                location: self.config.login_path.clone(),
            };
        }

        if !self.is_public(path) && self.is_protected(path) && !has_session_cookie {
            return GateDecision::Redirect {
                location: format!("{}?redirect={}", self.config.login_path, path),
            };
        }

        GateDecision::Pass
    }
}

/// Segment-aware prefix match: `/orders` matches `/orders` and
/// `/orders/123`, never `/orders-archive`.
fn path_matches(base: &str, path: &str) -> bool {
    path == base
        || (path.len() > base.len()
            && path.starts_with(base)
            && path.as_bytes()[base.len()] == b'/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_registry::default_registry;

    fn gate() -> EdgeGate {
        EdgeGate::from_registry(&default_registry(), EdgeGateConfig::default())
    }

    #[test]
    fn test_protected_without_cookie_redirects_with_return_target() {
        let gate = gate();
        assert_eq!(
            gate.evaluate("/orders", false),
            GateDecision::Redirect {
                location: "/login?redirect=/orders".to_string()
            }
        );
        // Sub-paths of a protected route are protected too
        assert_eq!(
            gate.evaluate("/orders/123/edit", false),
            GateDecision::Redirect {
                location: "/login?redirect=/orders/123/edit".to_string()
            }
        );
    }

    #[test]
    fn test_protected_with_cookie_passes_without_store() {
        let gate = gate();
        assert_eq!(gate.evaluate("/orders", true), GateDecision::Pass);
    }

    #[test]
    fn test_registration_disabled_always_redirects() {
        let gate = gate();
        // Regardless of credential presence
        assert_eq!(
            gate.evaluate("/register", false),
            GateDecision::Redirect {
                location: "/login".to_string()
            }
        );
        assert_eq!(
            gate.evaluate("/register", true),
            GateDecision::Redirect {
                location: "/login".to_string()
            }
        );
    }

    #[test]
    fn test_registration_enabled_is_public() {
        let gate = EdgeGate::from_registry(
            &default_registry(),
            EdgeGateConfig::default().with_registration_enabled(true),
        );
        assert_eq!(gate.evaluate("/register", false), GateDecision::Pass);
    }

    #[test]
    fn test_public_with_cookie_passes_unchanged() {
        // Redirect-to-landing is the API layer's job, not the gate's
        let gate = gate();
        assert_eq!(gate.evaluate("/login", true), GateDecision::Pass);
        assert_eq!(gate.evaluate("/login", false), GateDecision::Pass);
    }

    #[test]
    fn test_unclassified_path_passes() {
        let gate = gate();
        assert_eq!(gate.evaluate("/healthz", false), GateDecision::Pass);
    }

    #[test]
    fn test_prefix_matching_is_segment_aware() {
        let gate = gate();
        assert!(gate.is_protected("/orders/123"));
        assert!(!gate.is_protected("/orders-archive"));
    }

    #[test]
    fn test_every_auth_route_is_in_protected_snapshot() {
        // Registry/gate drift property: routes requiring auth must all be
        // classified protected by the gate derived from the registry.
        let registry = default_registry();
        let gate = EdgeGate::from_registry(&registry, EdgeGateConfig::default());

        for route in registry.all_routes() {
            if route.requires_auth {
                assert!(
                    gate.is_protected(&route.path),
                    "route {} escaped the protected snapshot",
                    route.path
                );
                assert!(gate.evaluate(&route.path, false).is_redirect());
            }
        }
    }

    #[test]
    fn test_extra_public_paths() {
        let gate = EdgeGate::from_registry(
            &default_registry(),
            EdgeGateConfig::default().with_public_path("/status"),
        );
        assert!(gate.is_public("/status"));
        assert_eq!(gate.evaluate("/status", false), GateDecision::Pass);
    }
}
