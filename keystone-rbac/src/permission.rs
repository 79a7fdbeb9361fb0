//! # Permissions
//!
//! The closed algebra of grant shapes. A permission is one of three
//! variants: an exact module/action grant, a per-module wildcard, or the
//! global wildcard. Matching is a pure function over these variants, so a
//! stray substring can never widen access.

use serde::{Deserialize, Serialize};

use crate::actions::Action;

/// Reserved pseudo-module used by the global wildcard (`admin:*`).
///
/// It is not a catalog module; it exists only so the global wildcard has a
/// stable spelling.
pub const GLOBAL_MODULE: &str = "admin";

/// A single permission grant.
///
/// The wire form is `<module>:<action>`, `<module>:*`, or `admin:*`. The
/// action segment of [`Permission::Grant`] may itself be scoped (e.g.
/// `settings:general:read` has module `settings` and action
/// `general:read`) - the module wildcard still covers it, the global
/// wildcard covers everything, and nothing else does.
///
/// # Example
///
/// ```
/// use keystone_rbac::{Action, Permission};
///
/// let read = Permission::of("orders", Action::Read);
/// assert_eq!(read.to_string(), "orders:read");
///
/// let all_orders = Permission::parse("orders:*").unwrap();
/// assert!(all_orders.covers(&read));
/// assert!(!read.covers(&all_orders));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "String", try_from = "String")]
pub enum Permission {
    /// `admin:*` - grants everything.
    Global,

    /// `<module>:*` - grants every action within one module.
    Module(String),

    /// `<module>:<action>` - grants exactly one (possibly scoped) action.
    Grant {
        /// Module code (first code segment).
        module: String,
        /// Action path (everything after the first `:`).
        action: String,
    },
}

impl Permission {
    /// Create an exact grant from a module code and a vocabulary action.
    pub fn of(module: impl Into<String>, action: Action) -> Self {
        Permission::Grant {
            module: module.into(),
            action: action.as_str().to_string(),
        }
    }

    /// Create an exact grant with a scoped action path.
    ///
    /// Used for sub-codes such as `settings:general:read`, whose action
    /// segment is not part of the [`Action`] vocabulary.
    pub fn scoped(module: impl Into<String>, action: impl Into<String>) -> Self {
        Permission::Grant {
            module: module.into(),
            action: action.into(),
        }
    }

    /// Create a per-module wildcard (`<module>:*`).
    pub fn module_wildcard(module: impl Into<String>) -> Self {
        Permission::Module(module.into())
    }

    /// Parse a permission code.
    ///
    /// Returns `None` for anything that is not `module:action`,
    /// `module:*`, or `admin:*` with non-empty segments.
    ///
    /// # Example
    ///
    /// ```
    /// use keystone_rbac::Permission;
    ///
    /// assert_eq!(Permission::parse("admin:*"), Some(Permission::Global));
    /// assert_eq!(
    ///     Permission::parse("carts:*"),
    ///     Some(Permission::Module("carts".to_string()))
    /// );
    /// assert!(Permission::parse("settings:general:read").is_some());
    /// assert_eq!(Permission::parse("orders"), None);
    /// assert_eq!(Permission::parse(":read"), None);
    /// ```
    pub fn parse(code: &str) -> Option<Self> {
        let (module, action) = code.split_once(':')?;
        if module.is_empty() || action.is_empty() {
            return None;
        }

        if action == "*" {
            if module == GLOBAL_MODULE {
                return Some(Permission::Global);
            }
            return Some(Permission::Module(module.to_string()));
        }

        Some(Permission::Grant {
            module: module.to_string(),
            action: action.to_string(),
        })
    }

    /// The module segment, or `None` for the global wildcard.
    pub fn module(&self) -> Option<&str> {
        match self {
            Permission::Global => None,
            Permission::Module(module) => Some(module),
            Permission::Grant { module, .. } => Some(module),
        }
    }

    /// Whether this grant covers a required permission.
    ///
    /// - the global wildcard covers everything;
    /// - a module wildcard covers any requirement within that module;
    /// - an exact grant covers only itself.
    pub fn covers(&self, required: &Permission) -> bool {
        match self {
            Permission::Global => true,
            Permission::Module(module) => required.module() == Some(module.as_str()),
            Permission::Grant { .. } => self == required,
        }
    }

    /// Whether this is one of the two wildcard shapes.
    pub fn is_wildcard(&self) -> bool {
        !matches!(self, Permission::Grant { .. })
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::Global => write!(f, "{}:*", GLOBAL_MODULE),
            Permission::Module(module) => write!(f, "{}:*", module),
            Permission::Grant { module, action } => write!(f, "{}:{}", module, action),
        }
    }
}

impl From<Permission> for String {
    fn from(permission: Permission) -> Self {
        permission.to_string()
    }
}

impl TryFrom<String> for Permission {
    type Error = String;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Permission::parse(&code).ok_or_else(|| format!("invalid permission code: {code}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shapes() {
        assert_eq!(Permission::parse("admin:*"), Some(Permission::Global));
        assert_eq!(
            Permission::parse("orders:*"),
            Some(Permission::Module("orders".to_string()))
        );
        assert_eq!(
            Permission::parse("orders:read"),
            Some(Permission::Grant {
                module: "orders".to_string(),
                action: "read".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_scoped_action() {
        let perm = Permission::parse("settings:general:read").unwrap();
        assert_eq!(
            perm,
            Permission::Grant {
                module: "settings".to_string(),
                action: "general:read".to_string(),
            }
        );
        assert_eq!(perm.module(), Some("settings"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(Permission::parse("orders"), None);
        assert_eq!(Permission::parse(""), None);
        assert_eq!(Permission::parse(":read"), None);
        assert_eq!(Permission::parse("orders:"), None);
    }

    #[test]
    fn test_display_round_trip() {
        for code in ["admin:*", "orders:*", "orders:read", "settings:general:read"] {
            let perm = Permission::parse(code).unwrap();
            assert_eq!(perm.to_string(), code);
        }
    }

    #[test]
    fn test_global_covers_everything() {
        let global = Permission::Global;
        assert!(global.covers(&Permission::of("orders", Action::Delete)));
        assert!(global.covers(&Permission::module_wildcard("carts")));
        assert!(global.covers(&Permission::Global));
    }

    #[test]
    fn test_module_wildcard_scope() {
        let wildcard = Permission::module_wildcard("settings");
        assert!(wildcard.covers(&Permission::of("settings", Action::Read)));
        assert!(wildcard.covers(&Permission::parse("settings:general:read").unwrap()));
        assert!(!wildcard.covers(&Permission::of("orders", Action::Read)));
        // A module wildcard never grants the global one
        assert!(!wildcard.covers(&Permission::Global));
    }

    #[test]
    fn test_exact_grant_is_exact() {
        let read = Permission::of("orders", Action::Read);
        assert!(read.covers(&Permission::of("orders", Action::Read)));
        assert!(!read.covers(&Permission::of("orders", Action::Update)));
        assert!(!read.covers(&Permission::module_wildcard("orders")));
        // No substring matching: "orders" does not cover "orders_archive"
        assert!(!read.covers(&Permission::of("orders_archive", Action::Read)));
    }

    #[test]
    fn test_serde_string_form() {
        let perm = Permission::of("orders", Action::Read);
        let json = serde_json::to_string(&perm).unwrap();
        assert_eq!(json, "\"orders:read\"");

        let back: Permission = serde_json::from_str("\"admin:*\"").unwrap();
        assert_eq!(back, Permission::Global);

        let bad: Result<Permission, _> = serde_json::from_str("\"nonsense\"");
        assert!(bad.is_err());
    }
}
