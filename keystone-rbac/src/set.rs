//! # Permission Sets
//!
//! Union-semantics collections of permissions. A set is the flattened
//! result of every grant a user's active roles carry; membership checks
//! apply the wildcard rules of [`Permission::covers`] and nothing else.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::permission::Permission;

/// A set of permissions held by a user or role.
///
/// Checks succeed on an exact match, the matching module wildcard, or the
/// global wildcard. There is no deny-override and no intersection: merging
/// sets can only widen access.
///
/// # Example
///
/// ```
/// use keystone_rbac::{Action, Permission, PermissionSet};
///
/// let set = PermissionSet::from_codes(["orders:read", "carts:*"]);
///
/// assert!(set.allows_code("orders:read"));
/// assert!(set.allows_code("carts:delete"));
/// assert!(!set.allows_code("orders:delete"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionSet {
    permissions: HashSet<Permission>,
}

impl PermissionSet {
    /// Create a new empty permission set.
    pub fn new() -> Self {
        Self {
            permissions: HashSet::new(),
        }
    }

    /// Build a set from permission code strings.
    ///
    /// Codes that do not parse are skipped; granting malformed codes
    /// silently would be worse than dropping them.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for code in codes {
            if let Some(permission) = Permission::parse(code.as_ref()) {
                set.insert(permission);
            }
        }
        set
    }

    /// Add a permission to the set.
    pub fn insert(&mut self, permission: Permission) {
        self.permissions.insert(permission);
    }

    /// Remove a permission from the set.
    ///
    /// Removes only the literal shape; removing `orders:read` does not
    /// touch an `orders:*` wildcard.
    pub fn remove(&mut self, permission: &Permission) -> bool {
        self.permissions.remove(permission)
    }

    /// Whether the set grants a required permission.
    ///
    /// True iff the set contains the global wildcard, the module wildcard
    /// for the requirement's module, or the exact permission.
    pub fn allows(&self, required: &Permission) -> bool {
        if self.permissions.contains(&Permission::Global) {
            return true;
        }
        if let Some(module) = required.module() {
            if self
                .permissions
                .contains(&Permission::Module(module.to_string()))
            {
                return true;
            }
        }
        self.permissions.contains(required)
    }

    /// Whether the set grants a permission given as a code string.
    ///
    /// Malformed codes are never granted.
    pub fn allows_code(&self, code: &str) -> bool {
        match Permission::parse(code) {
            Some(required) => self.allows(&required),
            None => false,
        }
    }

    /// Whether the set grants at least one of the given codes.
    pub fn allows_any<I, S>(&self, codes: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes.into_iter().any(|code| self.allows_code(code.as_ref()))
    }

    /// Whether the set grants every one of the given codes.
    ///
    /// An empty list is vacuously allowed.
    pub fn allows_all<I, S>(&self, codes: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes.into_iter().all(|code| self.allows_code(code.as_ref()))
    }

    /// Merge another set into this one (union).
    pub fn merge(&mut self, other: &PermissionSet) {
        for permission in &other.permissions {
            self.permissions.insert(permission.clone());
        }
    }

    /// Iterate over the permissions in the set.
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.iter()
    }

    /// All codes in the set, sorted for deterministic output.
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.permissions.iter().map(|p| p.to_string()).collect();
        codes.sort();
        codes
    }

    /// Get the count of permissions.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        let mut set = PermissionSet::new();
        for permission in iter {
            set.insert(permission);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Action;

    #[test]
    fn test_exact_match() {
        let set = PermissionSet::from_codes(["orders:read", "orders:update"]);
        assert!(set.allows_code("orders:read"));
        assert!(set.allows_code("orders:update"));
        assert!(!set.allows_code("orders:delete"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_module_wildcard() {
        let set = PermissionSet::from_codes(["orders:*"]);
        assert!(set.allows_code("orders:read"));
        assert!(set.allows_code("orders:manage_labels"));
        assert!(set.allows_code("orders:*"));
        assert!(!set.allows_code("carts:read"));
    }

    #[test]
    fn test_global_wildcard() {
        let set = PermissionSet::from_codes(["admin:*"]);
        assert!(set.allows_code("orders:read"));
        assert!(set.allows_code("anything:at_all"));
        assert!(set.allows_code("carts:*"));
    }

    #[test]
    fn test_nothing_else_grants() {
        // Property 2: only exact, module-wildcard, and global-wildcard grant.
        let set = PermissionSet::from_codes(["orders:read"]);
        assert!(!set.allows_code("orders:r"));
        assert!(!set.allows_code("orders_archive:read"));
        assert!(!set.allows_code("order:read"));
        assert!(!set.allows_code("orders:read:extra"));
        assert!(!set.allows_code("not-a-code"));
    }

    #[test]
    fn test_scoped_codes_and_wildcard() {
        let set = PermissionSet::from_codes(["settings:*"]);
        assert!(set.allows_code("settings:general:read"));
        assert!(set.allows_code("settings:security:update"));

        let exact = PermissionSet::from_codes(["settings:general:read"]);
        assert!(exact.allows_code("settings:general:read"));
        assert!(!exact.allows_code("settings:general:update"));
        assert!(!exact.allows_code("settings:read"));
    }

    #[test]
    fn test_allows_any_and_all() {
        let set = PermissionSet::from_codes(["orders:read", "carts:*"]);

        assert!(set.allows_any(["products:read", "orders:read"]));
        assert!(!set.allows_any(["products:read", "suppliers:read"]));

        assert!(set.allows_all(["orders:read", "carts:delete"]));
        assert!(!set.allows_all(["orders:read", "products:read"]));
        assert!(set.allows_all(Vec::<&str>::new()));
    }

    #[test]
    fn test_merge_is_union() {
        let mut set = PermissionSet::from_codes(["orders:read"]);
        let other = PermissionSet::from_codes(["carts:read", "orders:read"]);

        set.merge(&other);
        assert_eq!(set.len(), 2);
        assert!(set.allows_code("carts:read"));
    }

    #[test]
    fn test_malformed_codes_skipped() {
        let set = PermissionSet::from_codes(["orders:read", "garbage", ""]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_is_literal() {
        let mut set = PermissionSet::from_codes(["orders:*", "orders:read"]);
        assert!(set.remove(&Permission::of("orders", Action::Read)));
        // The wildcard still grants it
        assert!(set.allows_code("orders:read"));
    }

    #[test]
    fn test_codes_sorted() {
        let set = PermissionSet::from_codes(["orders:read", "admin:*", "carts:*"]);
        assert_eq!(set.codes(), vec!["admin:*", "carts:*", "orders:read"]);
    }
}
