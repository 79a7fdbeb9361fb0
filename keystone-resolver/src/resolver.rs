//! Role and permission resolution
//!
//! Computes the set of roles a user currently holds and flattens their
//! grants into one [`PermissionSet`]. Aggregation is a pure union: no
//! deny-override, no intersection, no inheritance through
//! `parent_role_id`. The reserved `SUPER_ADMIN` code short-circuits to
//! universal allow while still reporting the literal role list.

use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

use keystone_rbac::{Permission, PermissionSet};

use crate::error::ResolveError;
use crate::models::{Role, RoleStatus};
use crate::store::DirectoryStore;

/// The outcome of permission resolution for one user.
///
/// Computed fresh per logical request; nothing here is persisted. The
/// `roles` list is always the literal active role set, even under the
/// super-admin short-circuit, so audit trails stay truthful.
#[derive(Debug, Clone)]
pub struct EffectivePermissions {
    /// Active roles, priority-descending then by code.
    pub roles: Vec<Role>,

    /// Whether the super-admin short-circuit is active.
    pub super_admin: bool,

    set: PermissionSet,
}

impl EffectivePermissions {
    /// Build from resolved parts (used by the resolver and by tests).
    pub fn new(roles: Vec<Role>, super_admin: bool, set: PermissionSet) -> Self {
        Self {
            roles,
            super_admin,
            set,
        }
    }

    /// Whether the user may do what `required` describes.
    pub fn allows(&self, required: &Permission) -> bool {
        self.super_admin || self.set.allows(required)
    }

    /// Whether the user may do what a code string describes.
    ///
    /// Malformed codes are only granted under the super-admin
    /// short-circuit, which bypasses parsing entirely.
    pub fn allows_code(&self, code: &str) -> bool {
        self.super_admin || self.set.allows_code(code)
    }

    /// Whether at least one of the codes is granted.
    pub fn allows_any<I, S>(&self, codes: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.super_admin || self.set.allows_any(codes)
    }

    /// Whether every one of the codes is granted.
    pub fn allows_all<I, S>(&self, codes: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.super_admin || self.set.allows_all(codes)
    }

    /// The flattened permission set (empty under super-admin).
    pub fn permission_set(&self) -> &PermissionSet {
        &self.set
    }

    /// Granted codes, sorted (empty under super-admin).
    pub fn codes(&self) -> Vec<String> {
        self.set.codes()
    }

    /// Active role codes, for auditing.
    pub fn role_codes(&self) -> Vec<String> {
        self.roles.iter().map(|role| role.code.clone()).collect()
    }

    /// IDs of the active roles.
    pub fn role_ids(&self) -> Vec<Uuid> {
        self.roles.iter().map(|role| role.id).collect()
    }
}

/// Store-backed access resolution.
///
/// Stateless besides the store handle; safe to share across concurrent
/// requests.
#[derive(Debug)]
pub struct AccessResolver<S> {
    store: S,
}

impl<S: DirectoryStore> AccessResolver<S> {
    /// Create a resolver over a directory store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The roles contributing to resolution for this user right now.
    ///
    /// Keeps assignments that are active and unexpired, joined to roles
    /// with `active` status. With a tenant, global roles and roles scoped
    /// to that tenant are kept - a role scoped to the user's own tenant
    /// is never dropped. Without a tenant, no tenant filter applies.
    ///
    /// Output is deterministic: priority descending, code as tie-breaker,
    /// duplicates collapsed.
    pub async fn active_roles(
        &self,
        user_id: Uuid,
        tenant_id: Option<Uuid>,
    ) -> Result<Vec<Role>, ResolveError> {
        let now = Utc::now();
        let assignments = self.store.assignments_for_user(user_id).await?;

        let mut seen = HashSet::new();
        let role_ids: Vec<Uuid> = assignments
            .iter()
            .filter(|assignment| assignment.is_current(now))
            .map(|assignment| assignment.role_id)
            .filter(|role_id| seen.insert(*role_id))
            .collect();

        let mut roles: Vec<Role> = self
            .store
            .roles_by_ids(&role_ids)
            .await?
            .into_iter()
            .filter(|role| role.status == RoleStatus::Active)
            .filter(|role| match (tenant_id, role.tenant_id) {
                (Some(tenant), Some(role_tenant)) => role_tenant == tenant,
                _ => true,
            })
            .collect();

        roles.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.code.cmp(&b.code)));
        Ok(roles)
    }

    /// Resolve the user's effective permissions.
    ///
    /// Super-admin membership (role code equality) short-circuits to
    /// universal allow; otherwise every active role's grants are
    /// union-ed. Zero roles is not an error - it yields an empty set.
    pub async fn effective_permissions(
        &self,
        user_id: Uuid,
        tenant_id: Option<Uuid>,
    ) -> Result<EffectivePermissions, ResolveError> {
        let roles = self.active_roles(user_id, tenant_id).await?;
        let super_admin = roles.iter().any(Role::is_super_admin);

        let set = if super_admin {
            PermissionSet::new()
        } else {
            let role_ids: Vec<Uuid> = roles.iter().map(|role| role.id).collect();
            let codes = self.store.permission_codes_for_roles(&role_ids).await?;
            PermissionSet::from_codes(codes)
        };

        tracing::debug!(
            %user_id,
            roles = roles.len(),
            super_admin,
            permissions = set.len(),
            "resolved effective permissions"
        );

        Ok(EffectivePermissions::new(roles, super_admin, set))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RoleAssignment, UserRecord};
    use crate::store::InMemoryDirectory;
    use chrono::Duration;
    use keystone_rbac::SUPER_ADMIN;

    struct Fixture {
        directory: InMemoryDirectory,
        user_id: Uuid,
    }

    fn fixture() -> Fixture {
        let mut directory = InMemoryDirectory::new();
        let user = UserRecord::new(Uuid::now_v7());
        let user_id = user.id;
        directory.add_user(user);
        Fixture { directory, user_id }
    }

    fn add_role_with(
        directory: &mut InMemoryDirectory,
        user_id: Uuid,
        role: Role,
        codes: &[&str],
    ) -> Uuid {
        let role_id = role.id;
        directory.add_role(role);
        directory.assign(RoleAssignment::new(user_id, role_id));
        for code in codes {
            directory.grant(role_id, *code);
        }
        role_id
    }

    #[tokio::test]
    async fn test_union_across_roles() {
        let Fixture {
            mut directory,
            user_id,
        } = fixture();

        add_role_with(
            &mut directory,
            user_id,
            Role::new("ORDER_MANAGER", "Order Manager"),
            &["orders:read", "orders:update"],
        );
        add_role_with(
            &mut directory,
            user_id,
            Role::new("CART_VIEWER", "Cart Viewer"),
            &["carts:read"],
        );

        let resolver = AccessResolver::new(directory);
        let perms = resolver.effective_permissions(user_id, None).await.unwrap();

        assert!(!perms.super_admin);
        assert!(perms.allows_code("orders:read"));
        assert!(perms.allows_code("carts:read"));
        assert!(!perms.allows_code("carts:delete"));
        assert_eq!(perms.roles.len(), 2);
    }

    #[tokio::test]
    async fn test_super_admin_short_circuits() {
        let Fixture {
            mut directory,
            user_id,
        } = fixture();

        add_role_with(
            &mut directory,
            user_id,
            Role::new(SUPER_ADMIN, "Super Admin"),
            &[],
        );
        add_role_with(
            &mut directory,
            user_id,
            Role::new("CART_VIEWER", "Cart Viewer"),
            &["carts:read"],
        );

        let resolver = AccessResolver::new(directory);
        let perms = resolver.effective_permissions(user_id, None).await.unwrap();

        assert!(perms.super_admin);
        // Universal allow, no explicit grants needed
        assert!(perms.allows_code("anything:whatsoever"));
        assert!(perms.allows_all(["orders:delete", "users:manage"]));
        // The literal role list is still reported for auditing
        assert_eq!(perms.roles.len(), 2);
        assert!(perms.role_codes().contains(&SUPER_ADMIN.to_string()));
    }

    #[tokio::test]
    async fn test_expired_assignment_contributes_nothing() {
        let Fixture {
            mut directory,
            user_id,
        } = fixture();

        let role = Role::new("ORDER_MANAGER", "Order Manager");
        let role_id = role.id;
        directory.add_role(role);
        directory.assign(
            RoleAssignment::new(user_id, role_id)
                .with_valid_until(Utc::now() - Duration::days(1)),
        );
        directory.grant(role_id, "orders:read");

        let resolver = AccessResolver::new(directory);
        let perms = resolver.effective_permissions(user_id, None).await.unwrap();

        assert!(perms.roles.is_empty());
        assert!(!perms.allows_code("orders:read"));
    }

    #[tokio::test]
    async fn test_inactive_role_and_inactive_assignment_skipped() {
        let Fixture {
            mut directory,
            user_id,
        } = fixture();

        add_role_with(
            &mut directory,
            user_id,
            Role::new("RETIRED", "Retired").with_status(RoleStatus::Deprecated),
            &["orders:read"],
        );

        let inactive = Role::new("PAUSED", "Paused").with_status(RoleStatus::Inactive);
        let inactive_id = inactive.id;
        directory.add_role(inactive);
        directory.assign(RoleAssignment::new(user_id, inactive_id));
        directory.grant(inactive_id, "carts:read");

        let revoked = Role::new("GONE", "Gone");
        let revoked_id = revoked.id;
        directory.add_role(revoked);
        directory.assign(RoleAssignment::new(user_id, revoked_id).revoked());
        directory.grant(revoked_id, "products:read");

        let resolver = AccessResolver::new(directory);
        let perms = resolver.effective_permissions(user_id, None).await.unwrap();

        assert!(perms.roles.is_empty());
        assert!(perms.codes().is_empty());
    }

    #[tokio::test]
    async fn test_tenant_scoping() {
        let Fixture {
            mut directory,
            user_id,
        } = fixture();

        let tenant = Uuid::now_v7();
        let other_tenant = Uuid::now_v7();

        add_role_with(
            &mut directory,
            user_id,
            Role::new("GLOBAL_AUDITOR", "Global Auditor"),
            &["reports:read"],
        );
        add_role_with(
            &mut directory,
            user_id,
            Role::new("TENANT_MANAGER", "Tenant Manager").with_tenant(tenant),
            &["orders:*"],
        );
        add_role_with(
            &mut directory,
            user_id,
            Role::new("FOREIGN_MANAGER", "Foreign Manager").with_tenant(other_tenant),
            &["carts:*"],
        );

        let resolver = AccessResolver::new(directory);

        // Scoped to the user's tenant: global + own-tenant roles
        let scoped = resolver
            .effective_permissions(user_id, Some(tenant))
            .await
            .unwrap();
        assert!(scoped.allows_code("reports:read"));
        assert!(scoped.allows_code("orders:delete"));
        assert!(!scoped.allows_code("carts:read"));

        // No tenant given: no tenant filter
        let unscoped = resolver.effective_permissions(user_id, None).await.unwrap();
        assert!(unscoped.allows_code("carts:read"));
    }

    #[tokio::test]
    async fn test_zero_roles_is_empty_not_error() {
        let Fixture {
            directory, user_id, ..
        } = fixture();

        let resolver = AccessResolver::new(directory);
        let perms = resolver.effective_permissions(user_id, None).await.unwrap();

        assert!(perms.roles.is_empty());
        assert!(!perms.super_admin);
        assert!(perms.permission_set().is_empty());
    }

    #[tokio::test]
    async fn test_role_order_is_deterministic() {
        let Fixture {
            mut directory,
            user_id,
        } = fixture();

        add_role_with(
            &mut directory,
            user_id,
            Role::new("B_ROLE", "B").with_priority(10),
            &[],
        );
        add_role_with(
            &mut directory,
            user_id,
            Role::new("A_ROLE", "A").with_priority(10),
            &[],
        );
        add_role_with(
            &mut directory,
            user_id,
            Role::new("Z_ROLE", "Z").with_priority(99),
            &[],
        );

        let resolver = AccessResolver::new(directory);
        let roles = resolver.active_roles(user_id, None).await.unwrap();
        let codes: Vec<_> = roles.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["Z_ROLE", "A_ROLE", "B_ROLE"]);
    }

    #[tokio::test]
    async fn test_duplicate_assignments_collapse() {
        let Fixture {
            mut directory,
            user_id,
        } = fixture();

        let role = Role::new("ORDER_MANAGER", "Order Manager");
        let role_id = role.id;
        directory.add_role(role);
        directory.assign(RoleAssignment::new(user_id, role_id));
        directory.assign(RoleAssignment::new(user_id, role_id));

        let resolver = AccessResolver::new(directory);
        let roles = resolver.active_roles(user_id, None).await.unwrap();
        assert_eq!(roles.len(), 1);
    }
}
