//! The directory store seam
//!
//! All resolution reads go through [`DirectoryStore`]. Implementations
//! are read-only from this crate's perspective; granting and revoking
//! happen in administrative collaborators outside this core.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{FieldGrant, FieldRecord, ModuleRecord, Role, RoleAssignment, UserRecord};

/// A directory lookup failure.
#[derive(Debug, Error)]
#[error("directory lookup failed: {0}")]
pub struct StoreError(pub String);

/// Read-only lookups against the persistent directory.
///
/// Every method is a short-lived read; implementations may suspend on
/// I/O but must not hold resources across calls. Invoked twice with
/// identical inputs and unchanged backing data, each method returns
/// identical output.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Look up a user.
    async fn user(&self, user_id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// All role assignments of a user (current or not).
    async fn assignments_for_user(&self, user_id: Uuid)
        -> Result<Vec<RoleAssignment>, StoreError>;

    /// Resolve roles by ID; unknown IDs are skipped.
    async fn roles_by_ids(&self, role_ids: &[Uuid]) -> Result<Vec<Role>, StoreError>;

    /// Union of permission codes granted to the given roles.
    async fn permission_codes_for_roles(
        &self,
        role_ids: &[Uuid],
    ) -> Result<Vec<String>, StoreError>;

    /// Active modules, ordered by sort order then code.
    async fn active_modules(&self) -> Result<Vec<ModuleRecord>, StoreError>;

    /// Look up a module by code (active or not).
    async fn module_by_code(&self, code: &str) -> Result<Option<ModuleRecord>, StoreError>;

    /// All fields of a module (active or not).
    async fn fields_for_module(&self, module_id: Uuid) -> Result<Vec<FieldRecord>, StoreError>;

    /// Field grants held by any of the given roles on a module.
    async fn field_grants(
        &self,
        role_ids: &[Uuid],
        module_id: Uuid,
    ) -> Result<Vec<FieldGrant>, StoreError>;
}

/// In-memory [`DirectoryStore`].
///
/// Reference implementation used by tests and demos. It is built up
/// front with the `add_*` methods and then treated as immutable, which
/// matches how resolution consumes a real store.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: HashMap<Uuid, UserRecord>,
    roles: HashMap<Uuid, Role>,
    assignments: Vec<RoleAssignment>,
    permission_grants: HashMap<Uuid, Vec<String>>,
    modules: Vec<ModuleRecord>,
    fields: HashMap<Uuid, Vec<FieldRecord>>,
    field_grants: Vec<FieldGrant>,
}

impl InMemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user.
    pub fn add_user(&mut self, user: UserRecord) {
        self.users.insert(user.id, user);
    }

    /// Add a role.
    pub fn add_role(&mut self, role: Role) {
        self.roles.insert(role.id, role);
    }

    /// Add a role assignment.
    pub fn assign(&mut self, assignment: RoleAssignment) {
        self.assignments.push(assignment);
    }

    /// Grant a permission code to a role.
    pub fn grant(&mut self, role_id: Uuid, code: impl Into<String>) {
        self.permission_grants
            .entry(role_id)
            .or_default()
            .push(code.into());
    }

    /// Add a module.
    pub fn add_module(&mut self, module: ModuleRecord) {
        self.modules.push(module);
    }

    /// Add a field to its module.
    pub fn add_field(&mut self, field: FieldRecord) {
        self.fields.entry(field.module_id).or_default().push(field);
    }

    /// Add a field grant.
    pub fn grant_field(&mut self, grant: FieldGrant) {
        self.field_grants.push(grant);
    }
}

#[async_trait]
impl DirectoryStore for InMemoryDirectory {
    async fn user(&self, user_id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.get(&user_id).cloned())
    }

    async fn assignments_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RoleAssignment>, StoreError> {
        Ok(self
            .assignments
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn roles_by_ids(&self, role_ids: &[Uuid]) -> Result<Vec<Role>, StoreError> {
        Ok(role_ids
            .iter()
            .filter_map(|id| self.roles.get(id))
            .cloned()
            .collect())
    }

    async fn permission_codes_for_roles(
        &self,
        role_ids: &[Uuid],
    ) -> Result<Vec<String>, StoreError> {
        let mut codes = Vec::new();
        for role_id in role_ids {
            if let Some(granted) = self.permission_grants.get(role_id) {
                codes.extend(granted.iter().cloned());
            }
        }
        Ok(codes)
    }

    async fn active_modules(&self) -> Result<Vec<ModuleRecord>, StoreError> {
        let mut modules: Vec<ModuleRecord> = self
            .modules
            .iter()
            .filter(|m| m.is_active)
            .cloned()
            .collect();
        modules.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.code.cmp(&b.code)));
        Ok(modules)
    }

    async fn module_by_code(&self, code: &str) -> Result<Option<ModuleRecord>, StoreError> {
        Ok(self.modules.iter().find(|m| m.code == code).cloned())
    }

    async fn fields_for_module(&self, module_id: Uuid) -> Result<Vec<FieldRecord>, StoreError> {
        Ok(self.fields.get(&module_id).cloned().unwrap_or_default())
    }

    async fn field_grants(
        &self,
        role_ids: &[Uuid],
        module_id: Uuid,
    ) -> Result<Vec<FieldGrant>, StoreError> {
        Ok(self
            .field_grants
            .iter()
            .filter(|g| g.module_id == module_id && role_ids.contains(&g.role_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keystone_rbac::FieldAccess;

    #[tokio::test]
    async fn test_directory_round_trip() {
        let mut directory = InMemoryDirectory::new();

        let user = UserRecord::new(Uuid::now_v7());
        let user_id = user.id;
        directory.add_user(user);

        let role = Role::new("ORDER_MANAGER", "Order Manager");
        let role_id = role.id;
        directory.add_role(role);
        directory.assign(RoleAssignment::new(user_id, role_id));
        directory.grant(role_id, "orders:read");

        assert!(directory.user(user_id).await.unwrap().is_some());
        assert_eq!(directory.assignments_for_user(user_id).await.unwrap().len(), 1);
        assert_eq!(
            directory
                .permission_codes_for_roles(&[role_id])
                .await
                .unwrap(),
            vec!["orders:read"]
        );
    }

    #[tokio::test]
    async fn test_active_modules_sorted_and_filtered() {
        let mut directory = InMemoryDirectory::new();
        directory.add_module(ModuleRecord::new("orders", "Orders").with_sort_order(20));
        directory.add_module(ModuleRecord::new("carts", "Carts").with_sort_order(10));
        directory.add_module(
            ModuleRecord::new("legacy", "Legacy")
                .with_sort_order(5)
                .deactivated(),
        );

        let modules = directory.active_modules().await.unwrap();
        let codes: Vec<_> = modules.iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, vec!["carts", "orders"]);
    }

    #[tokio::test]
    async fn test_field_grants_filtered_by_role_and_module() {
        let mut directory = InMemoryDirectory::new();
        let module = ModuleRecord::new("orders", "Orders");
        let module_id = module.id;
        directory.add_module(module);

        let field = FieldRecord::new(module_id, "total", "total", "Total");
        let field_id = field.id;
        directory.add_field(field);

        let role_a = Uuid::now_v7();
        let role_b = Uuid::now_v7();
        directory.grant_field(FieldGrant::new(role_a, module_id, field_id, FieldAccess::full()));
        directory.grant_field(FieldGrant::new(
            role_b,
            module_id,
            field_id,
            FieldAccess::new(true, false),
        ));

        let grants = directory.field_grants(&[role_a], module_id).await.unwrap();
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].role_id, role_a);
    }
}
