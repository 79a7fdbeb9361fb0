//! Directory domain models
//!
//! The store-agnostic entities resolution reads: users, roles and their
//! assignments, the module/field catalog, and field grants. All of these
//! are administrator-managed and mutated out-of-band; this crate only
//! ever reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use keystone_rbac::{FieldAccess, SUPER_ADMIN};

/// Lifecycle status of a role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoleStatus {
    /// Role participates in resolution.
    Active,

    /// Role is switched off; assignments to it grant nothing.
    Inactive,

    /// Role is being phased out; treated like inactive.
    Deprecated,
}

impl RoleStatus {
    /// Get the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleStatus::Active => "active",
            RoleStatus::Inactive => "inactive",
            RoleStatus::Deprecated => "deprecated",
        }
    }

    /// Parse a status from its string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(RoleStatus::Active),
            "inactive" => Some(RoleStatus::Inactive),
            "deprecated" => Some(RoleStatus::Deprecated),
            _ => None,
        }
    }
}

/// A back-office user, as far as access control cares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique user ID.
    pub id: Uuid,

    /// Tenant the user belongs to; `None` means global scope.
    pub tenant_id: Option<Uuid>,

    /// Whether the account is active.
    pub is_active: bool,
}

impl UserRecord {
    /// Create an active, globally-scoped user.
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            tenant_id: None,
            is_active: true,
        }
    }

    /// Scope the user to a tenant.
    pub fn with_tenant(mut self, tenant_id: Uuid) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }
}

/// A role: a named bundle of permission grants.
///
/// `priority` orders roles when a consumer must pick a single
/// non-boolean setting among conflicting roles; it plays no part in
/// permission or field aggregation, which is a pure union.
/// `parent_role_id` is informational only - resolution never walks the
/// hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Unique role ID.
    pub id: Uuid,

    /// Stable uppercase code (e.g. `ORDER_MANAGER`, `SUPER_ADMIN`).
    pub code: String,

    /// Display name.
    pub name: String,

    /// Tenant scope; `None` means the role is global.
    pub tenant_id: Option<Uuid>,

    /// Lifecycle status.
    pub status: RoleStatus,

    /// Higher wins on conflicting non-boolean settings.
    pub priority: i32,

    /// Optional parent role (informational).
    pub parent_role_id: Option<Uuid>,
}

impl Role {
    /// Create an active, global role with priority 0.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            code: code.into(),
            name: name.into(),
            tenant_id: None,
            status: RoleStatus::Active,
            priority: 0,
            parent_role_id: None,
        }
    }

    /// Scope the role to a tenant.
    pub fn with_tenant(mut self, tenant_id: Uuid) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the lifecycle status.
    pub fn with_status(mut self, status: RoleStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the parent role.
    pub fn with_parent(mut self, parent_role_id: Uuid) -> Self {
        self.parent_role_id = Some(parent_role_id);
        self
    }

    /// Whether this is the reserved super-administrator role.
    pub fn is_super_admin(&self) -> bool {
        self.code == SUPER_ADMIN
    }
}

/// Assignment of a role to a user.
///
/// Contributes to resolution only while it is active, unexpired, and its
/// role is itself active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// Unique assignment ID.
    pub id: Uuid,

    /// The user.
    pub user_id: Uuid,

    /// The assigned role.
    pub role_id: Uuid,

    /// Whether the assignment is active.
    pub is_active: bool,

    /// Optional validity window end.
    pub valid_until: Option<DateTime<Utc>>,
}

impl RoleAssignment {
    /// Create an active, open-ended assignment.
    pub fn new(user_id: Uuid, role_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            role_id,
            is_active: true,
            valid_until: None,
        }
    }

    /// Bound the assignment's validity.
    pub fn with_valid_until(mut self, valid_until: DateTime<Utc>) -> Self {
        self.valid_until = Some(valid_until);
        self
    }

    /// Mark the assignment revoked.
    pub fn revoked(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Whether the assignment contributes as of `now`.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.valid_until.map_or(true, |until| until > now)
    }
}

/// A module row from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Unique module ID.
    pub id: Uuid,

    /// Unique module code (permission module segment).
    pub code: String,

    /// Display name.
    pub name: String,

    /// Navigation icon, if any.
    pub icon: Option<String>,

    /// Whether the module participates in resolution.
    pub is_active: bool,

    /// Catalog sort order.
    pub sort_order: i32,
}

impl ModuleRecord {
    /// Create an active module.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            code: code.into(),
            name: name.into(),
            icon: None,
            is_active: true,
            sort_order: 0,
        }
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the sort order.
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Switch the module off.
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// A field row belonging to a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Unique field ID.
    pub id: Uuid,

    /// Owning module.
    pub module_id: Uuid,

    /// Field code (stable token).
    pub code: String,

    /// Technical name.
    pub name: String,

    /// Display label.
    pub label: String,

    /// Whether the field participates in resolution.
    pub is_active: bool,

    /// Sort order within the module.
    pub sort_order: i32,
}

impl FieldRecord {
    /// Create an active field.
    pub fn new(
        module_id: Uuid,
        code: impl Into<String>,
        name: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            module_id,
            code: code.into(),
            name: name.into(),
            label: label.into(),
            is_active: true,
            sort_order: 0,
        }
    }

    /// Set the sort order.
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Switch the field off.
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// A role's access to one field of one module.
///
/// Absence of a grant row means no access at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldGrant {
    /// The granting role.
    pub role_id: Uuid,

    /// The module the field belongs to.
    pub module_id: Uuid,

    /// The field.
    pub field_id: Uuid,

    /// Visibility/editability granted by this role.
    pub access: FieldAccess,
}

impl FieldGrant {
    /// Create a field grant.
    pub fn new(role_id: Uuid, module_id: Uuid, field_id: Uuid, access: FieldAccess) -> Self {
        Self {
            role_id,
            module_id,
            field_id,
            access,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_role_status_parse() {
        assert_eq!(RoleStatus::parse("active"), Some(RoleStatus::Active));
        assert_eq!(RoleStatus::parse("DEPRECATED"), Some(RoleStatus::Deprecated));
        assert_eq!(RoleStatus::parse("weird"), None);
    }

    #[test]
    fn test_role_defaults() {
        let role = Role::new("ORDER_MANAGER", "Order Manager");
        assert_eq!(role.status, RoleStatus::Active);
        assert_eq!(role.priority, 0);
        assert!(role.tenant_id.is_none());
        assert!(!role.is_super_admin());
    }

    #[test]
    fn test_super_admin_detection_is_exact() {
        assert!(Role::new("SUPER_ADMIN", "Super Admin").is_super_admin());
        assert!(!Role::new("SUPER_ADMINISTRATOR", "Nope").is_super_admin());
        assert!(!Role::new("super_admin", "Nope").is_super_admin());
    }

    #[test]
    fn test_assignment_currency() {
        let now = Utc::now();
        let user_id = Uuid::now_v7();
        let role_id = Uuid::now_v7();

        let open = RoleAssignment::new(user_id, role_id);
        assert!(open.is_current(now));

        let expired =
            RoleAssignment::new(user_id, role_id).with_valid_until(now - Duration::days(1));
        assert!(!expired.is_current(now));

        let future = RoleAssignment::new(user_id, role_id).with_valid_until(now + Duration::days(1));
        assert!(future.is_current(now));

        let revoked = RoleAssignment::new(user_id, role_id).revoked();
        assert!(!revoked.is_current(now));
    }

    #[test]
    fn test_field_record_builder() {
        let module_id = Uuid::now_v7();
        let field = FieldRecord::new(module_id, "sku", "sku", "SKU")
            .with_sort_order(3)
            .deactivated();
        assert_eq!(field.sort_order, 3);
        assert!(!field.is_active);
    }
}
