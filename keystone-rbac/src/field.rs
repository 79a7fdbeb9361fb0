//! # Field Access
//!
//! Per-field visibility/editability flags and their OR-aggregation.
//! A user holding several roles gets the union of what each role grants:
//! a field visible via one role and editable via another ends up both.

use serde::{Deserialize, Serialize};

/// Visibility and editability of a single data field.
///
/// Both flags aggregate independently across roles by logical OR, so
/// adding a role can only ever add access, never remove it. Absence of a
/// grant means `{false, false}`.
///
/// # Example
///
/// ```
/// use keystone_rbac::FieldAccess;
///
/// let mut access = FieldAccess::none();
/// access.merge(FieldAccess { is_visible: true, is_editable: false });
/// access.merge(FieldAccess { is_visible: false, is_editable: true });
///
/// assert!(access.is_visible);
/// assert!(access.is_editable);
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldAccess {
    /// Whether the field may be shown at all.
    pub is_visible: bool,

    /// Whether the field may be edited.
    pub is_editable: bool,
}

impl FieldAccess {
    /// No access at all (the default for ungranted fields).
    pub fn none() -> Self {
        Self {
            is_visible: false,
            is_editable: false,
        }
    }

    /// Full access (the super-admin short-circuit value).
    pub fn full() -> Self {
        Self {
            is_visible: true,
            is_editable: true,
        }
    }

    /// Create from the two flags.
    pub fn new(is_visible: bool, is_editable: bool) -> Self {
        Self {
            is_visible,
            is_editable,
        }
    }

    /// Fold another grant in, OR-ing each flag independently.
    pub fn merge(&mut self, other: FieldAccess) {
        self.is_visible |= other.is_visible;
        self.is_editable |= other.is_editable;
    }

    /// Whether any access is granted.
    pub fn is_any(&self) -> bool {
        self.is_visible || self.is_editable
    }
}
