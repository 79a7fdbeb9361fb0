//! # Actions
//!
//! The fixed vocabulary of operations that modules expose.
//! Catalog data and registry descriptors declare permission codes in
//! terms of these actions; scoped sub-codes (e.g. `settings:general:read`)
//! are carried verbatim by [`crate::Permission`] instead.

use serde::{Deserialize, Serialize};

/// Operations that can be performed within a module.
///
/// The vocabulary is deliberately closed: a code whose action segment is
/// not listed here is still a valid permission string (the algebra matches
/// codes, not meanings), but catalog and registry declarations stick to
/// these actions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create new records.
    Create,

    /// Read/view records.
    Read,

    /// Modify existing records.
    Update,

    /// Remove records.
    Delete,

    /// Upload/import data into the module.
    Import,

    /// Download/export module data.
    Export,

    /// Clone an existing record.
    Duplicate,

    /// Manage the module's label catalog.
    ManageLabels,

    /// Administer the module (settings, grants, maintenance).
    Manage,
}

impl Action {
    /// Get the string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Import => "import",
            Action::Export => "export",
            Action::Duplicate => "duplicate",
            Action::ManageLabels => "manage_labels",
            Action::Manage => "manage",
        }
    }

    /// Parse an action from its string representation.
    ///
    /// Matching is case-insensitive but otherwise exact; there are no
    /// aliases. Unknown strings yield `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use keystone_rbac::Action;
    ///
    /// assert_eq!(Action::parse("read"), Some(Action::Read));
    /// assert_eq!(Action::parse("MANAGE_LABELS"), Some(Action::ManageLabels));
    /// assert_eq!(Action::parse("view"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "create" => Some(Action::Create),
            "read" => Some(Action::Read),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            "import" => Some(Action::Import),
            "export" => Some(Action::Export),
            "duplicate" => Some(Action::Duplicate),
            "manage_labels" => Some(Action::ManageLabels),
            "manage" => Some(Action::Manage),
            _ => None,
        }
    }

    /// Get all actions in declaration order.
    pub fn all() -> Vec<Self> {
        vec![
            Action::Create,
            Action::Read,
            Action::Update,
            Action::Delete,
            Action::Import,
            Action::Export,
            Action::Duplicate,
            Action::ManageLabels,
            Action::Manage,
        ]
    }

    /// The standard CRUD subset declared for most modules.
    pub fn crud() -> Vec<Self> {
        vec![
            Action::Create,
            Action::Read,
            Action::Update,
            Action::Delete,
        ]
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_as_str() {
        assert_eq!(Action::Read.as_str(), "read");
        assert_eq!(Action::ManageLabels.as_str(), "manage_labels");
        assert_eq!(Action::Duplicate.as_str(), "duplicate");
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!(Action::parse("read"), Some(Action::Read));
        assert_eq!(Action::parse("READ"), Some(Action::Read));
        assert_eq!(Action::parse("manage_labels"), Some(Action::ManageLabels));

        // No aliases: the vocabulary is exact
        assert_eq!(Action::parse("view"), None);
        assert_eq!(Action::parse("write"), None);
        assert_eq!(Action::parse(""), None);
    }

    #[test]
    fn test_all_actions_count() {
        assert_eq!(Action::all().len(), 9);
    }

    #[test]
    fn test_crud_subset() {
        let crud = Action::crud();
        assert_eq!(crud.len(), 4);
        assert!(crud.contains(&Action::Read));
        assert!(!crud.contains(&Action::Manage));
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Action::ManageLabels).unwrap();
        assert_eq!(json, "\"manage_labels\"");
    }
}
