//! Field permission aggregation
//!
//! Builds the complete per-module, per-field access shape that drives
//! form rendering. The shape is total: every active field of every
//! targeted module appears exactly once, in sort order, even when fully
//! denied - callers rely on the complete enumeration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use keystone_rbac::FieldAccess;

use crate::error::ResolveError;
use crate::models::{FieldRecord, ModuleRecord};
use crate::resolver::AccessResolver;
use crate::store::DirectoryStore;

/// Aggregated access to one field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldPermission {
    /// Field code.
    pub field_code: String,

    /// Technical field name.
    pub field_name: String,

    /// Display label.
    pub field_label: String,

    /// OR-aggregated access flags.
    #[serde(flatten)]
    pub access: FieldAccess,
}

/// All field permissions of one module for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleFieldReport {
    /// Module code.
    pub module_code: String,

    /// Module display name.
    pub module_name: String,

    /// Every active field, in sort order.
    pub fields: Vec<FieldPermission>,
}

impl<S: DirectoryStore> AccessResolver<S> {
    /// Aggregate field permissions for a user.
    ///
    /// With a module code, only that module is reported; an unknown or
    /// inactive code yields [`ResolveError::ModuleNotFound`]. Without
    /// one, every active module is reported in catalog order.
    ///
    /// Super-admins get `{visible, editable}` on every active field.
    /// Everyone else gets, per field, the OR across their active roles'
    /// grants, defaulting to no access.
    pub async fn field_permissions(
        &self,
        user_id: Uuid,
        tenant_id: Option<Uuid>,
        module_code: Option<&str>,
    ) -> Result<Vec<ModuleFieldReport>, ResolveError> {
        let perms = self.effective_permissions(user_id, tenant_id).await?;

        let modules: Vec<ModuleRecord> = match module_code {
            Some(code) => {
                let module = self
                    .store()
                    .module_by_code(code)
                    .await?
                    .filter(|module| module.is_active)
                    .ok_or_else(|| ResolveError::ModuleNotFound(code.to_string()))?;
                vec![module]
            }
            None => self.store().active_modules().await?,
        };

        let role_ids = perms.role_ids();
        let mut reports = Vec::with_capacity(modules.len());

        for module in modules {
            let mut fields: Vec<FieldRecord> = self
                .store()
                .fields_for_module(module.id)
                .await?
                .into_iter()
                .filter(|field| field.is_active)
                .collect();
            fields.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.code.cmp(&b.code)));

            let resolved: Vec<FieldPermission> = if perms.super_admin {
                fields
                    .into_iter()
                    .map(|field| to_permission(field, FieldAccess::full()))
                    .collect()
            } else {
                let grants = self.store().field_grants(&role_ids, module.id).await?;
                let mut by_field: HashMap<Uuid, FieldAccess> = HashMap::new();
                for grant in grants {
                    by_field
                        .entry(grant.field_id)
                        .or_insert_with(FieldAccess::none)
                        .merge(grant.access);
                }
                fields
                    .into_iter()
                    .map(|field| {
                        let access = by_field.get(&field.id).copied().unwrap_or_default();
                        to_permission(field, access)
                    })
                    .collect()
            };

            reports.push(ModuleFieldReport {
                module_code: module.code,
                module_name: module.name,
                fields: resolved,
            });
        }

        Ok(reports)
    }
}

fn to_permission(field: FieldRecord, access: FieldAccess) -> FieldPermission {
    FieldPermission {
        field_code: field.code,
        field_name: field.name,
        field_label: field.label,
        access,
    }
}
