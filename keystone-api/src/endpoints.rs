//! Read-only listing endpoints
//!
//! The endpoint surface of the access-control layer: field permissions,
//! navigation, the module/permission catalog, and the landing-route
//! lookup. Each method authenticates, resolves the user's tenant, and
//! delegates to the resolver; failures become [`ApiError`] and the
//! generic envelope.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use keystone_auth::{CredentialSource, SessionService, SessionStore};
use keystone_registry::{ModuleRegistry, NavEntry};
use keystone_resolver::{AccessResolver, DirectoryStore, ModuleFieldReport};

use crate::error::{ApiError, ApiResult};
use crate::guard::require_auth;

/// Envelope for the field permission listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPermissionsResponse {
    /// Always `true`; failures use the error envelope instead.
    pub success: bool,

    /// Per-module, per-field access, complete and in sort order.
    pub field_permissions: Vec<ModuleFieldReport>,
}

/// Envelope for the navigation listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    /// Always `true`; failures use the error envelope instead.
    pub success: bool,

    /// Permission-filtered menu entries, in menu order. Empty (not an
    /// error) when the user holds no roles.
    pub navigation: Vec<NavEntry>,
}

/// One module in the catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleCatalogEntry {
    /// Module row id.
    pub id: Uuid,

    /// Display name.
    pub name: String,

    /// Module code.
    pub code: String,

    /// Description from the registry, if declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Icon identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Catalog sort order.
    pub sort_order: i32,

    /// Whether the module is active.
    pub is_active: bool,

    /// Permission codes the module registers.
    pub permissions: Vec<String>,
}

/// Envelope for the module/permission catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleCatalogResponse {
    /// Always `true`; failures use the error envelope instead.
    pub success: bool,

    /// The catalog, in sort order.
    pub modules: Vec<ModuleCatalogEntry>,
}

/// The access-control endpoint surface.
///
/// Owns the resolver, the session service, and the registry; stateless
/// beyond them, so one instance serves all concurrent requests.
pub struct AccessApi<D, S> {
    resolver: AccessResolver<D>,
    sessions: SessionService<S>,
    registry: ModuleRegistry,
}

impl<D: DirectoryStore, S: SessionStore> AccessApi<D, S> {
    /// Assemble the endpoint surface.
    pub fn new(
        resolver: AccessResolver<D>,
        sessions: SessionService<S>,
        registry: ModuleRegistry,
    ) -> Self {
        Self {
            resolver,
            sessions,
            registry,
        }
    }

    /// Get the resolver.
    pub fn resolver(&self) -> &AccessResolver<D> {
        &self.resolver
    }

    /// Get the session service.
    pub fn sessions(&self) -> &SessionService<S> {
        &self.sessions
    }

    /// Get the registry.
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Authenticate and resolve the caller's tenant.
    ///
    /// A session pointing at a user the directory no longer knows is a
    /// data-integrity condition (400), not an authentication failure.
    async fn authenticate(&self, credentials: &CredentialSource) -> ApiResult<(Uuid, Option<Uuid>)> {
        let user_id = require_auth(&self.sessions, credentials).await?;

        let user = self
            .resolver
            .store()
            .user(user_id)
            .await
            .map_err(keystone_resolver::ResolveError::from)?
            .ok_or(ApiError::TenantUnresolved)?;

        if !user.is_active {
            return Err(ApiError::Unauthenticated);
        }

        Ok((user_id, user.tenant_id))
    }

    /// Field permission listing, optionally filtered by module code.
    pub async fn field_permissions(
        &self,
        credentials: &CredentialSource,
        module_code: Option<&str>,
    ) -> ApiResult<FieldPermissionsResponse> {
        if let Some(code) = module_code {
            if code.is_empty() {
                return Err(ApiError::Validation("module code must not be empty".into()));
            }
        }

        let (user_id, tenant_id) = self.authenticate(credentials).await?;
        let field_permissions = self
            .resolver
            .field_permissions(user_id, tenant_id, module_code)
            .await?;

        Ok(FieldPermissionsResponse {
            success: true,
            field_permissions,
        })
    }

    /// Permission-filtered navigation listing.
    pub async fn navigation(&self, credentials: &CredentialSource) -> ApiResult<NavigationResponse> {
        let (user_id, tenant_id) = self.authenticate(credentials).await?;
        let navigation = self
            .resolver
            .accessible_navigation(user_id, tenant_id, &self.registry)
            .await?;

        Ok(NavigationResponse {
            success: true,
            navigation,
        })
    }

    /// Module/permission catalog listing.
    ///
    /// Authentication only - the catalog is vocabulary, not data. Active
    /// store modules are joined with the registry's descriptions and
    /// permission codes.
    pub async fn module_catalog(
        &self,
        credentials: &CredentialSource,
    ) -> ApiResult<ModuleCatalogResponse> {
        self.authenticate(credentials).await?;

        let records = self
            .resolver
            .store()
            .active_modules()
            .await
            .map_err(keystone_resolver::ResolveError::from)?;

        let modules = records
            .into_iter()
            .map(|record| {
                let descriptor = self.registry.module(&record.code);
                ModuleCatalogEntry {
                    id: record.id,
                    name: record.name,
                    description: descriptor.and_then(|d| d.description.clone()),
                    icon: record.icon,
                    sort_order: record.sort_order,
                    is_active: record.is_active,
                    permissions: descriptor
                        .map(|d| d.permission_codes())
                        .unwrap_or_default(),
                    code: record.code,
                }
            })
            .collect();

        Ok(ModuleCatalogResponse {
            success: true,
            modules,
        })
    }

    /// The first route the caller may land on, for client-side redirects.
    pub async fn landing_route(&self, credentials: &CredentialSource) -> ApiResult<Option<String>> {
        let (user_id, tenant_id) = self.authenticate(credentials).await?;
        Ok(self
            .resolver
            .first_accessible_route(user_id, tenant_id, &self.registry)
            .await?)
    }
}
