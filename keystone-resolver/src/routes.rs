//! Route accessibility resolution
//!
//! Decides where a user may land and which navigation entries they see.
//! Landing resolution walks a fixed priority list of well-known routes,
//! special-cases the settings sub-routes, then falls through to the
//! module catalog. `None` means "no entitlement" - callers must not
//! default such a user into any route.

use uuid::Uuid;

use keystone_registry::{ModuleRegistry, NavEntry};

use crate::error::ResolveError;
use crate::resolver::{AccessResolver, EffectivePermissions};
use crate::store::DirectoryStore;

/// Where super-admins (and the dashboard-entitled) land.
pub const DEFAULT_LANDING_ROUTE: &str = "/dashboard";

struct WellKnownRoute {
    module: &'static str,
    path: &'static str,
    code: &'static str,
}

/// Fixed priority list, evaluated in order before the catalog fallback.
const WELL_KNOWN_ROUTES: &[WellKnownRoute] = &[
    WellKnownRoute {
        module: "dashboard",
        path: "/dashboard",
        code: "dashboard:read",
    },
    WellKnownRoute {
        module: "profile",
        path: "/profile",
        code: "profile:read",
    },
    WellKnownRoute {
        module: "users",
        path: "/users",
        code: "users:read",
    },
    WellKnownRoute {
        module: "roles",
        path: "/roles",
        code: "roles:read",
    },
];

const SETTINGS_MODULE: &str = "settings";

/// Settings sub-routes in their fixed sub-priority order. The resolver
/// returns the satisfied sub-route, never the bare parent.
const SETTINGS_SUB_ROUTES: &[(&str, &str)] = &[
    ("settings:general:read", "/settings/general"),
    ("settings:notifications:read", "/settings/notifications"),
    ("settings:security:read", "/settings/security"),
];

/// Pure landing-route decision over already-resolved permissions.
pub fn first_route_for(
    perms: &EffectivePermissions,
    registry: &ModuleRegistry,
) -> Option<String> {
    if perms.super_admin {
        return Some(DEFAULT_LANDING_ROUTE.to_string());
    }

    for route in WELL_KNOWN_ROUTES {
        if perms.allows_code(route.code) {
            return Some(route.path.to_string());
        }
    }

    for (code, path) in SETTINGS_SUB_ROUTES {
        if perms.allows_code(code) {
            return Some((*path).to_string());
        }
    }

    // Catalog fallback, skipping codes the priority list already covered
    for module in registry.all_modules() {
        if is_well_known(&module.code) {
            continue;
        }
        if perms.allows_code(&format!("{}:read", module.code)) {
            return Some(format!("/{}", module.code.to_lowercase()));
        }
    }

    None
}

fn is_well_known(code: &str) -> bool {
    code == SETTINGS_MODULE || WELL_KNOWN_ROUTES.iter().any(|route| route.module == code)
}

/// Pure navigation filtering over already-resolved permissions.
///
/// An entry is kept when any of its module's routes is satisfied; nested
/// children are kept only when their own route is. Entries come back in
/// menu order.
pub fn navigation_for(
    perms: &EffectivePermissions,
    registry: &ModuleRegistry,
) -> Vec<NavEntry> {
    let mut entries: Vec<NavEntry> = Vec::new();

    for module in registry.all_modules() {
        let nav = match &module.nav {
            Some(nav) => nav,
            None => continue,
        };

        let route_satisfied = |path: &str| {
            module.routes.iter().any(|route| {
                route.path == path
                    && (route.required.is_empty()
                        || route.required.iter().any(|p| perms.allows(p)))
            })
        };

        let any_route = module.routes.iter().any(|route| {
            route.required.is_empty() || route.required.iter().any(|p| perms.allows(p))
        });
        if !any_route {
            continue;
        }

        let mut entry = nav.clone();
        entry
            .children
            .retain(|child| route_satisfied(&child.path));
        entries.push(entry);
    }

    entries.sort_by_key(|entry| entry.order);
    entries
}

impl<S: DirectoryStore> AccessResolver<S> {
    /// The first route this user is entitled to land on.
    pub async fn first_accessible_route(
        &self,
        user_id: Uuid,
        tenant_id: Option<Uuid>,
        registry: &ModuleRegistry,
    ) -> Result<Option<String>, ResolveError> {
        let perms = self.effective_permissions(user_id, tenant_id).await?;
        Ok(first_route_for(&perms, registry))
    }

    /// The full filtered navigation for menu rendering.
    ///
    /// Empty (not an error) for a user with no roles.
    pub async fn accessible_navigation(
        &self,
        user_id: Uuid,
        tenant_id: Option<Uuid>,
        registry: &ModuleRegistry,
    ) -> Result<Vec<NavEntry>, ResolveError> {
        let perms = self.effective_permissions(user_id, tenant_id).await?;
        Ok(navigation_for(&perms, registry))
    }
}
