//! Module descriptors
//!
//! The declarative building blocks of the registry: navigable routes, API
//! endpoint metadata, navigation entries, and the permission codes a
//! module registers.

use serde::{Deserialize, Serialize};

use keystone_rbac::Permission;

/// HTTP method of an API endpoint descriptor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Read a resource or collection.
    Get,
    /// Create a resource or trigger an operation.
    Post,
    /// Replace a resource.
    Put,
    /// Partially update a resource.
    Patch,
    /// Remove a resource.
    Delete,
}

impl HttpMethod {
    /// Get the string representation of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A navigation menu entry.
///
/// Entries are surfaced through the navigation listing endpoint after
/// permission filtering; `children` models nested menus (e.g. the
/// settings sections).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NavEntry {
    /// Display label.
    pub label: String,

    /// Target path.
    pub path: String,

    /// Icon identifier, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Sort order within the menu (ascending).
    pub order: i32,

    /// Nested child entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavEntry>,
}

impl NavEntry {
    /// Create a navigation entry.
    pub fn new(label: impl Into<String>, path: impl Into<String>, order: i32) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            icon: None,
            order,
            children: Vec::new(),
        }
    }

    /// Set the icon identifier.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Add a nested child entry.
    pub fn with_child(mut self, child: NavEntry) -> Self {
        self.children.push(child);
        self
    }
}

/// A navigable page route belonging to a module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    /// Route path (e.g. `/orders`).
    pub path: String,

    /// Permissions that open the route; any one suffices.
    #[serde(default)]
    pub required: Vec<Permission>,

    /// Whether the route needs an authenticated session at all.
    ///
    /// The edge gate derives its static protected-path set from this flag.
    pub requires_auth: bool,
}

impl RouteDescriptor {
    /// Create a protected route.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            required: Vec::new(),
            requires_auth: true,
        }
    }

    /// Create a public route (no session needed).
    pub fn public(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            required: Vec::new(),
            requires_auth: false,
        }
    }

    /// Add a permission that opens this route.
    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.required.push(permission);
        self
    }
}

/// An API endpoint exposed by a module.
///
/// The handler name and middleware requirements are metadata for
/// consumers wiring transports; this core never dispatches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDescriptor {
    /// HTTP method.
    pub method: HttpMethod,

    /// Path template (e.g. `/api/orders/:id`).
    pub path: String,

    /// Handler name in the consuming application.
    pub handler: String,

    /// Permissions enforced by the permission middleware; any one suffices.
    #[serde(default)]
    pub required: Vec<Permission>,
}

impl EndpointDescriptor {
    /// Create an endpoint descriptor.
    pub fn new(method: HttpMethod, path: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            handler: handler.into(),
            required: Vec::new(),
        }
    }

    /// Add a required permission.
    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.required.push(permission);
        self
    }
}

/// Declarative description of one module.
///
/// # Example
///
/// ```
/// use keystone_registry::{ModuleDescriptor, NavEntry, RouteDescriptor};
/// use keystone_rbac::{Action, Permission};
///
/// let orders = ModuleDescriptor::new("orders", "Orders")
///     .with_sort_order(70)
///     .with_icon("package")
///     .with_nav(NavEntry::new("Orders", "/orders", 70).with_icon("package"))
///     .with_route(
///         RouteDescriptor::new("/orders").with_permission(Permission::of("orders", Action::Read)),
///     )
///     .with_permissions([
///         Permission::of("orders", Action::Read),
///         Permission::module_wildcard("orders"),
///     ]);
///
/// assert_eq!(orders.code, "orders");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    /// Unique module code (lowercase token, the permission module segment).
    pub code: String,

    /// Display name.
    pub name: String,

    /// Optional description for the catalog listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Icon identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Catalog sort order (ascending).
    pub sort_order: i32,

    /// Permission codes this module registers.
    #[serde(default)]
    pub permissions: Vec<Permission>,

    /// Navigation entry, if the module appears in the menu.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav: Option<NavEntry>,

    /// Navigable routes.
    #[serde(default)]
    pub routes: Vec<RouteDescriptor>,

    /// API endpoints.
    #[serde(default)]
    pub endpoints: Vec<EndpointDescriptor>,
}

impl ModuleDescriptor {
    /// Create a module descriptor with empty metadata.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: None,
            icon: None,
            sort_order: 0,
            permissions: Vec::new(),
            nav: None,
            routes: Vec::new(),
            endpoints: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the icon identifier.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the catalog sort order.
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Set the navigation entry.
    pub fn with_nav(mut self, nav: NavEntry) -> Self {
        self.nav = Some(nav);
        self
    }

    /// Add a navigable route.
    pub fn with_route(mut self, route: RouteDescriptor) -> Self {
        self.routes.push(route);
        self
    }

    /// Add an API endpoint.
    pub fn with_endpoint(mut self, endpoint: EndpointDescriptor) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Register permission codes for this module.
    pub fn with_permissions<I>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = Permission>,
    {
        self.permissions.extend(permissions);
        self
    }

    /// Permission codes as strings, in declaration order.
    pub fn permission_codes(&self) -> Vec<String> {
        self.permissions.iter().map(|p| p.to_string()).collect()
    }
}
