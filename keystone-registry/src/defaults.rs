//! Default module catalog
//!
//! The declarative catalog of the Keystone back-office. Every module
//! registered here also ships its permission codes; the corresponding
//! field definitions live in the directory store.

use keystone_rbac::{Action, Permission};

use crate::module::{EndpointDescriptor, HttpMethod, ModuleDescriptor, NavEntry, RouteDescriptor};
use crate::registry::ModuleRegistry;

fn crud_permissions(code: &str) -> Vec<Permission> {
    let mut permissions: Vec<Permission> = Action::crud()
        .into_iter()
        .map(|action| Permission::of(code, action))
        .collect();
    permissions.push(Permission::module_wildcard(code));
    permissions
}

fn list_endpoints(code: &str) -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor::new(HttpMethod::Get, format!("/api/{code}"), format!("list_{code}"))
            .with_permission(Permission::of(code, Action::Read)),
        EndpointDescriptor::new(
            HttpMethod::Post,
            format!("/api/{code}"),
            format!("create_{code}"),
        )
        .with_permission(Permission::of(code, Action::Create)),
    ]
}

fn standard_module(code: &str, name: &str, icon: &str, sort_order: i32) -> ModuleDescriptor {
    let mut module = ModuleDescriptor::new(code, name)
        .with_icon(icon)
        .with_sort_order(sort_order)
        .with_nav(NavEntry::new(name, format!("/{code}"), sort_order).with_icon(icon))
        .with_route(
            RouteDescriptor::new(format!("/{code}"))
                .with_permission(Permission::of(code, Action::Read)),
        )
        .with_permissions(crud_permissions(code));
    for endpoint in list_endpoints(code) {
        module = module.with_endpoint(endpoint);
    }
    module
}

fn dashboard() -> ModuleDescriptor {
    ModuleDescriptor::new("dashboard", "Dashboard")
        .with_icon("gauge")
        .with_sort_order(10)
        .with_nav(NavEntry::new("Dashboard", "/dashboard", 10).with_icon("gauge"))
        .with_route(
            RouteDescriptor::new("/dashboard")
                .with_permission(Permission::of("dashboard", Action::Read)),
        )
        .with_permissions([
            Permission::of("dashboard", Action::Read),
            Permission::module_wildcard("dashboard"),
        ])
}

fn profile() -> ModuleDescriptor {
    // Reached from the user menu, not the main navigation.
    ModuleDescriptor::new("profile", "Profile")
        .with_icon("user")
        .with_sort_order(20)
        .with_route(
            RouteDescriptor::new("/profile")
                .with_permission(Permission::of("profile", Action::Read)),
        )
        .with_endpoint(
            EndpointDescriptor::new(HttpMethod::Get, "/api/profile", "get_profile")
                .with_permission(Permission::of("profile", Action::Read)),
        )
        .with_endpoint(
            EndpointDescriptor::new(HttpMethod::Patch, "/api/profile", "update_profile")
                .with_permission(Permission::of("profile", Action::Update)),
        )
        .with_permissions([
            Permission::of("profile", Action::Read),
            Permission::of("profile", Action::Update),
            Permission::module_wildcard("profile"),
        ])
}

fn users() -> ModuleDescriptor {
    standard_module("users", "Users", "users", 30)
        .with_description("Back-office user accounts and role assignments")
        .with_permissions([
            Permission::of("users", Action::Import),
            Permission::of("users", Action::Export),
        ])
}

fn roles() -> ModuleDescriptor {
    standard_module("roles", "Roles", "shield", 40)
        .with_description("Roles, permission grants, and field grants")
}

fn settings() -> ModuleDescriptor {
    let sections = [
        ("general", "General", 1),
        ("notifications", "Notifications", 2),
        ("security", "Security", 3),
    ];

    let mut nav = NavEntry::new("Settings", "/settings/general", 50).with_icon("cog");
    let mut module = ModuleDescriptor::new("settings", "Settings")
        .with_icon("cog")
        .with_sort_order(50)
        .with_description("Tenant-wide configuration");

    let mut permissions = vec![Permission::module_wildcard("settings")];
    for (section, label, order) in sections {
        let path = format!("/settings/{section}");
        nav = nav.with_child(NavEntry::new(label, path.clone(), order));
        module = module.with_route(
            RouteDescriptor::new(path)
                .with_permission(Permission::scoped("settings", format!("{section}:read"))),
        );
        permissions.push(Permission::scoped("settings", format!("{section}:read")));
        permissions.push(Permission::scoped("settings", format!("{section}:update")));
    }

    module.with_nav(nav).with_permissions(permissions)
}

fn carts() -> ModuleDescriptor {
    standard_module("carts", "Carts", "shopping-cart", 60)
        .with_description("Customer carts and abandoned-cart recovery")
        .with_permissions([Permission::of("carts", Action::Duplicate)])
}

fn orders() -> ModuleDescriptor {
    standard_module("orders", "Orders", "package", 70)
        .with_description("Order management and fulfilment")
        .with_permissions([
            Permission::of("orders", Action::Export),
            Permission::of("orders", Action::Duplicate),
        ])
}

fn products() -> ModuleDescriptor {
    standard_module("products", "Products", "tag", 80)
        .with_description("Product catalog")
        .with_permissions([
            Permission::of("products", Action::Import),
            Permission::of("products", Action::Export),
            Permission::of("products", Action::Duplicate),
            Permission::of("products", Action::ManageLabels),
        ])
}

fn inventory() -> ModuleDescriptor {
    ModuleDescriptor::new("inventory", "Inventory")
        .with_icon("boxes")
        .with_sort_order(90)
        .with_description("Stock levels across warehouses")
        .with_nav(NavEntry::new("Inventory", "/inventory", 90).with_icon("boxes"))
        .with_route(
            RouteDescriptor::new("/inventory")
                .with_permission(Permission::of("inventory", Action::Read)),
        )
        .with_endpoint(
            EndpointDescriptor::new(HttpMethod::Get, "/api/inventory", "list_inventory")
                .with_permission(Permission::of("inventory", Action::Read)),
        )
        .with_endpoint(
            EndpointDescriptor::new(HttpMethod::Patch, "/api/inventory/:id", "adjust_inventory")
                .with_permission(Permission::of("inventory", Action::Update)),
        )
        .with_permissions([
            Permission::of("inventory", Action::Read),
            Permission::of("inventory", Action::Update),
            Permission::of("inventory", Action::Import),
            Permission::of("inventory", Action::Export),
            Permission::module_wildcard("inventory"),
        ])
}

fn suppliers() -> ModuleDescriptor {
    standard_module("suppliers", "Suppliers", "truck", 100)
        .with_description("Supplier directory and purchasing")
        .with_permissions([
            Permission::of("suppliers", Action::Import),
            Permission::of("suppliers", Action::Export),
        ])
}

fn reports() -> ModuleDescriptor {
    ModuleDescriptor::new("reports", "Reports")
        .with_icon("bar-chart")
        .with_sort_order(110)
        .with_description("Sales and inventory reporting")
        .with_nav(NavEntry::new("Reports", "/reports", 110).with_icon("bar-chart"))
        .with_route(
            RouteDescriptor::new("/reports")
                .with_permission(Permission::of("reports", Action::Read)),
        )
        .with_endpoint(
            EndpointDescriptor::new(HttpMethod::Get, "/api/reports", "list_reports")
                .with_permission(Permission::of("reports", Action::Read)),
        )
        .with_endpoint(
            EndpointDescriptor::new(HttpMethod::Get, "/api/reports/export", "export_report")
                .with_permission(Permission::of("reports", Action::Export)),
        )
        .with_permissions([
            Permission::of("reports", Action::Read),
            Permission::of("reports", Action::Export),
            Permission::module_wildcard("reports"),
        ])
}

/// Build the default Keystone back-office catalog.
///
/// The catalog is static; its module codes are unique by construction.
pub fn default_registry() -> ModuleRegistry {
    ModuleRegistry::builder()
        .register(dashboard())
        .register(profile())
        .register(users())
        .register(roles())
        .register(settings())
        .register(carts())
        .register(orders())
        .register(products())
        .register(inventory())
        .register(suppliers())
        .register(reports())
        .build()
        .expect("default catalog module codes are unique")
}
