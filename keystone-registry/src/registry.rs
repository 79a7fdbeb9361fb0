//! The module registry
//!
//! An immutable index over module descriptors, built once at process
//! start. Reloading it requires rebuilding; no component mutates it after
//! construction, so it is shared freely across concurrent requests.

use std::collections::{BTreeSet, HashMap};

use thiserror::Error;

use keystone_rbac::{Permission, GLOBAL_MODULE};

use crate::module::{EndpointDescriptor, ModuleDescriptor, NavEntry, RouteDescriptor};

/// Errors raised while assembling a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two descriptors share a module code.
    #[error("duplicate module code: {0}")]
    DuplicateModule(String),

    /// A descriptor has an empty module code.
    #[error("module code must not be empty")]
    EmptyModuleCode,
}

/// Builder assembling a [`ModuleRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    modules: Vec<ModuleDescriptor>,
}

impl RegistryBuilder {
    /// Register a module descriptor.
    pub fn register(mut self, module: ModuleDescriptor) -> Self {
        self.modules.push(module);
        self
    }

    /// Finalize the registry.
    ///
    /// Sorts the catalog by sort order (code as tie-breaker) and indexes
    /// it by code. Duplicate or empty codes are rejected.
    pub fn build(mut self) -> Result<ModuleRegistry, RegistryError> {
        self.modules
            .sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.code.cmp(&b.code)));

        let mut index = HashMap::with_capacity(self.modules.len());
        for (position, module) in self.modules.iter().enumerate() {
            if module.code.is_empty() {
                return Err(RegistryError::EmptyModuleCode);
            }
            if index.insert(module.code.clone(), position).is_some() {
                return Err(RegistryError::DuplicateModule(module.code.clone()));
            }
        }

        Ok(ModuleRegistry {
            modules: self.modules,
            index,
        })
    }
}

/// The immutable module catalog.
///
/// # Example
///
/// ```
/// use keystone_registry::{ModuleDescriptor, ModuleRegistry};
///
/// let registry = ModuleRegistry::builder()
///     .register(ModuleDescriptor::new("orders", "Orders").with_sort_order(10))
///     .register(ModuleDescriptor::new("carts", "Carts").with_sort_order(20))
///     .build()
///     .unwrap();
///
/// let codes: Vec<_> = registry.all_modules().iter().map(|m| m.code.as_str()).collect();
/// assert_eq!(codes, vec!["orders", "carts"]);
/// ```
#[derive(Debug, Clone)]
pub struct ModuleRegistry {
    modules: Vec<ModuleDescriptor>,
    index: HashMap<String, usize>,
}

impl ModuleRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// All modules in catalog order.
    pub fn all_modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    /// Look up a module by code.
    pub fn module(&self, code: &str) -> Option<&ModuleDescriptor> {
        self.index.get(code).map(|&position| &self.modules[position])
    }

    /// Whether a code names a catalog module or the `admin` pseudo-module.
    ///
    /// Permission codes must reference one of these (data model
    /// invariant); the pseudo-module exists only for the global wildcard.
    pub fn is_known_module(&self, code: &str) -> bool {
        code == GLOBAL_MODULE || self.index.contains_key(code)
    }

    /// Whether a permission's module segment references the catalog.
    pub fn validates(&self, permission: &Permission) -> bool {
        match permission.module() {
            None => true, // admin:* - the reserved pseudo-module
            Some(module) => self.is_known_module(module),
        }
    }

    /// Every navigable route across all modules, in catalog order.
    pub fn all_routes(&self) -> Vec<&RouteDescriptor> {
        self.modules.iter().flat_map(|m| m.routes.iter()).collect()
    }

    /// Every API endpoint across all modules, in catalog order.
    pub fn all_endpoints(&self) -> Vec<&EndpointDescriptor> {
        self.modules
            .iter()
            .flat_map(|m| m.endpoints.iter())
            .collect()
    }

    /// Navigation entries sorted by menu order.
    pub fn nav_entries(&self) -> Vec<&NavEntry> {
        let mut entries: Vec<&NavEntry> =
            self.modules.iter().filter_map(|m| m.nav.as_ref()).collect();
        entries.sort_by_key(|entry| entry.order);
        entries
    }

    /// Paths of all routes requiring authentication.
    ///
    /// This is the static set the edge gate snapshots at construction; it
    /// must be regenerated whenever the registry changes, which holds by
    /// construction because the gate derives it from this method.
    pub fn protected_paths(&self) -> BTreeSet<String> {
        self.modules
            .iter()
            .flat_map(|m| m.routes.iter())
            .filter(|route| route.requires_auth)
            .map(|route| route.path.clone())
            .collect()
    }

    /// Number of modules in the catalog.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
