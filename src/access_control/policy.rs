//! Access policy table
//!
//! Maps every protected route to the roles allowed to open it. The table is
//! filled once at startup and sealed by the first access decision; after that
//! it is read-only shared state.

use crate::access_control::types::{ResourceId, ResourcePolicy, Role};
use crate::config::{AccessControlConfig, ResourceAccess, ResourceConfig};
use crate::error::ConfigError;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Static resource → permitted-roles table
#[derive(Debug, Default)]
pub struct AccessPolicyTable {
    entries: BTreeMap<ResourceId, ResourcePolicy>,
    sealed: AtomicBool,
}

impl AccessPolicyTable {
    /// Create an empty, unsealed table
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in table for the municipal services portal
    pub fn municipal_portal() -> Self {
        let mut table = Self::new();
        for (resource, policy) in municipal_portal_entries() {
            table.entries.insert(ResourceId::from_static(resource), policy);
        }
        table
    }

    /// Build a table from configuration
    ///
    /// Configured resources replace built-in entries with the same path.
    pub fn from_config(config: &AccessControlConfig) -> Result<Self, ConfigError> {
        let mut table = Self::new();

        if config.builtin {
            for (resource, policy) in municipal_portal_entries() {
                if !config.resources.contains_key(resource) {
                    table.register(resource, policy)?;
                }
            }
        }

        // Sorted so registration errors are reported deterministically
        let mut configured: Vec<_> = config.resources.iter().collect();
        configured.sort_by(|a, b| a.0.cmp(b.0));
        for (resource, resource_config) in configured {
            table.register(resource, Self::compile_resource(resource, resource_config)?)?;
        }

        info!(
            resources = table.len(),
            builtin = config.builtin,
            "Access policy loaded"
        );
        Ok(table)
    }

    fn compile_resource(
        resource: &str,
        config: &ResourceConfig,
    ) -> Result<ResourcePolicy, ConfigError> {
        match config.access {
            ResourceAccess::Open if config.roles.is_empty() => Ok(ResourcePolicy::Open),
            ResourceAccess::Disabled if config.roles.is_empty() => Ok(ResourcePolicy::disabled()),
            ResourceAccess::Restricted if !config.roles.is_empty() => {
                Ok(ResourcePolicy::roles(config.roles.iter().copied()))
            }
            ResourceAccess::Restricted => Err(ConfigError::invalid(format!(
                "access_control.resources.\"{}\": restricted access needs at least one role \
                 (use access = \"disabled\" to block every role)",
                resource
            ))),
            ResourceAccess::Open | ResourceAccess::Disabled => Err(ConfigError::invalid(format!(
                "access_control.resources.\"{}\": roles cannot be listed with access = \"{}\"",
                resource,
                config.access.as_str()
            ))),
        }
    }

    /// Declare a protected resource
    ///
    /// Fails once the table has been sealed by the first decision, for a path
    /// that is already registered, or for a malformed path.
    pub fn register(&mut self, resource: &str, policy: ResourcePolicy) -> Result<(), ConfigError> {
        if self.is_sealed() {
            return Err(ConfigError::Sealed {
                resource: resource.to_string(),
            });
        }

        let id = ResourceId::parse(resource)?;
        if self.entries.contains_key(id.as_str()) {
            return Err(ConfigError::DuplicateResource {
                resource: resource.to_string(),
            });
        }

        debug!(resource = %id, policy = %policy, "Registered resource");
        self.entries.insert(id, policy);
        Ok(())
    }

    /// Look up the policy for a resource
    ///
    /// An unregistered resource is a configuration error, never an implicit
    /// allow or deny.
    pub fn roles_for(&self, resource: &str) -> Result<&ResourcePolicy, ConfigError> {
        self.entries
            .get(resource)
            .ok_or_else(|| ConfigError::unregistered(resource))
    }

    pub fn contains(&self, resource: &str) -> bool {
        self.entries.contains_key(resource)
    }

    /// Freeze the table. Idempotent.
    pub fn seal(&self) {
        if !self.sealed.swap(true, Ordering::AcqRel) {
            debug!(resources = self.entries.len(), "Access policy sealed");
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    /// Iterate entries in path order
    pub fn iter(&self) -> impl Iterator<Item = (&ResourceId, &ResourcePolicy)> {
        self.entries.iter()
    }

    /// Resources a role may open, in path order
    pub fn resources_for_role(&self, role: Role) -> Vec<&ResourceId> {
        self.entries
            .iter()
            .filter(|(_, policy)| policy.permits(role))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Route table of the municipal services portal
fn municipal_portal_entries() -> Vec<(&'static str, ResourcePolicy)> {
    use Role::*;

    vec![
        ("/dashboard", ResourcePolicy::Open),
        ("/notifications", ResourcePolicy::Open),
        ("/profile", ResourcePolicy::Open),
        ("/admin/citizen-services", ResourcePolicy::roles([Admin, Clerk])),
        ("/admin/permits", ResourcePolicy::roles([Admin, Clerk])),
        ("/admin/finance", ResourcePolicy::roles([Admin, Finance])),
        ("/admin/projects", ResourcePolicy::roles([Admin, ProjectManager])),
        ("/admin/hr", ResourcePolicy::roles([Admin, HrManager])),
        ("/admin/events", ResourcePolicy::roles([Admin])),
        (
            "/admin/reports",
            ResourcePolicy::roles([Admin, Finance, ProjectManager, HrManager]),
        ),
        ("/citizen/requests", ResourcePolicy::roles([Citizen])),
        ("/citizen/permits", ResourcePolicy::roles([Citizen])),
        ("/citizen/payments", ResourcePolicy::roles([Citizen])),
    ]
}
