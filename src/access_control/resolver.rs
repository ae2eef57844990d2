//! Access decision resolver
//!
//! Converts (identity-or-none, resource) into a [`Decision`]:
//! 1. No identity → `DenyUnauthenticated`
//! 2. Unregistered resource → configuration error
//! 3. Open resource → `Allow`
//! 4. Role in the resource's role set → `Allow`
//! 5. Otherwise → `DenyForbidden`
//!
//! The first decision seals the policy table.

use crate::access_control::policy::AccessPolicyTable;
use crate::access_control::types::{Decision, Identity, ResourcePolicy, Role};
use crate::config::AccessControlConfig;
use crate::error::{AccessDeniedError, AppError, ConfigError};
use tracing::{debug, trace};

/// Access control resolver
///
/// Pure and synchronous: the same inputs always produce the same decision,
/// so it can be called on every navigation without caching.
#[derive(Debug)]
pub struct AccessResolver {
    policy: AccessPolicyTable,
}

impl AccessResolver {
    pub fn new(policy: AccessPolicyTable) -> Self {
        Self { policy }
    }

    /// Resolver over the built-in portal route table
    pub fn municipal_portal() -> Self {
        Self::new(AccessPolicyTable::municipal_portal())
    }

    /// Create a new resolver from configuration
    pub fn from_config(config: &AccessControlConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(AccessPolicyTable::from_config(config)?))
    }

    pub fn policy(&self) -> &AccessPolicyTable {
        &self.policy
    }

    /// Register a resource before the first decision
    pub fn register(&mut self, resource: &str, policy: ResourcePolicy) -> Result<(), ConfigError> {
        self.policy.register(resource, policy)
    }

    /// Decide whether `identity` may open `resource`
    ///
    /// Anonymous visitors are denied before the resource is looked up. For
    /// a signed-in identity, an unregistered resource is a programming
    /// mistake and is propagated as an error, never turned into a deny.
    pub fn decide(
        &self,
        identity: Option<&Identity>,
        resource: &str,
    ) -> Result<Decision, ConfigError> {
        self.policy.seal();

        let Some(identity) = identity else {
            debug!(resource, decision = %Decision::DenyUnauthenticated, "Access decision");
            return Ok(Decision::DenyUnauthenticated);
        };

        let policy = self.policy.roles_for(resource)?;
        let decision = if policy.permits(identity.role) {
            Decision::Allow
        } else {
            Decision::DenyForbidden
        };

        debug!(
            resource,
            role = %identity.role,
            policy = %policy,
            decision = %decision,
            "Access decision"
        );
        Ok(decision)
    }

    /// Decide for a bare role, without a session record
    ///
    /// Used to validate menus and to answer "could this role open X".
    pub fn decide_for_role(&self, role: Role, resource: &str) -> Result<Decision, ConfigError> {
        let policy = self.policy.roles_for(resource)?;
        trace!(resource, role = %role, policy = %policy, "Role check");
        Ok(if policy.permits(role) {
            Decision::Allow
        } else {
            Decision::DenyForbidden
        })
    }

    /// Check access, returning an error if denied
    pub fn require(&self, identity: Option<&Identity>, resource: &str) -> Result<(), AppError> {
        match self.decide(identity, resource)? {
            Decision::Allow => Ok(()),
            Decision::DenyUnauthenticated => Err(AccessDeniedError::unauthenticated(resource).into()),
            Decision::DenyForbidden => {
                let role = identity.map(|i| i.role.as_str()).unwrap_or("none");
                Err(AccessDeniedError::forbidden(resource, role).into())
            }
        }
    }
}
