//! Access control types
//!
//! Core types used by the access control system.

use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

/// Route paths: a leading slash followed by lowercase segments.
static RESOURCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/[a-z0-9\-/]*$").expect("resource pattern is a valid regex")
});

/// Portal role. Every signed-in identity carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Finance,
    ProjectManager,
    HrManager,
    Clerk,
    Citizen,
}

impl Role {
    /// Get the role tag as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Finance => "finance",
            Role::ProjectManager => "project_manager",
            Role::HrManager => "hr_manager",
            Role::Clerk => "clerk",
            Role::Citizen => "citizen",
        }
    }

    /// Try to parse a role from its tag
    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "finance" => Some(Role::Finance),
            "project_manager" => Some(Role::ProjectManager),
            "hr_manager" => Some(Role::HrManager),
            "clerk" => Some(Role::Clerk),
            "citizen" => Some(Role::Citizen),
            _ => None,
        }
    }

    /// Human-readable label shown on profile pages
    pub const fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Finance => "Finance Officer",
            Role::ProjectManager => "Project Manager",
            Role::HrManager => "HR Manager",
            Role::Clerk => "Clerk",
            Role::Citizen => "Citizen",
        }
    }

    /// Get all roles
    pub fn all() -> &'static [Role] {
        &[
            Role::Admin,
            Role::Finance,
            Role::ProjectManager,
            Role::HrManager,
            Role::Clerk,
            Role::Citizen,
        ]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authenticated session record
///
/// A present identity always has exactly one role; there is no role-less
/// signed-in state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
        }
    }
}

/// Identifier of a protected destination (a route path)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    /// Validate and wrap a route path
    pub fn parse(path: &str) -> Result<Self, ConfigError> {
        if !RESOURCE_PATTERN.is_match(path) {
            return Err(ConfigError::InvalidResource {
                resource: path.to_string(),
                reason: "expected a lowercase route path starting with '/'".into(),
            });
        }
        if path.len() > 1 && path.ends_with('/') {
            return Err(ConfigError::InvalidResource {
                resource: path.to_string(),
                reason: "trailing slash".into(),
            });
        }
        Ok(Self(path.to_string()))
    }

    /// Wrap a compile-time route path known to be well formed
    pub(crate) fn from_static(path: &'static str) -> Self {
        debug_assert!(RESOURCE_PATTERN.is_match(path), "malformed route {path}");
        Self(path.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ResourceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResourceId {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ResourceId> for String {
    fn from(value: ResourceId) -> Self {
        value.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who may open a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourcePolicy {
    /// Any signed-in identity, never an anonymous one
    Open,
    /// Only the listed roles. An empty set disables the resource for everyone.
    Restricted(BTreeSet<Role>),
}

impl ResourcePolicy {
    /// Restrict a resource to the given roles
    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
        ResourcePolicy::Restricted(roles.into_iter().collect())
    }

    /// A resource that no role may open
    pub fn disabled() -> Self {
        ResourcePolicy::Restricted(BTreeSet::new())
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ResourcePolicy::Open)
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, ResourcePolicy::Restricted(roles) if roles.is_empty())
    }

    /// Check whether an identity with this role may open the resource
    pub fn permits(&self, role: Role) -> bool {
        match self {
            ResourcePolicy::Open => true,
            ResourcePolicy::Restricted(roles) => roles.contains(&role),
        }
    }
}

impl fmt::Display for ResourcePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourcePolicy::Open => f.write_str("open"),
            ResourcePolicy::Restricted(roles) if roles.is_empty() => f.write_str("disabled"),
            ResourcePolicy::Restricted(roles) => {
                let tags: Vec<&str> = roles.iter().map(Role::as_str).collect();
                f.write_str(&tags.join(", "))
            }
        }
    }
}

/// Outcome of an access check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    /// Nobody is signed in
    DenyUnauthenticated,
    /// Signed in, but the role is not permitted
    DenyForbidden,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn is_denied(&self) -> bool {
        !self.is_allowed()
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::DenyUnauthenticated => "deny_unauthenticated",
            Decision::DenyForbidden => "deny_forbidden",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
