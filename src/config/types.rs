//! Configuration types for mms-gate
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use crate::access_control::Role;
use crate::util::SecretString;
use serde::Deserialize;
use std::collections::HashMap;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Protected routes and the roles allowed to open them
    pub access_control: AccessControlConfig,

    /// Known portal accounts
    pub accounts: AccountsConfig,

    /// Where the signed-in session is kept between runs
    pub session: SessionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Access control configuration
///
/// Starts from the built-in portal route table unless `builtin = false`.
/// Entries under `resources` add routes or replace built-in ones.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccessControlConfig {
    /// Include the built-in portal routes
    pub builtin: bool,

    /// Per-route policies keyed by route path
    #[serde(default)]
    pub resources: HashMap<String, ResourceConfig>,
}

impl Default for AccessControlConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            resources: HashMap::new(),
        }
    }
}

/// Policy of a single route
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Kind of access
    pub access: ResourceAccess,

    /// Roles allowed when `access = "restricted"`
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// Route access kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceAccess {
    /// Only the listed roles
    #[default]
    Restricted,
    /// Any signed-in identity
    Open,
    /// No role at all
    Disabled,
}

impl ResourceAccess {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResourceAccess::Restricted => "restricted",
            ResourceAccess::Open => "open",
            ResourceAccess::Disabled => "disabled",
        }
    }
}

/// Account directory configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccountsConfig {
    /// Include the six demo accounts (one per role)
    pub demo: bool,

    /// Additional accounts
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            demo: true,
            users: Vec::new(),
        }
    }
}

/// A configured portal account
#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password: SecretString,
    #[serde(default)]
    pub status: AccountStatus,
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
}

/// Session storage configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Storage backend
    pub store: SessionStoreKind,

    /// Session file (for the file store); `~` is expanded
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store: SessionStoreKind::File,
            path: "~/.local/state/mms-gate/session.json".to_string(),
        }
    }
}

/// Session storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStoreKind {
    /// JSON file on disk (default)
    #[default]
    File,
    /// Process memory only, nothing survives a restart
    Memory,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}
