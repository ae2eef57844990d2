//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (MMS_GATE__*)
//! 2. Configuration file (TOML)
//! 3. Default values

use crate::access_control::ResourceId;
use crate::config::types::{AppConfig, ResourceAccess, SessionStoreKind};
use crate::error::ConfigError;
use crate::util::expand_path;
use config::{Config, Environment, File, FileFormat};
use std::collections::HashSet;
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "mms-gate.toml",
    ".mms-gate.toml",
    "~/.config/mms-gate/config.toml",
    "/etc/mms-gate/config.toml",
];

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. Start with defaults (handled by serde defaults on AppConfig)

    // 2. Add configuration file
    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = expand_path(path);
            if expanded.exists() {
                builder = builder.add_source(File::new(&expanded.to_string_lossy(), FileFormat::Toml));
                break;
            }
        }
    }

    // 3. Add environment variables with MMS_GATE prefix
    // e.g., MMS_GATE__LOGGING__LEVEL, MMS_GATE__SESSION__STORE
    // Double underscore (__) maps to nested keys (logging.level)
    builder = builder.add_source(
        Environment::with_prefix("MMS_GATE")
            .separator("__")
            .try_parsing(true),
    );

    // Build and deserialize
    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    // Validate the configuration
    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    validate_resources(config)?;
    validate_accounts(config)?;

    if config.session.store == SessionStoreKind::File && config.session.path.trim().is_empty() {
        return Err(ConfigError::Missing {
            field: "session.path".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.to_ascii_lowercase().as_str()) {
        return Err(ConfigError::invalid(format!(
            "logging.level must be one of {}, got: {}",
            LOG_LEVELS.join(", "),
            config.logging.level
        )));
    }

    Ok(())
}

/// Validate route paths and role lists in access control
fn validate_resources(config: &AppConfig) -> Result<(), ConfigError> {
    for (resource, resource_config) in &config.access_control.resources {
        ResourceId::parse(resource)?;

        let has_roles = !resource_config.roles.is_empty();
        match resource_config.access {
            ResourceAccess::Restricted if !has_roles => {
                return Err(ConfigError::invalid(format!(
                    "access_control.resources.\"{}\".roles must not be empty for restricted access",
                    resource
                )));
            }
            ResourceAccess::Open | ResourceAccess::Disabled if has_roles => {
                return Err(ConfigError::invalid(format!(
                    "access_control.resources.\"{}\".roles is not allowed with access = \"{}\"",
                    resource,
                    resource_config.access.as_str()
                )));
            }
            _ => {}
        }
    }
    Ok(())
}

/// Validate configured accounts
fn validate_accounts(config: &AppConfig) -> Result<(), ConfigError> {
    let mut emails = HashSet::new();
    let mut ids = HashSet::new();

    for (index, user) in config.accounts.users.iter().enumerate() {
        if user.id.trim().is_empty() {
            return Err(ConfigError::Missing {
                field: format!("accounts.users[{}].id", index),
            });
        }
        if !user.email.contains('@') {
            return Err(ConfigError::invalid(format!(
                "accounts.users[{}].email is not an email address: {}",
                index, user.email
            )));
        }
        if user.password.expose_secret().is_empty() {
            return Err(ConfigError::Missing {
                field: format!("accounts.users[{}].password", index),
            });
        }
        if !emails.insert(user.email.to_ascii_lowercase()) {
            return Err(ConfigError::invalid(format!(
                "duplicate account email: {}",
                user.email
            )));
        }
        if !ids.insert(user.id.as_str()) {
            return Err(ConfigError::invalid(format!(
                "duplicate account id: {}",
                user.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access_control::Role;
    use crate::config::types::AccountStatus;

    #[test]
    fn test_load_config_from_str_basic() {
        let toml = r#"
[access_control]
builtin = true

[logging]
level = "debug"
"#;

        let config = load_config_from_str(toml).unwrap();
        assert!(config.access_control.builtin);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_config_from_str_with_resources() {
        let toml = r#"
[access_control.resources."/admin/audit"]
roles = ["admin", "finance"]

[access_control.resources."/help"]
access = "open"
"#;

        let config = load_config_from_str(toml).unwrap();
        let audit = config.access_control.resources.get("/admin/audit").unwrap();
        assert_eq!(audit.access, ResourceAccess::Restricted);
        assert_eq!(audit.roles, vec![Role::Admin, Role::Finance]);

        let help = config.access_control.resources.get("/help").unwrap();
        assert_eq!(help.access, ResourceAccess::Open);
    }

    #[test]
    fn test_invalid_resource_path() {
        let toml = r#"
[access_control.resources."admin/audit"]
roles = ["admin"]
"#;

        let result = load_config_from_str(toml);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidResource { .. }
        ));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let toml = r#"
[access_control.resources."/admin/audit"]
roles = ["superuser"]
"#;

        assert!(load_config_from_str(toml).is_err());
    }

    #[test]
    fn test_accounts() {
        let toml = r#"
[accounts]
demo = false

[[accounts.users]]
id = "100"
name = "Night Clerk"
email = "night@mms.gov"
role = "clerk"
password = "lamp"
status = "inactive"
"#;

        let config = load_config_from_str(toml).unwrap();
        assert!(!config.accounts.demo);
        assert_eq!(config.accounts.users.len(), 1);
        assert_eq!(config.accounts.users[0].role, Role::Clerk);
        assert_eq!(config.accounts.users[0].status, AccountStatus::Inactive);
    }

    #[test]
    fn test_duplicate_account_email() {
        let toml = r#"
[[accounts.users]]
id = "100"
name = "A"
email = "same@mms.gov"
role = "clerk"
password = "a"

[[accounts.users]]
id = "101"
name = "B"
email = "SAME@mms.gov"
role = "finance"
password = "b"
"#;

        let result = load_config_from_str(toml);
        assert!(matches!(result.unwrap_err(), ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_invalid_log_level() {
        let toml = r#"
[logging]
level = "loud"
"#;

        assert!(load_config_from_str(toml).is_err());
    }
}
