//! Error types for mms-gate
//!
//! This module defines the error hierarchy used throughout the crate.
//! We use `thiserror` for library-style errors that are part of the API.
//! Access decisions are not errors: `DenyUnauthenticated` and `DenyForbidden`
//! are ordinary outcomes that the routing layer turns into redirects.

use crate::access_control::Decision;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Session storage error: {0}")]
    Session(#[from] SessionError),

    #[error("Access denied: {0}")]
    AccessDenied(#[from] AccessDeniedError),
}

/// Configuration-related errors
///
/// These are programmer or deployment mistakes. They surface at startup or in
/// tests and are never shown to an end user.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },

    #[error("Invalid resource identifier '{resource}': {reason}")]
    InvalidResource { resource: String, reason: String },

    #[error("Resource '{resource}' is not registered in the access policy")]
    UnregisteredResource { resource: String },

    #[error("Resource '{resource}' is already registered")]
    DuplicateResource { resource: String },

    #[error("Cannot register '{resource}': the access policy is sealed")]
    Sealed { resource: String },
}

impl ConfigError {
    pub fn unregistered(resource: impl Into<String>) -> Self {
        Self::UnregisteredResource {
            resource: resource.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Authentication errors raised by the session provider
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account '{email}' is not active")]
    AccountInactive { email: String },
}

/// Errors from persisting or restoring the session record
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed session record: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Access denial raised by [`AccessResolver::require`](crate::access_control::AccessResolver::require)
#[derive(Error, Debug)]
#[error("Access denied for '{resource}': {reason}")]
pub struct AccessDeniedError {
    pub resource: String,
    pub decision: Decision,
    pub reason: String,
}

impl AccessDeniedError {
    pub fn unauthenticated(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            decision: Decision::DenyUnauthenticated,
            reason: "sign-in required".into(),
        }
    }

    pub fn forbidden(resource: impl Into<String>, role: impl std::fmt::Display) -> Self {
        Self {
            resource: resource.into(),
            decision: Decision::DenyForbidden,
            reason: format!("role '{}' is not permitted", role),
        }
    }
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_constructors() {
        let err = AccessDeniedError::unauthenticated("/admin/finance");
        assert_eq!(err.decision, Decision::DenyUnauthenticated);
        assert!(err.to_string().contains("/admin/finance"));

        let err = AccessDeniedError::forbidden("/admin/finance", "clerk");
        assert_eq!(err.decision, Decision::DenyForbidden);
        assert!(err.reason.contains("clerk"));
    }

    #[test]
    fn test_invalid_credentials_does_not_leak_which_field() {
        let message = AuthError::InvalidCredentials.to_string();
        assert_eq!(message, "Invalid email or password");
    }

    #[test]
    fn test_config_error_wraps_into_app_error() {
        let err: AppError = ConfigError::unregistered("/nowhere").into();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::UnregisteredResource { .. })
        ));
        assert!(err.to_string().contains("/nowhere"));
    }
}
