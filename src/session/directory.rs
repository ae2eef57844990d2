//! Credential directory
//!
//! The set of known portal accounts that `login` checks against.

use crate::access_control::{Identity, Role};
use crate::config::{AccountStatus, AccountsConfig};
use crate::error::{AuthError, ConfigError};
use crate::util::SecretString;
use std::collections::HashMap;
use tracing::debug;

/// A known account: the identity it signs in as, plus its credentials
#[derive(Debug, Clone)]
pub struct Account {
    pub identity: Identity,
    password: SecretString,
    pub status: AccountStatus,
}

impl Account {
    pub fn new(identity: Identity, password: SecretString, status: AccountStatus) -> Self {
        Self {
            identity,
            password,
            status,
        }
    }
}

/// Accounts keyed by lowercase email
#[derive(Debug, Clone, Default)]
pub struct CredentialDirectory {
    accounts: HashMap<String, Account>,
}

impl CredentialDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The demo accounts, one per role
    pub fn demo() -> Self {
        let mut directory = Self::new();
        for (id, name, email, password, role) in [
            ("1", "Admin User", "admin@mms.gov", "admin123", Role::Admin),
            ("2", "Finance Officer", "finance@mms.gov", "finance123", Role::Finance),
            ("3", "Project Manager", "project@mms.gov", "project123", Role::ProjectManager),
            ("4", "HR Manager", "hr@mms.gov", "hr123", Role::HrManager),
            ("5", "Clerk Staff", "clerk@mms.gov", "clerk123", Role::Clerk),
            ("6", "John Citizen", "citizen@example.com", "citizen123", Role::Citizen),
        ] {
            directory.accounts.insert(
                email.to_string(),
                Account::new(
                    Identity::new(id, name, email, role),
                    SecretString::new(password),
                    AccountStatus::Active,
                ),
            );
        }
        directory
    }

    /// Build the directory from configuration
    pub fn from_config(config: &AccountsConfig) -> Result<Self, ConfigError> {
        let mut directory = if config.demo { Self::demo() } else { Self::new() };

        for user in &config.users {
            let account = Account::new(
                Identity::new(&user.id, &user.name, &user.email, user.role),
                user.password.clone(),
                user.status,
            );
            directory.insert(account)?;
        }

        debug!(accounts = directory.len(), "Credential directory loaded");
        Ok(directory)
    }

    /// Add an account; emails are unique ignoring case
    pub fn insert(&mut self, account: Account) -> Result<(), ConfigError> {
        let key = normalize_email(&account.identity.email);
        if self.accounts.contains_key(&key) {
            return Err(ConfigError::invalid(format!(
                "duplicate account email: {}",
                account.identity.email
            )));
        }
        self.accounts.insert(key, account);
        Ok(())
    }

    /// Check credentials and return the identity they sign in as
    ///
    /// Unknown email and wrong password produce the same error.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let account = self
            .accounts
            .get(&normalize_email(email))
            .filter(|account| account.password.matches(password))
            .ok_or(AuthError::InvalidCredentials)?;

        if account.status != AccountStatus::Active {
            return Err(AuthError::AccountInactive {
                email: account.identity.email.clone(),
            });
        }

        Ok(account.identity.clone())
    }

    /// Whether `identity` still describes a known, active account
    ///
    /// Used when restoring a stored session.
    pub fn recognizes(&self, identity: &Identity) -> bool {
        self.accounts
            .get(&normalize_email(&identity.email))
            .is_some_and(|account| {
                account.status == AccountStatus::Active && account.identity == *identity
            })
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_has_one_account_per_role() {
        let directory = CredentialDirectory::demo();
        assert_eq!(directory.len(), Role::all().len());
    }

    #[test]
    fn test_authenticate() {
        let directory = CredentialDirectory::demo();

        let identity = directory.authenticate("finance@mms.gov", "finance123").unwrap();
        assert_eq!(identity.role, Role::Finance);
        assert_eq!(identity.name, "Finance Officer");
    }

    #[test]
    fn test_email_is_case_insensitive() {
        let directory = CredentialDirectory::demo();
        let identity = directory.authenticate(" Clerk@MMS.gov ", "clerk123").unwrap();
        assert_eq!(identity.role, Role::Clerk);
    }

    #[test]
    fn test_wrong_password_and_unknown_email_look_the_same() {
        let directory = CredentialDirectory::demo();

        assert!(matches!(
            directory.authenticate("admin@mms.gov", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            directory.authenticate("nobody@mms.gov", "admin123"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_inactive_account() {
        let mut directory = CredentialDirectory::new();
        directory
            .insert(Account::new(
                Identity::new("9", "Retired", "old@mms.gov", Role::Clerk),
                SecretString::new("pw"),
                AccountStatus::Inactive,
            ))
            .unwrap();

        assert!(matches!(
            directory.authenticate("old@mms.gov", "pw"),
            Err(AuthError::AccountInactive { .. })
        ));
    }

    #[test]
    fn test_recognizes() {
        let directory = CredentialDirectory::demo();
        let admin = directory.authenticate("admin@mms.gov", "admin123").unwrap();
        assert!(directory.recognizes(&admin));

        let forged = Identity {
            role: Role::Admin,
            ..directory.authenticate("citizen@example.com", "citizen123").unwrap()
        };
        assert!(!directory.recognizes(&forged));
    }
}
