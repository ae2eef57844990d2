//! Session provider
//!
//! Owns the signed-in identity. Everything else only reads it through
//! [`IdentitySource`]; only the provider's `login`/`logout` mutate it.

use crate::access_control::Identity;
use crate::error::{AuthError, SessionError};
use crate::session::directory::CredentialDirectory;
use crate::session::store::SessionStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Read side of the session: a synchronous snapshot of who is signed in
pub trait IdentitySource {
    fn current_identity(&self) -> Option<Identity>;
}

/// Session provider: the read API plus the narrow mutation API
///
/// States: `Unauthenticated → Authenticated(role) → Unauthenticated`.
pub trait SessionProvider: IdentitySource {
    /// Sign in. A failure never changes the current state.
    fn login(&mut self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Sign out. Always ends unauthenticated.
    fn logout(&mut self);

    fn is_authenticated(&self) -> bool {
        self.current_identity().is_some()
    }
}

/// Session provider backed by a [`CredentialDirectory`]
#[derive(Debug, Clone)]
pub struct LocalSession {
    directory: Arc<CredentialDirectory>,
    current: Option<Identity>,
}

impl LocalSession {
    /// Start unauthenticated
    pub fn new(directory: Arc<CredentialDirectory>) -> Self {
        Self {
            directory,
            current: None,
        }
    }

    /// Rebuild the session from storage
    ///
    /// A stored record that is malformed, or that no longer matches an
    /// active account, is discarded and the session starts unauthenticated.
    pub async fn restore(
        directory: Arc<CredentialDirectory>,
        store: &dyn SessionStore,
    ) -> Result<Self, SessionError> {
        let mut session = Self::new(directory);

        let stored = match store.load().await {
            Ok(stored) => stored,
            Err(SessionError::Serialization(e)) => {
                warn!(error = %e, store = store.store_type(), "Discarding malformed session record");
                store.clear().await?;
                None
            }
            Err(e) => return Err(e),
        };

        if let Some(identity) = stored {
            if session.directory.recognizes(&identity) {
                info!(user = %identity.email, role = %identity.role, "Session restored");
                session.current = Some(identity);
            } else {
                warn!(user = %identity.email, "Stored session does not match an active account");
                store.clear().await?;
            }
        }

        Ok(session)
    }

    /// Write the current state to storage (clears it when signed out)
    pub async fn persist(&self, store: &dyn SessionStore) -> Result<(), SessionError> {
        match &self.current {
            Some(identity) => store.save(identity).await,
            None => store.clear().await,
        }
    }

    /// Borrow the signed-in identity without cloning
    pub fn identity(&self) -> Option<&Identity> {
        self.current.as_ref()
    }
}

impl IdentitySource for LocalSession {
    fn current_identity(&self) -> Option<Identity> {
        self.current.clone()
    }
}

impl SessionProvider for LocalSession {
    fn login(&mut self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = self
            .directory
            .authenticate(email, password)
            .inspect_err(|e| warn!(email, error = %e, "Login failed"))?;

        info!(user = %identity.email, role = %identity.role, "Logged in");
        self.current = Some(identity.clone());
        Ok(identity)
    }

    fn logout(&mut self) {
        if let Some(identity) = self.current.take() {
            info!(user = %identity.email, "Logged out");
        }
    }
}

impl IdentitySource for Option<Identity> {
    fn current_identity(&self) -> Option<Identity> {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access_control::Role;

    fn session() -> LocalSession {
        LocalSession::new(Arc::new(CredentialDirectory::demo()))
    }

    #[test]
    fn test_starts_unauthenticated() {
        let session = session();
        assert!(!session.is_authenticated());
        assert!(session.current_identity().is_none());
    }

    #[test]
    fn test_login_then_logout() {
        let mut session = session();

        let identity = session.login("hr@mms.gov", "hr123").unwrap();
        assert_eq!(identity.role, Role::HrManager);
        assert_eq!(session.current_identity(), Some(identity));

        session.logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_failed_login_keeps_unauthenticated_state() {
        let mut session = session();
        assert!(matches!(
            session.login("hr@mms.gov", "nope"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_failed_login_keeps_existing_session() {
        let mut session = session();
        session.login("clerk@mms.gov", "clerk123").unwrap();

        assert!(session.login("admin@mms.gov", "guess").is_err());
        assert_eq!(session.identity().map(|i| i.role), Some(Role::Clerk));
    }

    #[test]
    fn test_logout_when_signed_out_is_noop() {
        let mut session = session();
        session.logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_option_is_an_identity_source() {
        let none: Option<Identity> = None;
        assert!(none.current_identity().is_none());
    }
}
