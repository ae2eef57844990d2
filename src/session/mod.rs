//! Session module
//!
//! Sign-in state for the portal. Accounts live in a [`CredentialDirectory`];
//! the signed-in identity is owned by a [`SessionProvider`] and may be
//! round-tripped through a [`SessionStore`] so that a restart restores it.

pub mod directory;
pub mod provider;
pub mod store;

pub use directory::{Account, CredentialDirectory};
pub use provider::{IdentitySource, LocalSession, SessionProvider};
pub use store::{
    BoxedSessionStore, FileSessionStore, MemorySessionStore, SessionStore, create_session_store,
};
