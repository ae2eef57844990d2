//! Session storage
//!
//! Round-trips the signed-in identity so a restart restores the same
//! session record. This is the only asynchronous boundary of the crate;
//! access decisions never await it.

use crate::access_control::Identity;
use crate::config::{SessionConfig, SessionStoreKind};
use crate::error::SessionError;
use crate::util::expand_path;
// async_trait required for dyn-compatibility with Box<dyn SessionStore>
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Storage medium for the current session record
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the stored identity, if any
    async fn load(&self) -> Result<Option<Identity>, SessionError>;

    /// Replace the stored identity
    async fn save(&self, identity: &Identity) -> Result<(), SessionError>;

    /// Remove the stored identity. Succeeds when nothing is stored.
    async fn clear(&self) -> Result<(), SessionError>;

    /// Short description of the backend (for logging)
    fn store_type(&self) -> &'static str;
}

/// Box type alias for session stores
pub type BoxedSessionStore = Box<dyn SessionStore>;

/// Create a session store from configuration
pub fn create_session_store(config: &SessionConfig) -> BoxedSessionStore {
    match config.store {
        SessionStoreKind::File => Box::new(FileSessionStore::new(expand_path(&config.path))),
        SessionStoreKind::Memory => Box::new(MemorySessionStore::new()),
    }
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Identity>, SessionError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let identity = serde_json::from_str(&contents)?;
        debug!(path = %self.path.display(), "Loaded stored session");
        Ok(Some(identity))
    }

    async fn save(&self, identity: &Identity) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_string_pretty(identity)?;
        tokio::fs::write(&self.path, contents).await?;
        debug!(path = %self.path.display(), "Saved session");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn store_type(&self) -> &'static str {
        "file"
    }
}

/// In-process store; nothing survives a restart
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Identity>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with an identity
    pub fn with_identity(identity: Identity) -> Self {
        Self {
            slot: Mutex::new(Some(identity)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Identity>> {
        // A poisoned slot still holds a complete Option
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Identity>, SessionError> {
        Ok(self.slot().clone())
    }

    async fn save(&self, identity: &Identity) -> Result<(), SessionError> {
        *self.slot() = Some(identity.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.slot() = None;
        Ok(())
    }

    fn store_type(&self) -> &'static str {
        "memory"
    }
}
