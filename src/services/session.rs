use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

use crate::models::SessionUser;

/// Fixed key the logged-in user is stored under
pub const SESSION_STORAGE_KEY: &str = "tutor_match_user";

/// Errors that can occur with session storage
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No active session")]
    NoActiveSession,

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Key/value persistence for session state
pub trait SessionStore: Send + Sync {
    /// Raw stored value, `None` when the key is absent
    fn load(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn save(&self, key: &str, value: &str) -> Result<(), SessionError>;
    /// Removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        // Write-then-rename: the stored user is never half-written
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path_for(key))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store, used by tests and ephemeral runs
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a raw value, e.g. to simulate corrupted content
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        let entries = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().map_err(|_| SessionError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Logged-in user with read-once init and explicit teardown
///
/// The store is read exactly once in [`SessionContext::init`]. Afterwards the
/// in-memory copy is authoritative and every change is written through.
pub struct SessionContext {
    store: Box<dyn SessionStore>,
    current: Option<SessionUser>,
}

impl SessionContext {
    /// Read the persisted user, treating anything unusable as "no session"
    pub fn init(store: Box<dyn SessionStore>) -> Self {
        let current = match store.load(SESSION_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<SessionUser>(&raw) {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, role = %user.role, "Restored session");
                    Some(user)
                }
                Err(e) => {
                    tracing::warn!("Discarding corrupted session data: {}", e);
                    if let Err(e) = store.remove(SESSION_STORAGE_KEY) {
                        tracing::warn!("Failed to remove corrupted session data: {}", e);
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read session storage, starting logged out: {}", e);
                None
            }
        };

        Self { store, current }
    }

    pub fn current(&self) -> Option<&SessionUser> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn login(&mut self, user: SessionUser) -> Result<&SessionUser, SessionError> {
        self.persist(&user)?;
        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(&*self.current.insert(user))
    }

    /// Apply `f` to the current user and persist the result
    pub fn update<F>(&mut self, f: F) -> Result<&SessionUser, SessionError>
    where
        F: FnOnce(&mut SessionUser),
    {
        let mut user = self.current.clone().ok_or(SessionError::NoActiveSession)?;
        f(&mut user);
        self.persist(&user)?;
        tracing::debug!(user_id = %user.id, "Session user updated");
        Ok(&*self.current.insert(user))
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.store.remove(SESSION_STORAGE_KEY)?;
        if let Some(user) = self.current.take() {
            tracing::info!(user_id = %user.id, "User logged out");
        }
        Ok(())
    }

    fn persist(&self, user: &SessionUser) -> Result<(), SessionError> {
        let json = serde_json::to_string(user)?;
        self.store.save(SESSION_STORAGE_KEY, &json)
    }
}
