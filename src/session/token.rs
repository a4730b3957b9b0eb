//! The persisted bearer credential. Reads always go to the backing storage so
//! the HTTP client and the route guard observe the same value the moment it is
//! written, with no cached copy in between.

use crate::storage::{MemoryStorage, Storage, StorageError};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Storage key holding the credential.
pub const TOKEN_KEY: &str = "token_key";

/// Process-wide handle over the stored credential. Clones share one backing
/// store and one change channel.
#[derive(Clone, Debug)]
pub struct TokenStore {
    storage: Arc<dyn Storage>,
    changes: Arc<watch::Sender<bool>>,
}

impl TokenStore {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let present = read_token(storage.as_ref()).is_some();
        let (changes, _) = watch::channel(present);
        Self {
            storage,
            changes: Arc::new(changes),
        }
    }

    /// A store that forgets everything when the process exits.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Current credential, or `None` when unauthenticated.
    ///
    /// An unreadable store counts as empty: the caller proceeds unauthenticated
    /// and the server decides.
    #[must_use]
    pub fn get(&self) -> Option<SecretString> {
        read_token(self.storage.as_ref())
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }

    /// Persists `token` exactly as issued. A blank token is stored as absence.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    pub fn set(&self, token: &SecretString) -> Result<(), StorageError> {
        let value = token.expose_secret();
        if value.trim().is_empty() {
            return self.remove();
        }
        self.storage.set_item(TOKEN_KEY, value)?;
        debug!("credential stored");
        self.changes.send_replace(true);
        Ok(())
    }

    /// Erases the credential.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    pub fn remove(&self) -> Result<(), StorageError> {
        self.storage.remove_item(TOKEN_KEY)?;
        debug!("credential removed");
        self.changes.send_replace(false);
        Ok(())
    }

    /// Subscribes to presence changes. Every `set`/`remove` marks the value as
    /// changed, even when presence stays the same (re-login).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.changes.subscribe()
    }
}

fn read_token(storage: &dyn Storage) -> Option<SecretString> {
    match storage.get_item(TOKEN_KEY) {
        Ok(value) => value
            .filter(|value| !value.trim().is_empty())
            .map(SecretString::from),
        Err(err) => {
            warn!("credential store unreadable, treating as empty: {err}");
            None
        }
    }
}
