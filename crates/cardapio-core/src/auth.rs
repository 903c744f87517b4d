// ── Auth store ──
//
// Holds the current session as one atomically-replaced value: a token
// never exists without its user, in memory or on disk. Persistence goes
// through the `CredentialStore` collaborator so the storage medium stays
// swappable (file-backed in `cardapio-config`, in-memory for tests).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;
use secrecy::SecretString;
use thiserror::Error;
use tracing::{debug, warn};

use cardapio_api::ApiClient;

use crate::error::CoreError;
use crate::model::{Session, User};
use crate::validate;

/// Persisted key for the bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Persisted key for the JSON-serialized user record.
pub const USER_KEY: &str = "auth_user";

/// Failure inside a credential store.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StorageError(pub String);

/// Durable key-value storage for session credentials.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: CredentialStore + ?Sized> CredentialStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory credential store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .lock()
            .expect("credential store lock poisoned")
            .get(key)
            .cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .expect("credential store lock poisoned")
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .expect("credential store lock poisoned")
            .remove(key);
        Ok(())
    }
}

// ── Store ────────────────────────────────────────────────────────────

/// Process-wide session state.
///
/// Owns the bearer token on the shared [`ApiClient`]: whenever the
/// session changes, the client's token is set or cleared with it.
pub struct AuthStore<S: CredentialStore> {
    api: Arc<ApiClient>,
    storage: S,
    session: ArcSwapOption<Session>,
}

impl<S: CredentialStore> AuthStore<S> {
    pub fn new(api: Arc<ApiClient>, storage: S) -> Self {
        Self {
            api,
            storage,
            session: ArcSwapOption::empty(),
        }
    }

    /// Snapshot of the current session, if any.
    pub fn session(&self) -> Option<Arc<Session>> {
        self.session.load_full()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.load().is_some()
    }

    /// Authenticate and establish a session.
    ///
    /// Client-side validation runs first; the API is only hit with
    /// plausible input. A rejected login fails with
    /// [`CoreError::InvalidCredentials`], an unreachable API with
    /// [`CoreError::Unreachable`]; in both cases nothing is persisted
    /// and the store stays session-less.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Arc<Session>, CoreError> {
        validate::login(email, password).map_err(CoreError::Validation)?;

        let reply = self.api.login(email, password).await?;
        let user = User::from(reply.user);

        // Persist both entries before exposing the session; a half
        // written pair is rolled back rather than left behind.
        let user_json =
            serde_json::to_string(&user).map_err(|e| CoreError::Storage(e.to_string()))?;
        if let Err(err) = self
            .storage
            .put(TOKEN_KEY, &reply.token)
            .and_then(|()| self.storage.put(USER_KEY, &user_json))
        {
            self.clear_persisted();
            return Err(CoreError::Storage(err.to_string()));
        }

        let session = Arc::new(Session {
            token: SecretString::from(reply.token),
            user,
        });
        self.api.set_token(session.token.clone());
        self.session.store(Some(Arc::clone(&session)));

        debug!(user = %session.user.email, "signed in");
        Ok(session)
    }

    /// End the session unconditionally. Never fails: storage errors are
    /// logged and swallowed, the in-memory session is gone regardless.
    pub fn sign_out(&self) {
        self.session.store(None);
        self.api.clear_token();
        self.clear_persisted();
        debug!("signed out");
    }

    /// Restore a persisted session at startup.
    ///
    /// Absent or corrupt entries (including a token without its user, or
    /// the reverse) yield `None` and clear whatever was there -- corrupt
    /// state never throws and never survives.
    pub fn restore(&self) -> Option<Arc<Session>> {
        let token = self.read_entry(TOKEN_KEY)?;
        let user_raw = self.read_entry(USER_KEY)?;

        let user: User = match serde_json::from_str(&user_raw) {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "persisted user is corrupt, clearing session");
                self.clear_persisted();
                return None;
            }
        };

        let session = Arc::new(Session {
            token: SecretString::from(token),
            user,
        });
        self.api.set_token(session.token.clone());
        self.session.store(Some(Arc::clone(&session)));

        debug!(user = %session.user.email, "session restored");
        Some(session)
    }

    /// Read one persisted entry; a missing entry or a storage failure
    /// clears both and aborts the restore.
    fn read_entry(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(Some(value)) => Some(value),
            Ok(None) => {
                self.clear_persisted();
                None
            }
            Err(err) => {
                warn!(key, error = %err, "credential read failed, clearing session");
                self.clear_persisted();
                None
            }
        }
    }

    fn clear_persisted(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.storage.remove(key) {
                warn!(key, error = %err, "failed to clear credential entry");
            }
        }
    }
}
