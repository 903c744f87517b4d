//! Configuration and credential persistence for Cardapio clients.
//!
//! TOML file + environment merge for API settings, platform config
//! paths, and the file-backed [`CredentialStore`] the auth store uses to
//! survive restarts.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use cardapio_api::TransportConfig;
use cardapio_core::{CredentialStore, StorageError};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,
}

/// Remote API settings.
#[derive(Debug, Deserialize, Serialize)]
pub struct ApiSettings {
    /// API base URL (e.g. "https://api.example.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3333".into()
}
fn default_timeout() -> u64 {
    30
}

impl Config {
    /// The parsed API base URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        self.api
            .base_url
            .parse()
            .map_err(|_| ConfigError::Validation {
                field: "api.base_url".into(),
                reason: format!("invalid URL: {}", self.api.base_url),
            })
    }

    /// Transport settings for building an `ApiClient`.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: Duration::from_secs(self.api.timeout),
        }
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "cardapio", "cardapio")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Resolve the credential storage directory.
pub fn credentials_dir() -> PathBuf {
    project_dirs().map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("credentials");
            p
        },
        |dirs| dirs.data_dir().join("credentials"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("cardapio");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full `Config` from file + environment.
///
/// Precedence: defaults < TOML file < `CARDAPIO_*` environment
/// variables (nested keys joined with `__`, e.g. `CARDAPIO_API__BASE_URL`).
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("CARDAPIO_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning defaults if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── File-backed credential store ────────────────────────────────────

/// One file per credential key under the platform data directory.
///
/// Missing entries read as `None`; removal is idempotent. Keys are
/// restricted to a filename-safe charset so a key can never escape the
/// storage directory.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    /// Store under the platform credential directory.
    pub fn new() -> Self {
        Self::with_dir(credentials_dir())
    }

    /// Store under an explicit directory.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let safe = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if safe {
            Ok(self.dir.join(key))
        } else {
            Err(StorageError(format!("invalid credential key: {key:?}")))
        }
    }
}

impl Default for FileCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError(format!("read {}: {e}", path.display()))),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| StorageError(format!("create {}: {e}", self.dir.display())))?;
        std::fs::write(&path, value)
            .map_err(|e| StorageError(format!("write {}: {e}", path.display())))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError(format!("remove {}: {e}", path.display()))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert!(config.base_url().is_ok());
        assert_eq!(config.transport().timeout, Duration::from_secs(30));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = Config {
            api: ApiSettings {
                base_url: "not a url".into(),
                timeout: 30,
            },
        };
        assert!(matches!(
            config.base_url(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::with_dir(dir.path().to_path_buf());

        assert_eq!(store.get("auth_token").unwrap(), None);
        store.put("auth_token", "tok-123").unwrap();
        assert_eq!(store.get("auth_token").unwrap().as_deref(), Some("tok-123"));
        store.remove("auth_token").unwrap();
        assert_eq!(store.get("auth_token").unwrap(), None);
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::with_dir(dir.path().to_path_buf());
        store.remove("auth_token").unwrap();
        store.remove("auth_token").unwrap();
    }

    #[test]
    fn unsafe_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::with_dir(dir.path().to_path_buf());
        assert!(store.put("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }
}
