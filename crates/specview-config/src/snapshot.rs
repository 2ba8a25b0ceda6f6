//! Process-wide configuration snapshot with replace-on-reload semantics.
//!
//! Readers take an `Arc` to the current snapshot and keep using it for the
//! whole request. A reload builds a complete new snapshot and swaps the single
//! shared reference, so a request sees either the old or the new config and
//! never a mix of both.

#![deny(unsafe_code)]

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use sha2::Digest;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::store::ConfigStore;

/// Environment variable naming the default configuration document.
pub const CONFIG_ENV_VAR: &str = "SPECVIEW_CONFIG";

/// Default document path: `SPECVIEW_CONFIG`, else `spec_view_configs/spec_view_configs.json`.
pub fn default_config_path() -> std::path::PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return path.into();
    }
    std::path::PathBuf::from("spec_view_configs").join("spec_view_configs.json")
}

/// An immutable store plus the sha256 of the bytes it was built from.
#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    store: ConfigStore,
    fingerprint: String,
}

impl ConfigSnapshot {
    pub fn from_bytes(bytes: &[u8], origin: &str) -> Result<Self, ConfigError> {
        let store = ConfigStore::from_slice(bytes, origin)?;
        Ok(Self {
            store,
            fingerprint: fingerprint(bytes),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_bytes(&bytes, &path.display().to_string())
    }

    /// Wraps an in-memory store; the fingerprint is taken over its JSON form.
    pub fn from_store(store: ConfigStore) -> Result<Self, ConfigError> {
        let json = store.to_json_pretty()?;
        Ok(Self {
            fingerprint: fingerprint(json.as_bytes()),
            store,
        })
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(sha2::Sha256::digest(bytes))
}

/// Shared handle to the current snapshot.
#[derive(Debug)]
pub struct ConfigHandle {
    current: RwLock<Arc<ConfigSnapshot>>,
}

impl ConfigHandle {
    pub fn new(snapshot: ConfigSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        ConfigSnapshot::from_path(path).map(Self::new)
    }

    /// The snapshot in effect right now.
    pub fn current(&self) -> Arc<ConfigSnapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replaces the current snapshot, returning the previous one.
    pub fn publish(&self, snapshot: ConfigSnapshot) -> Arc<ConfigSnapshot> {
        let next = Arc::new(snapshot);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Loads `path` and publishes it if its content differs from the current
    /// snapshot. A failed load leaves the current snapshot untouched.
    pub fn reload_from_path(&self, path: &Path) -> Result<bool, ConfigError> {
        let candidate = ConfigSnapshot::from_path(path)?;
        if candidate.fingerprint() == self.current().fingerprint() {
            debug!(path = %path.display(), "config unchanged, keeping snapshot");
            return Ok(false);
        }
        let fingerprint = candidate.fingerprint().to_string();
        self.publish(candidate);
        info!(path = %path.display(), %fingerprint, "published new config snapshot");
        Ok(true)
    }
}
