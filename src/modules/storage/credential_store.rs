//! Persisted credential storage
//!
//! Mirrors the browser pair the admin panel relies on: a cookie and local
//! storage, both holding the token and the serialized user. The two are kept
//! in sync by `SyncedCredentialStore`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::core::error::{AppError, Result};

/// Key holding the bearer token
pub const TOKEN_KEY: &str = "token";

/// Key holding the serialized user profile
pub const USER_KEY: &str = "user";

/// Minimal string key/value persistence
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local store, lost on exit
#[derive(Default)]
pub struct MemoryCredentialStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.items.write().await.remove(key);
        Ok(())
    }
}

/// JSON object on disk; every write rewrites the whole file
pub struct FileCredentialStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<HashMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
            Ok(content) => serde_json::from_str(&content).or_else(|e| {
                warn!(
                    "Credential file {} is corrupt ({}); starting empty",
                    self.path.display(),
                    e
                );
                Ok(HashMap::new())
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn write_all(&self, items: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        let content = serde_json::to_string_pretty(items)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_all().await?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_all().await?;
        if items.remove(key).is_some() {
            self.write_all(&items).await?;
        }
        Ok(())
    }
}

/// Cookie + local storage pair, written together.
///
/// Reads prefer the cookie and fall back to local storage. On read, a missing
/// side is repaired from the other and a diverging local value is overwritten
/// with the cookie.
pub struct SyncedCredentialStore {
    cookie: Arc<dyn CredentialStore>,
    local: Arc<dyn CredentialStore>,
}

impl SyncedCredentialStore {
    pub fn new(cookie: Arc<dyn CredentialStore>, local: Arc<dyn CredentialStore>) -> Self {
        Self { cookie, local }
    }

    /// File-backed pair under `dir` (`cookie.json` + `local_storage.json`)
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            Arc::new(FileCredentialStore::new(dir.join("cookie.json"))),
            Arc::new(FileCredentialStore::new(dir.join("local_storage.json"))),
        )
    }
}

#[async_trait]
impl CredentialStore for SyncedCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let from_cookie = self.cookie.get(key).await?;
        let from_local = self.local.get(key).await?;

        match (from_cookie, from_local) {
            (Some(cookie), Some(local)) => {
                if cookie != local {
                    debug!("Local storage entry '{}' differs from cookie; overwriting", key);
                    self.local.set(key, &cookie).await?;
                }
                Ok(Some(cookie))
            }
            (Some(cookie), None) => {
                debug!("Repairing local storage entry '{}' from cookie", key);
                self.local.set(key, &cookie).await?;
                Ok(Some(cookie))
            }
            (None, Some(local)) => {
                debug!("Repairing cookie entry '{}' from local storage", key);
                self.cookie.set(key, &local).await?;
                Ok(Some(local))
            }
            (None, None) => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.cookie.set(key, value).await?;
        self.local.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        // clear both even if the first fails
        let cookie = self.cookie.remove(key).await;
        let local = self.local.remove(key).await;
        cookie.and(local)
    }
}
