//! Session persistence adapters.
//!
//! The wizard only ever talks to `dyn SessionStore`; `AppState` picks the
//! in-memory store by default and the JSON-file store when `SESSION_DIR` is set.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::wizard::session::WizardSession;

/// Fixed storage name every persisted session is keyed under.
pub const STORAGE_NAME: &str = "salary-predictor-storage";

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: Uuid) -> Result<Option<WizardSession>>;
    async fn save(&self, id: Uuid, session: &WizardSession) -> Result<()>;
    async fn remove(&self, id: Uuid) -> Result<()>;
}

/// Process-local store. Sessions vanish on restart.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, WizardSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<WizardSession>> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn save(&self, id: Uuid, session: &WizardSession) -> Result<()> {
        self.sessions.write().await.insert(id, session.clone());
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<()> {
        self.sessions.write().await.remove(&id);
        Ok(())
    }
}

/// One JSON file per session: `<dir>/salary-predictor-storage-<id>.json`.
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Creates the directory if it does not exist yet.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create session dir {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{STORAGE_NAME}-{id}.json"))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<WizardSession>> {
        let path = self.path_for(id);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };
        let session = serde_json::from_slice(&raw)
            .with_context(|| format!("Corrupt session file {}", path.display()))?;
        Ok(Some(session))
    }

    async fn save(&self, id: Uuid, session: &WizardSession) -> Result<()> {
        let path = self.path_for(id);
        let raw = serde_json::to_vec_pretty(session)?;
        // Write-then-rename so a crash never leaves a half-written session.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("Failed to persist {}", path.display()))?;
        debug!(session_id = %id, "session persisted");
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<()> {
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to remove session file"),
        }
    }
}
