//! Credential store.
//!
//! The document is read in full on every request and rewritten in full on
//! every signup. Reads never fail: an absent or unparsable file is logged and
//! treated as an empty document. Writes overwrite the file in place, so a
//! crash mid-write can leave it truncated.
use crate::models::CredentialDocument;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error};

pub const DEFAULT_CREDENTIALS_PATH: &str = "auth-credentials.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize credential document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the current document, or an empty one if it cannot be read.
    async fn load(&self) -> CredentialDocument;

    async fn save(&self, document: &CredentialDocument) -> StoreResult<()>;

    fn backend_name(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_CREDENTIALS_PATH)
    }
}

#[async_trait]
impl CredentialStore for JsonFileStore {
    async fn load(&self) -> CredentialDocument {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "credential file absent, using empty store");
                return CredentialDocument::default();
            }
            Err(err) => {
                error!(path = %self.path.display(), error = %err, "error reading credential file");
                return CredentialDocument::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            error!(path = %self.path.display(), error = %err, "error parsing credential file");
            CredentialDocument::default()
        })
    }

    async fn save(&self, document: &CredentialDocument) -> StoreResult<()> {
        let body = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })
    }

    fn backend_name(&self) -> &'static str {
        "json-file"
    }
}

/// Non-durable store; state lives only as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    document: Mutex<CredentialDocument>,
}

impl InMemoryStore {
    pub fn new(document: CredentialDocument) -> Self {
        Self {
            document: Mutex::new(document),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryStore {
    async fn load(&self) -> CredentialDocument {
        self.document.lock().await.clone()
    }

    async fn save(&self, document: &CredentialDocument) -> StoreResult<()> {
        *self.document.lock().await = document.clone();
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
