//! File storage interface used by the file handlers.
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid file name")]
    InvalidName,
    #[error("file not found")]
    NotFound,
    #[error("file already exists")]
    AlreadyExists,
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A file name that is safe to join onto the storage root.
///
/// Exactly one plain path component: no separators, no `.`/`..`, no control
/// characters and no quotes (the name ends up in `Content-Disposition`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileName(String);

impl FileName {
    pub fn parse(raw: &str) -> StorageResult<Self> {
        let invalid = raw.is_empty()
            || raw == "."
            || raw == ".."
            || raw.len() > 255
            || raw
                .chars()
                .any(|c| c == '/' || c == '\\' || c == '"' || c.is_control());

        if invalid {
            return Err(StorageError::InvalidName);
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Storage backend for uploaded files.
///
/// Implementations are shared across requests (`Arc<dyn FileStore>`).
#[async_trait]
pub trait FileStore: Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Create or overwrite `name`.
    async fn store(&self, name: &FileName, contents: &[u8]) -> StorageResult<()>;

    async fn fetch(&self, name: &FileName) -> StorageResult<Vec<u8>>;

    // Fails with `AlreadyExists` instead of overwriting `to`.
    async fn rename(&self, from: &FileName, to: &FileName) -> StorageResult<()>;

    async fn delete(&self, name: &FileName) -> StorageResult<()>;

    async fn stat(&self, name: &FileName) -> StorageResult<FileMeta>;
}
