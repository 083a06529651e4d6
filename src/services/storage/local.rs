use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;

use super::store::{FileMeta, FileName, FileStore, StorageError, StorageResult};

/// Files stored flat in one local directory.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Use `root` as the storage directory, creating it if needed.
    pub async fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, name: &FileName) -> PathBuf {
        self.root.join(name.as_str())
    }

    async fn existing_file(&self, name: &FileName) -> StorageResult<std::fs::Metadata> {
        let meta = fs::metadata(self.path(name)).await.map_err(not_found)?;
        if !meta.is_file() {
            return Err(StorageError::NotFound);
        }
        Ok(meta)
    }
}

fn not_found(err: std::io::Error) -> StorageError {
    match err.kind() {
        ErrorKind::NotFound => StorageError::NotFound,
        _ => StorageError::Io(err),
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    async fn store(&self, name: &FileName, contents: &[u8]) -> StorageResult<()> {
        fs::write(self.path(name), contents).await?;
        Ok(())
    }

    async fn fetch(&self, name: &FileName) -> StorageResult<Vec<u8>> {
        self.existing_file(name).await?;
        fs::read(self.path(name)).await.map_err(not_found)
    }

    async fn rename(&self, from: &FileName, to: &FileName) -> StorageResult<()> {
        self.existing_file(from).await?;

        // link(2) fails if `to` exists, unlike rename(2) which replaces it.
        fs::hard_link(self.path(from), self.path(to))
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::AlreadyExists => StorageError::AlreadyExists,
                _ => not_found(err),
            })?;
        fs::remove_file(self.path(from)).await.map_err(not_found)
    }

    async fn delete(&self, name: &FileName) -> StorageResult<()> {
        self.existing_file(name).await?;
        fs::remove_file(self.path(name)).await.map_err(not_found)
    }

    async fn stat(&self, name: &FileName) -> StorageResult<FileMeta> {
        let meta = self.existing_file(name).await?;

        Ok(FileMeta {
            name: name.to_string(),
            size: meta.len(),
            modified: meta.modified().ok().map(DateTime::<Utc>::from),
        })
    }
}
