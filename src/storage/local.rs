//! Local filesystem cache implementation.
//!
//! Stores the raw menu text in a single file under the cache directory.
//! Writes go to a temp file first and are renamed into place, so a
//! crashed write never truncates the last good payload.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{CACHE_KEY, MenuCache};

/// Local filesystem cache backend.
#[derive(Clone)]
pub struct LocalCache {
    root_dir: PathBuf,
}

impl LocalCache {
    /// Create a new LocalCache rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Full path of the cache entry.
    pub fn path(&self) -> PathBuf {
        self.root_dir.join(CACHE_KEY)
    }
}

#[async_trait]
impl MenuCache for LocalCache {
    async fn read(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path()).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(format!("cache read failed: {e}"))),
        }
    }

    async fn write(&self, raw: &str) -> Result<()> {
        let path = self.path();
        tokio::fs::create_dir_all(&self.root_dir)
            .await
            .map_err(|e| AppError::storage(format!("cache dir create failed: {e}")))?;

        let tmp = path.with_extension("tmp");
        let result = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(raw.as_bytes()).await?;
            file.flush().await?;
            drop(file);
            tokio::fs::rename(&tmp, &path).await
        }
        .await;

        result.map_err(|e| AppError::storage(format!("cache write failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_and_read_round_trip() {
        let tmp = TempDir::new().unwrap();
        let cache = LocalCache::new(tmp.path());

        cache.write("Pizza\n\nMargherita 95 kr").await.unwrap();
        let raw = cache.read().await.unwrap();
        assert_eq!(raw.as_deref(), Some("Pizza\n\nMargherita 95 kr"));
    }

    #[tokio::test]
    async fn test_read_without_entry_is_none() {
        let tmp = TempDir::new().unwrap();
        let cache = LocalCache::new(tmp.path());

        assert!(cache.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_overwrites_previous_entry() {
        let tmp = TempDir::new().unwrap();
        let cache = LocalCache::new(tmp.path());

        cache.write("old").await.unwrap();
        cache.write("new").await.unwrap();
        assert_eq!(cache.read().await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_write_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let cache = LocalCache::new(tmp.path().join("nested/dir"));

        cache.write("Meny").await.unwrap();
        assert_eq!(cache.read().await.unwrap().as_deref(), Some("Meny"));
    }
}
