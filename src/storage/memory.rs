//! In-process cache implementation.
//!
//! Holds the raw text in a mutex-guarded slot. Used by tests and by
//! embedders that do not want the entry to outlive the process.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::storage::MenuCache;

/// In-memory cache backend.
#[derive(Default)]
pub struct MemoryCache {
    slot: Mutex<Option<String>>,
}

impl MemoryCache {
    /// Create an empty in-memory cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache pre-populated with the given raw text.
    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    /// Current cache contents, for inspection.
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }
}

#[async_trait]
impl MenuCache for MemoryCache {
    async fn read(&self) -> Result<Option<String>> {
        Ok(self.slot.lock().unwrap().clone())
    }

    async fn write(&self, raw: &str) -> Result<()> {
        *self.slot.lock().unwrap() = Some(raw.to_string());
        Ok(())
    }
}
