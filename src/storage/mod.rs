//! Cache storage backends for the raw menu document.
//!
//! One key-value entry stores the last-known-good raw text verbatim
//! under a fixed key. The entry is overwritten only on a successful
//! fetch whose content differs from what is cached and persists until
//! externally cleared.

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalCache;
pub use memory::MemoryCache;

/// Fixed key under which the raw menu text is persisted.
pub const CACHE_KEY: &str = "menu_raw_v1.txt";

/// Trait for raw-text cache backends.
///
/// Read and write are independent, idempotent operations. The scheduler
/// is the only writer; a failed write is reported but never blocks
/// rendering.
#[async_trait]
pub trait MenuCache: Send + Sync {
    /// Read the cached raw text, `None` if no entry exists.
    async fn read(&self) -> Result<Option<String>>;

    /// Overwrite the cached raw text.
    async fn write(&self, raw: &str) -> Result<()>;
}
