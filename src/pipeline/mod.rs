//! Pipeline entry points for menu refresh operations.
//!
//! - `content_digest`: change detection over raw text
//! - `MenuRefresher`: cache-first display, background fetch, bounded repoll

pub mod digest;
pub mod refresh;

pub use digest::content_digest;
pub use refresh::{MenuRefresher, RefreshOutcome, RenderSink};
