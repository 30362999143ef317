//! Service layer for the menu pipeline.
//!
//! This module contains the outward-facing plumbing:
//! - Document fetching (`MenuFetcher`)

mod fetch;

pub use fetch::{FetchText, MenuFetcher};
