//! Utility functions and helpers.

pub mod url;

pub use self::url::{bust_url, readable_url};
