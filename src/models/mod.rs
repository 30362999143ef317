// src/models/mod.rs

//! Domain models for the menu pipeline.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod menu;

// Re-export all public types
pub use config::{Config, FetchConfig, ParserConfig, SourceConfig};
pub use menu::{MenuDocument, MenuItem, MenuSection};
