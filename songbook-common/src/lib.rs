//! # Songbook Common Library
//!
//! Shared code for the Songbook catalog service including:
//! - Song model, validation and SQLite repository
//! - Database initialization and schema migrations
//! - Statistics aggregation over a song snapshot
//! - Configuration loading and root folder resolution
//! - Utility functions

pub mod config;
pub mod db;
pub mod error;
pub mod stats;
pub mod time;
pub mod uuid_utils;

pub use error::{Error, Result};
pub use stats::{compute_stats, StatsReport};
