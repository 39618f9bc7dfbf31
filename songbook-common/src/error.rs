//! Common error types for Songbook

use thiserror::Error;

/// Common result type for Songbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the catalog library
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be located or read
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file is not valid TOML for [`crate::config::TomlConfig`]
    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// No song with the given id
    #[error("Song not found: {0}")]
    SongNotFound(String),

    /// Song payload rejected at the create/update boundary
    #[error("Validation failed: {0}")]
    Validation(String),
}
