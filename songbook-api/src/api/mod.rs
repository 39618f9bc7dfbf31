//! HTTP API handlers for songbook-api

pub mod error;
pub mod meta;
pub mod songs;
pub mod stats;

pub use error::ApiError;
pub use songs::{create_song, delete_song, get_song, list_songs, update_song};
pub use stats::get_stats;
