//! Database models
//!
//! [`Song`] is the only persisted entity. [`SongInput`] is the untrusted
//! payload of create/update requests and is turned into a [`ValidSong`]
//! before anything reaches the database.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message returned when a create request lacks a field
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";

/// A catalog entry
///
/// The id travels as `_id` on the wire; the web client keys, updates and
/// deletes songs by that field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update request body
///
/// Every field is optional at the wire level so that a missing field is a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// Trimmed, non-empty song fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSong {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
}

/// Trim a field, treating blank as absent
fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Merge an optional replacement into the current value
///
/// Absent keeps `current`; present-but-blank is rejected.
fn merge(name: &str, value: &Option<String>, current: &str) -> Result<String> {
    match value {
        None => Ok(current.to_string()),
        Some(_) => clean(value)
            .ok_or_else(|| Error::Validation(format!("Field '{}' must not be empty", name))),
    }
}

impl SongInput {
    /// Validate a create request: all four fields present and non-blank
    pub fn validate_new(&self) -> Result<ValidSong> {
        match (
            clean(&self.title),
            clean(&self.artist),
            clean(&self.album),
            clean(&self.genre),
        ) {
            (Some(title), Some(artist), Some(album), Some(genre)) => Ok(ValidSong {
                title,
                artist,
                album,
                genre,
            }),
            _ => Err(Error::Validation(ALL_FIELDS_REQUIRED.to_string())),
        }
    }

    /// Validate an update request against the stored song
    ///
    /// Omitted fields keep their stored value.
    pub fn merge_into(&self, song: &Song) -> Result<ValidSong> {
        Ok(ValidSong {
            title: merge("title", &self.title, &song.title)?,
            artist: merge("artist", &self.artist, &song.artist)?,
            album: merge("album", &self.album, &song.album)?,
            genre: merge("genre", &self.genre, &song.genre)?,
        })
    }
}

/// Listing filters (query string `?genre=&artist=&album=`)
///
/// Each present, non-blank value is a case-insensitive substring match on
/// its field. Case folding is Unicode-aware, so `BJÖRK` finds `Björk`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongFilter {
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
}

/// Song field a filter applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Genre,
    Artist,
    Album,
}

impl FilterField {
    fn value(self, song: &Song) -> &str {
        match self {
            FilterField::Genre => &song.genre,
            FilterField::Artist => &song.artist,
            FilterField::Album => &song.album,
        }
    }
}

impl SongFilter {
    /// Active (field, lowercased needle) pairs in a fixed field order
    pub fn clauses(&self) -> Vec<(FilterField, String)> {
        [
            (FilterField::Genre, &self.genre),
            (FilterField::Artist, &self.artist),
            (FilterField::Album, &self.album),
        ]
        .into_iter()
        .filter_map(|(field, value)| clean(value).map(|v| (field, v.to_lowercase())))
        .collect()
    }

    /// Whether `song` satisfies every clause
    pub fn matches(clauses: &[(FilterField, String)], song: &Song) -> bool {
        clauses
            .iter()
            .all(|(field, needle)| field.value(song).to_lowercase().contains(needle.as_str()))
    }
}
