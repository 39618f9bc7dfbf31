//! Song repository
//!
//! CRUD queries over the `songs` table plus the full-collection snapshot
//! read used by the statistics endpoint.

use crate::db::models::{Song, SongFilter, SongInput};
use crate::{time, uuid_utils, Error, Result};
use sqlx::SqlitePool;
use tracing::debug;

const SELECT_SONG: &str =
    "SELECT id, title, artist, album, genre, created_at, updated_at FROM songs";

/// Insert a new song after validating the payload
pub async fn create_song(pool: &SqlitePool, input: &SongInput) -> Result<Song> {
    let valid = input.validate_new()?;
    let now = time::now();

    let song = Song {
        id: uuid_utils::new_song_id(),
        title: valid.title,
        artist: valid.artist,
        album: valid.album,
        genre: valid.genre,
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO songs (id, title, artist, album, genre, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&song.id)
    .bind(&song.title)
    .bind(&song.artist)
    .bind(&song.album)
    .bind(&song.genre)
    .bind(song.created_at)
    .bind(song.updated_at)
    .execute(pool)
    .await?;

    debug!("Created song {} ({} - {})", song.id, song.artist, song.title);
    Ok(song)
}

/// Fetch one song by id
pub async fn get_song(pool: &SqlitePool, id: &str) -> Result<Song> {
    sqlx::query_as::<_, Song>(&format!("{} WHERE id = ?", SELECT_SONG))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::SongNotFound(id.to_string()))
}

/// List songs matching `filter`, newest first
///
/// SQLite's `LIKE` folds ASCII only, so rows are filtered here with
/// Unicode lowercasing after the ordered read.
pub async fn list_songs(pool: &SqlitePool, filter: &SongFilter) -> Result<Vec<Song>> {
    let clauses = filter.clauses();

    let songs: Vec<Song> = sqlx::query_as::<_, Song>(&format!(
        "{} ORDER BY created_at DESC, id DESC",
        SELECT_SONG
    ))
    .fetch_all(pool)
    .await?
    .into_iter()
    .filter(|song| SongFilter::matches(&clauses, song))
    .collect();

    debug!("Listed {} songs ({} filters)", songs.len(), clauses.len());
    Ok(songs)
}

/// Apply an update to an existing song
///
/// Omitted fields keep their stored value. `id` and `created_at` never
/// change; `updated_at` is refreshed and never precedes `created_at`.
pub async fn update_song(pool: &SqlitePool, id: &str, input: &SongInput) -> Result<Song> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_as::<_, Song>(&format!("{} WHERE id = ?", SELECT_SONG))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::SongNotFound(id.to_string()))?;

    let valid = input.merge_into(&existing)?;
    let updated = Song {
        title: valid.title,
        artist: valid.artist,
        album: valid.album,
        genre: valid.genre,
        updated_at: time::touch(existing.created_at),
        ..existing
    };

    sqlx::query(
        r#"
        UPDATE songs
        SET title = ?, artist = ?, album = ?, genre = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&updated.title)
    .bind(&updated.artist)
    .bind(&updated.album)
    .bind(&updated.genre)
    .bind(updated.updated_at)
    .bind(&updated.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    debug!("Updated song {}", updated.id);
    Ok(updated)
}

/// Remove a song
pub async fn delete_song(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::SongNotFound(id.to_string()));
    }

    debug!("Deleted song {}", id);
    Ok(())
}

/// Read the whole collection in creation order
///
/// Ordering by `(created_at, id)` makes first-seen tie-breaks in the
/// statistics deterministic for a given database state.
pub async fn fetch_all_songs(pool: &SqlitePool) -> Result<Vec<Song>> {
    let songs = sqlx::query_as::<_, Song>(&format!(
        "{} ORDER BY created_at ASC, id ASC",
        SELECT_SONG
    ))
    .fetch_all(pool)
    .await?;

    Ok(songs)
}
