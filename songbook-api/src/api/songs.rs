//! Song CRUD endpoints
//!
//! Thin handlers over the repository in `songbook_common::db`; all
//! validation happens there.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use songbook_common::db::{self, Song, SongFilter, SongInput};
use tracing::info;

use crate::api::ApiError;
use crate::AppState;

/// Plain acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /api/songs?genre=&artist=&album=
///
/// Newest first. Each filter is a case-insensitive substring match. A
/// query string that does not deserialize is a 400.
pub async fn list_songs(
    State(state): State<AppState>,
    filter: Result<Query<SongFilter>, QueryRejection>,
) -> Result<Json<Vec<Song>>, ApiError> {
    let Query(filter) = filter?;
    let songs = db::list_songs(&state.db, &filter).await?;
    Ok(Json(songs))
}

/// GET /api/songs/:id
pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Song>, ApiError> {
    let song = db::get_song(&state.db, &id).await?;
    Ok(Json(song))
}

/// POST /api/songs
///
/// Returns 201 with the stored song, 400 if any field is missing or blank.
pub async fn create_song(
    State(state): State<AppState>,
    payload: Result<Json<SongInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Song>), ApiError> {
    let Json(input) = payload?;
    let song = db::create_song(&state.db, &input).await?;
    info!("Song created: {} ({} - {})", song.id, song.artist, song.title);
    Ok((StatusCode::CREATED, Json(song)))
}

/// PUT /api/songs/:id
///
/// Fields omitted from the body keep their stored value.
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SongInput>, JsonRejection>,
) -> Result<Json<Song>, ApiError> {
    let Json(input) = payload?;
    let song = db::update_song(&state.db, &id, &input).await?;
    info!("Song updated: {}", song.id);
    Ok(Json(song))
}

/// DELETE /api/songs/:id
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    db::delete_song(&state.db, &id).await?;
    info!("Song deleted: {}", id);
    Ok(Json(MessageResponse {
        message: "Song deleted successfully".to_string(),
    }))
}
