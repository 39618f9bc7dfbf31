//! Catalog statistics endpoint

use axum::{extract::State, Json};
use songbook_common::{compute_stats, db, StatsReport};
use tracing::debug;

use crate::api::ApiError;
use crate::AppState;

/// GET /api/stats
///
/// Reads one snapshot of the collection and aggregates it. Nothing is
/// cached; every request reflects the current database state.
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsReport>, ApiError> {
    let songs = db::fetch_all_songs(&state.db).await?;
    let report = compute_stats(&songs);

    debug!(
        "Stats computed: {} songs, {} artists, {} albums, {} genres",
        report.overview.total_songs,
        report.overview.total_artists,
        report.overview.total_albums,
        report.overview.total_genres
    );

    Ok(Json(report))
}
