//! Wine statistics API handler.

use axum::{Json, Router, extract::State, routing::get};

use crate::db::WineRepository;
use crate::error::AppError;
use crate::state::AppState;
use crate::stats::{WineStats, aggregate};

/// Build the statistics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/stats/wines", get(wine_stats))
}

/// Aggregate the whole catalog into grouped statistics.
///
/// GET /api/stats/wines
///
/// # Errors
///
/// Returns an error if the database operation fails.
async fn wine_stats(State(state): State<AppState>) -> Result<Json<WineStats>, AppError> {
    let records = WineRepository::new(state.pool()).stat_records().await?;
    Ok(Json(aggregate(&records)))
}
