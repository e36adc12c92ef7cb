//! Guest favorites API handlers.
//!
//! All routes require the `X-Guest-Key` header. Creation is idempotent:
//! the unique `(guest_key, wine_id)` constraint makes concurrent duplicate
//! requests converge on one row, and the handler returns the surviving
//! record either way.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get},
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use wine_cellar_core::{Favorite, WineId};

use crate::db::{FavoriteRepository, WineRepository};
use crate::error::AppError;
use crate::middleware::GuestKeyHeader;
use crate::state::AppState;

/// Build the favorites router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/favorites", get(list).post(create))
        .route("/api/favorites/{wine_id}", delete(remove))
}

/// List the guest's favorites, newest first, with wines joined.
///
/// GET /api/favorites
///
/// # Errors
///
/// Returns an error if the database operation fails.
async fn list(
    GuestKeyHeader(key): GuestKeyHeader,
    State(state): State<AppState>,
) -> Result<Json<Vec<Favorite>>, AppError> {
    let favorites = FavoriteRepository::new(state.pool())
        .list_for_guest(&key)
        .await?;
    Ok(Json(favorites))
}

/// Request body for favoriting a wine.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateFavoriteRequest {
    wine_id: Option<WineId>,
}

/// Favorite a wine for the guest.
///
/// POST /api/favorites
///
/// # Errors
///
/// Returns 400 without a wine id, 404 for an unknown wine and 403 for a
/// wine that is hidden or not yet available.
async fn create(
    GuestKeyHeader(key): GuestKeyHeader,
    State(state): State<AppState>,
    Json(body): Json<CreateFavoriteRequest>,
) -> Result<Json<Favorite>, AppError> {
    let wine_id = body
        .wine_id
        .ok_or_else(|| AppError::Validation("wineId is required".to_owned()))?;

    let wine = WineRepository::new(state.pool())
        .get(wine_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Wine not found".to_owned()))?;

    let current_year = Utc::now().year();
    if wine.hidden_for_guests {
        return Err(AppError::Forbidden(
            "This wine cannot be favorited".to_owned(),
        ));
    }
    if wine.is_coming_soon(current_year) {
        return Err(AppError::Forbidden(
            "Coming soon wines cannot be favorited".to_owned(),
        ));
    }

    let mut favorite = FavoriteRepository::new(state.pool())
        .upsert(&key, wine_id)
        .await?;
    favorite.wine = Some(wine);
    Ok(Json(favorite))
}

/// Response for unfavoriting; zero deleted rows is still a success.
#[derive(Debug, Serialize)]
struct DeleteFavoriteResponse {
    success: bool,
}

/// Unfavorite a wine for the guest.
///
/// DELETE /api/favorites/{wine_id}
///
/// # Errors
///
/// Returns an error if the database operation fails.
async fn remove(
    GuestKeyHeader(key): GuestKeyHeader,
    State(state): State<AppState>,
    Path(wine_id): Path<WineId>,
) -> Result<Json<DeleteFavoriteResponse>, AppError> {
    FavoriteRepository::new(state.pool())
        .delete(&key, wine_id)
        .await?;
    Ok(Json(DeleteFavoriteResponse { success: true }))
}
