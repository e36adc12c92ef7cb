//! Guest catalog handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use wine_cellar_core::{Wine, WineTaste, WineType};

use crate::db::{GuestWineFilter, WineRepository};
use crate::error::AppError;
use crate::state::AppState;

/// Build the guest catalog router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/guest/wines", get(list))
}

/// Query parameters for the guest catalog. Unrecognized enum values are
/// rejected rather than silently ignored.
#[derive(Debug, Default, Deserialize)]
struct GuestWineQuery {
    art: Option<String>,
    taste: Option<String>,
    country: Option<String>,
}

impl GuestWineQuery {
    fn validate(self) -> Result<GuestWineFilter, AppError> {
        let art = self
            .art
            .map(|s| {
                WineType::parse(&s)
                    .ok_or_else(|| AppError::Validation(format!("Unknown wine type: {s}")))
            })
            .transpose()?;
        let taste = self
            .taste
            .map(|s| {
                WineTaste::parse(&s)
                    .ok_or_else(|| AppError::Validation(format!("Unknown wine taste: {s}")))
            })
            .transpose()?;
        Ok(GuestWineFilter {
            art,
            taste,
            country: self.country,
        })
    }
}

/// List wines visible to guests, price ascending, wineries joined.
///
/// GET /api/guest/wines?art=&taste=&country=
///
/// Hidden wines never appear; coming-soon wines do, so clients can label
/// them.
///
/// # Errors
///
/// Returns 400 for unknown filter values and an error if the database
/// operation fails.
async fn list(
    Query(query): Query<GuestWineQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Wine>>, AppError> {
    let filter = query.validate()?;
    let wines = WineRepository::new(state.pool())
        .list_visible(&filter)
        .await?;
    Ok(Json(wines))
}
