//! Admin wine CRUD handlers.
//!
//! Listing is open; mutations require an admin session. Enum fields come
//! in as strings and get validated before touching the database.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use wine_cellar_core::{Wine, WineId, WineTaste, WineType, WineryId};

use crate::db::{WineInput, WineRepository};
use crate::error::AppError;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Build the wines router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/wines", get(list).post(create))
        .route("/api/wines/{id}", axum::routing::put(update).delete(remove))
}

/// List all wines, newest first, with wineries joined.
///
/// GET /api/wines
///
/// # Errors
///
/// Returns an error if the database operation fails.
async fn list(State(state): State<AppState>) -> Result<Json<Vec<Wine>>, AppError> {
    let wines = WineRepository::new(state.pool()).list_all().await?;
    Ok(Json(wines))
}

/// Request body for creating or updating a wine.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WineRequest {
    name: Option<String>,
    winery_id: Option<WineryId>,
    art: Option<String>,
    taste: Option<String>,
    year: Option<i32>,
    land: Option<String>,
    region: Option<String>,
    price: Option<Decimal>,
    bottles_amount: Option<i32>,
    available_at_year: Option<i32>,
    image_url: Option<String>,
    description: Option<String>,
    #[serde(default)]
    hidden_for_guests: bool,
}

impl WineRequest {
    /// Validate the request into typed wine fields.
    fn validate(self) -> Result<WineInput, AppError> {
        let invalid = |msg: &str| AppError::Validation(msg.to_owned());

        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| invalid("Name is required"))?;
        let art = self
            .art
            .as_deref()
            .and_then(WineType::parse)
            .ok_or_else(|| invalid("A valid wine type is required"))?;
        let taste = self
            .taste
            .as_deref()
            .and_then(WineTaste::parse)
            .ok_or_else(|| invalid("A valid wine taste is required"))?;
        let year = self.year.ok_or_else(|| invalid("Year is required"))?;
        let land = self
            .land
            .filter(|l| !l.trim().is_empty())
            .ok_or_else(|| invalid("Land is required"))?;
        let price = self.price.ok_or_else(|| invalid("Price is required"))?;
        let bottles_amount = self
            .bottles_amount
            .ok_or_else(|| invalid("Bottle amount is required"))?;
        if bottles_amount < 0 {
            return Err(invalid("Bottle amount cannot be negative"));
        }

        Ok(WineInput {
            name,
            winery_id: self.winery_id,
            art,
            taste,
            year,
            land,
            region: self.region,
            price,
            bottles_amount,
            available_at_year: self.available_at_year,
            image_url: self.image_url,
            description: self.description,
            hidden_for_guests: self.hidden_for_guests,
        })
    }
}

/// Create a wine.
///
/// POST /api/wines
///
/// # Errors
///
/// Returns 400 for invalid fields and an error if the database operation
/// fails.
async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(body): Json<WineRequest>,
) -> Result<Json<Wine>, AppError> {
    let input = body.validate()?;
    let wine = WineRepository::new(state.pool()).create(&input).await?;
    Ok(Json(wine))
}

/// Update a wine.
///
/// PUT /api/wines/{id}
///
/// # Errors
///
/// Returns 400 for invalid fields, 404 for an unknown id and an error if
/// the database operation fails.
async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<WineId>,
    Json(body): Json<WineRequest>,
) -> Result<Json<Wine>, AppError> {
    let input = body.validate()?;
    let wine = WineRepository::new(state.pool())
        .update(id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound("Wine not found".to_owned()))?;
    Ok(Json(wine))
}

/// Response for wine deletion.
#[derive(Debug, Serialize)]
struct DeleteWineResponse {
    success: bool,
}

/// Delete a wine. Favorites referencing it cascade away.
///
/// DELETE /api/wines/{id}
///
/// # Errors
///
/// Returns 404 for an unknown id and an error if the database operation
/// fails.
async fn remove(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<WineId>,
) -> Result<Json<DeleteWineResponse>, AppError> {
    let deleted = WineRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Wine not found".to_owned()));
    }
    Ok(Json(DeleteWineResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn full_request() -> WineRequest {
        WineRequest {
            name: Some("Gruner Veltliner".to_owned()),
            winery_id: None,
            art: Some("WHITE".to_owned()),
            taste: Some("DRY".to_owned()),
            year: Some(2022),
            land: Some("Austria".to_owned()),
            region: None,
            price: Some(dec!(14.50)),
            bottles_amount: Some(6),
            available_at_year: None,
            image_url: None,
            description: None,
            hidden_for_guests: false,
        }
    }

    #[test]
    fn valid_request_passes_validation() {
        let input = full_request().validate().unwrap();
        assert_eq!(input.art, WineType::White);
        assert_eq!(input.bottles_amount, 6);
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut req = full_request();
        req.name = Some("   ".to_owned());
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("Name is required"));
    }

    #[test]
    fn unknown_wine_type_is_rejected() {
        let mut req = full_request();
        req.art = Some("PURPLE".to_owned());
        assert!(req.validate().is_err());
    }

    #[test]
    fn negative_bottle_amount_is_rejected() {
        let mut req = full_request();
        req.bottles_amount = Some(-1);
        assert!(req.validate().is_err());
    }
}
