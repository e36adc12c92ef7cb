//! Admin winery CRUD handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use wine_cellar_core::{ContactDetails, Email, Website, Winery, WineryId};

use crate::db::{WineryInput, WineryRepository};
use crate::error::AppError;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Build the wineries router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/wineries", get(list).post(create))
        .route(
            "/api/wineries/{id}",
            axum::routing::put(update).delete(remove),
        )
}

/// Request body for creating or updating a winery or supplier.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactEntityRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub post: Option<String>,
    pub city: Option<String>,
    pub land: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl ContactEntityRequest {
    /// Validate into a name plus contact details. Blank optional fields
    /// are treated as absent.
    pub fn validate(self) -> Result<(String, ContactDetails), AppError> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Name is required".to_owned()))?;

        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let email = non_blank(self.email)
            .map(|e| {
                Email::parse(&e)
                    .map(Email::into_inner)
                    .map_err(|_| AppError::Validation("A valid email address is required".to_owned()))
            })
            .transpose()?;
        let website = non_blank(self.website)
            .map(|w| {
                Website::parse(&w)
                    .map(Website::into_inner)
                    .map_err(|_| AppError::Validation("A valid website URL is required".to_owned()))
            })
            .transpose()?;

        Ok((
            name,
            ContactDetails {
                address: non_blank(self.address),
                post: non_blank(self.post),
                city: non_blank(self.city),
                land: non_blank(self.land),
                phone: non_blank(self.phone),
                email,
                website,
            },
        ))
    }
}

/// List all wineries with their wine counts.
///
/// GET /api/wineries
///
/// # Errors
///
/// Returns an error if the database operation fails.
async fn list(State(state): State<AppState>) -> Result<Json<Vec<Winery>>, AppError> {
    let wineries = WineryRepository::new(state.pool()).list().await?;
    Ok(Json(wineries))
}

/// Create a winery.
///
/// POST /api/wineries
///
/// # Errors
///
/// Returns 400 for invalid fields and an error if the database operation
/// fails.
async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(body): Json<ContactEntityRequest>,
) -> Result<Json<Winery>, AppError> {
    let (name, contact) = body.validate()?;
    let winery = WineryRepository::new(state.pool())
        .create(&WineryInput { name, contact })
        .await?;
    Ok(Json(winery))
}

/// Update a winery.
///
/// PUT /api/wineries/{id}
///
/// # Errors
///
/// Returns 400 for invalid fields, 404 for an unknown id and an error if
/// the database operation fails.
async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<WineryId>,
    Json(body): Json<ContactEntityRequest>,
) -> Result<Json<Winery>, AppError> {
    let (name, contact) = body.validate()?;
    let winery = WineryRepository::new(state.pool())
        .update(id, &WineryInput { name, contact })
        .await?
        .ok_or_else(|| AppError::NotFound("Winery not found".to_owned()))?;
    Ok(Json(winery))
}

/// Response for winery deletion.
#[derive(Debug, Serialize)]
struct DeleteWineryResponse {
    success: bool,
}

/// Delete a winery. Refused while wines still reference it.
///
/// DELETE /api/wineries/{id}
///
/// # Errors
///
/// Returns 400 naming the dependent wine count, 404 for an unknown id and
/// an error if the database operation fails.
async fn remove(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<WineryId>,
) -> Result<Json<DeleteWineryResponse>, AppError> {
    let repo = WineryRepository::new(state.pool());

    let wine_count = repo.wine_count(id).await?;
    if wine_count > 0 {
        return Err(AppError::Validation(format!(
            "Cannot delete winery: {wine_count} wines still reference it"
        )));
    }

    let deleted = repo.delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Winery not found".to_owned()));
    }
    Ok(Json(DeleteWineryResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: Option<&str>) -> ContactEntityRequest {
        ContactEntityRequest {
            name: name.map(str::to_owned),
            address: None,
            post: None,
            city: None,
            land: Some("Austria".to_owned()),
            phone: None,
            email: Some("office@weingut.example".to_owned()),
            website: Some("https://weingut.example".to_owned()),
        }
    }

    #[test]
    fn valid_request_passes_validation() {
        let (name, contact) = request(Some("Weingut Sommer")).validate().unwrap();
        assert_eq!(name, "Weingut Sommer");
        assert_eq!(contact.land.as_deref(), Some("Austria"));
    }

    #[test]
    fn missing_name_is_rejected() {
        assert!(request(None).validate().is_err());
        assert!(request(Some("  ")).validate().is_err());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut req = request(Some("Weingut Sommer"));
        req.email = Some("not-an-email".to_owned());
        assert!(req.validate().is_err());
    }

    #[test]
    fn blank_optional_fields_become_absent() {
        let mut req = request(Some("Weingut Sommer"));
        req.phone = Some("   ".to_owned());
        let (_, contact) = req.validate().unwrap();
        assert!(contact.phone.is_none());
    }
}
