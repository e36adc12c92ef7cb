//! Admin supplier CRUD handlers.
//!
//! Suppliers share the contact shape (and validation) with wineries but
//! have no dependents, so deletion is unconditional.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;

use wine_cellar_core::{Supplier, SupplierId};

use crate::db::{SupplierInput, SupplierRepository};
use crate::error::AppError;
use crate::middleware::RequireAdminAuth;
use crate::routes::wineries::ContactEntityRequest;
use crate::state::AppState;

/// Build the suppliers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/suppliers", get(list).post(create))
        .route(
            "/api/suppliers/{id}",
            axum::routing::put(update).delete(remove),
        )
}

/// List all suppliers.
///
/// GET /api/suppliers
///
/// # Errors
///
/// Returns an error if the database operation fails.
async fn list(State(state): State<AppState>) -> Result<Json<Vec<Supplier>>, AppError> {
    let suppliers = SupplierRepository::new(state.pool()).list().await?;
    Ok(Json(suppliers))
}

/// Create a supplier.
///
/// POST /api/suppliers
///
/// # Errors
///
/// Returns 400 for invalid fields and an error if the database operation
/// fails.
async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(body): Json<ContactEntityRequest>,
) -> Result<Json<Supplier>, AppError> {
    let (name, contact) = body.validate()?;
    let supplier = SupplierRepository::new(state.pool())
        .create(&SupplierInput { name, contact })
        .await?;
    Ok(Json(supplier))
}

/// Update a supplier.
///
/// PUT /api/suppliers/{id}
///
/// # Errors
///
/// Returns 400 for invalid fields, 404 for an unknown id and an error if
/// the database operation fails.
async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<SupplierId>,
    Json(body): Json<ContactEntityRequest>,
) -> Result<Json<Supplier>, AppError> {
    let (name, contact) = body.validate()?;
    let supplier = SupplierRepository::new(state.pool())
        .update(id, &SupplierInput { name, contact })
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier not found".to_owned()))?;
    Ok(Json(supplier))
}

/// Response for supplier deletion.
#[derive(Debug, Serialize)]
struct DeleteSupplierResponse {
    success: bool,
}

/// Delete a supplier.
///
/// DELETE /api/suppliers/{id}
///
/// # Errors
///
/// Returns 404 for an unknown id and an error if the database operation
/// fails.
async fn remove(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<SupplierId>,
) -> Result<Json<DeleteSupplierResponse>, AppError> {
    let deleted = SupplierRepository::new(state.pool()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("Supplier not found".to_owned()));
    }
    Ok(Json(DeleteSupplierResponse { success: true }))
}
