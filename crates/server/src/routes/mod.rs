//! HTTP route handlers.
//!
//! # Route structure
//!
//! ```text
//! GET    /health                    - Health check
//!
//! # Guest favorites (X-Guest-Key header required)
//! GET    /api/favorites             - List favorites, wine joined
//! POST   /api/favorites             - Favorite a wine (idempotent)
//! DELETE /api/favorites/{wine_id}   - Unfavorite a wine
//!
//! # Statistics
//! GET    /api/stats/wines           - Catalog statistics
//!
//! # Guest catalog
//! GET    /api/guest/wines           - Visible wines, optional filters
//!
//! # Admin catalog (session required for mutations)
//! GET    /api/wines                 - All wines
//! POST   /api/wines                 - Create wine
//! PUT    /api/wines/{id}            - Update wine
//! DELETE /api/wines/{id}            - Delete wine
//! GET    /api/wineries              - All wineries with wine counts
//! POST   /api/wineries              - Create winery
//! PUT    /api/wineries/{id}         - Update winery
//! DELETE /api/wineries/{id}         - Delete winery (refused with wines)
//! GET    /api/suppliers             - All suppliers
//! POST   /api/suppliers             - Create supplier
//! PUT    /api/suppliers/{id}        - Update supplier
//! DELETE /api/suppliers/{id}        - Delete supplier
//!
//! # Auth
//! POST   /api/auth/login            - Email + password login
//! POST   /api/auth/logout           - Clear session
//! GET    /api/auth/session          - Current admin or null
//!
//! # Upload (session required)
//! POST   /api/upload/image          - Wine image upload
//! ```

pub mod auth;
pub mod favorites;
pub mod guest;
pub mod stats;
pub mod suppliers;
pub mod upload;
pub mod wineries;
pub mod wines;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the complete application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(auth::router())
        .merge(favorites::router())
        .merge(guest::router())
        .merge(stats::router())
        .merge(suppliers::router())
        .merge(upload::router())
        .merge(wineries::router())
        .merge(wines::router())
}

/// Health check.
///
/// GET /health
async fn health() -> &'static str {
    "OK"
}
