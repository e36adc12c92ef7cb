//! Database operations for the WineCellar `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `wine` - Catalog entries (price as NUMERIC, enums as checked TEXT)
//! - `winery` - Wine growers; wines reference them
//! - `supplier` - Suppliers, independent of wines
//! - `favorite` - Guest favorites, UNIQUE on `(guest_key, wine_id)`
//! - `admin_user` - Admin credentials (argon2 hashes)
//! - `session` - tower-sessions store
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p wine-cellar-cli -- migrate
//! ```

pub mod admin_users;
pub mod favorites;
pub mod suppliers;
pub mod wineries;
pub mod wines;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admin_users::AdminUserRepository;
pub use favorites::FavoriteRepository;
pub use suppliers::{SupplierInput, SupplierRepository};
pub use wineries::{WineryInput, WineryRepository};
pub use wines::{GuestWineFilter, WineInput, WineRepository};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
