//! Favorite repository.
//!
//! Favorites are scoped by the opaque guest key and unique per
//! `(guest_key, wine_id)`. Creating the same pair twice returns the
//! existing row.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use wine_cellar_core::{Favorite, FavoriteId, GuestKey, WineId};

use super::wines::WineRepository;
use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct FavoriteRow {
    id: i32,
    guest_key: String,
    wine_id: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<FavoriteRow> for Favorite {
    type Error = RepositoryError;

    fn try_from(row: FavoriteRow) -> Result<Self, Self::Error> {
        let guest_key = GuestKey::parse(&row.guest_key)
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid guest key: {e}")))?;
        Ok(Self {
            id: FavoriteId::new(row.id),
            guest_key,
            wine_id: WineId::new(row.wine_id),
            wine: None,
            created_at: row.created_at,
        })
    }
}

/// Repository for guest favorite operations.
pub struct FavoriteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FavoriteRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a guest's favorites, newest first, with the wine (and its
    /// winery) attached to each record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails or a row is invalid.
    pub async fn list_for_guest(&self, key: &GuestKey) -> Result<Vec<Favorite>, RepositoryError> {
        let rows: Vec<FavoriteRow> = sqlx::query_as(
            "SELECT id, guest_key, wine_id, created_at FROM favorite
             WHERE guest_key = $1 ORDER BY created_at DESC",
        )
        .bind(key.as_str())
        .fetch_all(self.pool)
        .await?;

        let mut favorites: Vec<Favorite> = rows
            .into_iter()
            .map(Favorite::try_from)
            .collect::<Result<_, _>>()?;

        let ids: Vec<WineId> = favorites.iter().map(|f| f.wine_id).collect();
        let mut wines: HashMap<WineId, _> = WineRepository::new(self.pool)
            .get_many(&ids)
            .await?
            .into_iter()
            .map(|w| (w.id, w))
            .collect();
        for favorite in &mut favorites {
            favorite.wine = wines.remove(&favorite.wine_id);
        }

        Ok(favorites)
    }

    /// Insert a favorite, or return the existing row when the guest has
    /// already favorited this wine.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn upsert(&self, key: &GuestKey, wine_id: WineId) -> Result<Favorite, RepositoryError> {
        let row: FavoriteRow = sqlx::query_as(
            "INSERT INTO favorite (guest_key, wine_id) VALUES ($1, $2)
             ON CONFLICT (guest_key, wine_id)
             DO UPDATE SET guest_key = EXCLUDED.guest_key
             RETURNING id, guest_key, wine_id, created_at",
        )
        .bind(key.as_str())
        .bind(wine_id)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Delete a guest's favorite for one wine. Returns `false` when no
    /// matching row existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn delete(&self, key: &GuestKey, wine_id: WineId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM favorite WHERE guest_key = $1 AND wine_id = $2")
            .bind(key.as_str())
            .bind(wine_id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
