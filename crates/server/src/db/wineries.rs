//! Winery repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use wine_cellar_core::{ContactDetails, Winery, WineryId};

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct WineryRow {
    id: i32,
    name: String,
    address: Option<String>,
    post: Option<String>,
    city: Option<String>,
    land: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    website: Option<String>,
    wine_count: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<WineryRow> for Winery {
    fn from(row: WineryRow) -> Self {
        Self {
            id: WineryId::new(row.id),
            name: row.name,
            contact: ContactDetails {
                address: row.address,
                post: row.post,
                city: row.city,
                land: row.land,
                phone: row.phone,
                email: row.email,
                website: row.website,
            },
            wine_count: row.wine_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Validated input for creating or updating a winery.
#[derive(Debug, Clone)]
pub struct WineryInput {
    pub name: String,
    pub contact: ContactDetails,
}

/// Repository for winery CRUD operations.
pub struct WineryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WineryRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all wineries alphabetically, each with its wine count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn list(&self) -> Result<Vec<Winery>, RepositoryError> {
        let rows: Vec<WineryRow> = sqlx::query_as(
            "SELECT wy.*, (SELECT COUNT(*) FROM wine w WHERE w.winery_id = wy.id) AS wine_count
             FROM winery wy ORDER BY wy.name",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows.into_iter().map(Winery::from).collect())
    }

    /// Fetch one winery by id, with its wine count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn get(&self, id: WineryId) -> Result<Option<Winery>, RepositoryError> {
        let row: Option<WineryRow> = sqlx::query_as(
            "SELECT wy.*, (SELECT COUNT(*) FROM wine w WHERE w.winery_id = wy.id) AS wine_count
             FROM winery wy WHERE wy.id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(Winery::from))
    }

    /// Insert a winery and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn create(&self, input: &WineryInput) -> Result<Winery, RepositoryError> {
        let row: WineryRow = sqlx::query_as(
            "INSERT INTO winery (name, address, post, city, land, phone, email, website)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *, 0::bigint AS wine_count",
        )
        .bind(&input.name)
        .bind(input.contact.address.as_deref())
        .bind(input.contact.post.as_deref())
        .bind(input.contact.city.as_deref())
        .bind(input.contact.land.as_deref())
        .bind(input.contact.phone.as_deref())
        .bind(input.contact.email.as_deref())
        .bind(input.contact.website.as_deref())
        .fetch_one(self.pool)
        .await?;
        Ok(row.into())
    }

    /// Update a winery. Returns `None` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn update(
        &self,
        id: WineryId,
        input: &WineryInput,
    ) -> Result<Option<Winery>, RepositoryError> {
        let row: Option<WineryRow> = sqlx::query_as(
            "UPDATE winery SET name = $2, address = $3, post = $4, city = $5, land = $6,
                 phone = $7, email = $8, website = $9, updated_at = NOW()
             WHERE id = $1
             RETURNING *,
                 (SELECT COUNT(*) FROM wine w WHERE w.winery_id = winery.id) AS wine_count",
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.contact.address.as_deref())
        .bind(input.contact.post.as_deref())
        .bind(input.contact.city.as_deref())
        .bind(input.contact.land.as_deref())
        .bind(input.contact.phone.as_deref())
        .bind(input.contact.email.as_deref())
        .bind(input.contact.website.as_deref())
        .fetch_optional(self.pool)
        .await?;
        Ok(row.map(Winery::from))
    }

    /// Number of wines referencing this winery. Deletion is refused while
    /// this is non-zero.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn wine_count(&self, id: WineryId) -> Result<i64, RepositoryError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM wine WHERE winery_id = $1")
                .bind(id)
                .fetch_one(self.pool)
                .await?;
        Ok(count)
    }

    /// Delete a winery. Returns `false` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn delete(&self, id: WineryId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM winery WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
