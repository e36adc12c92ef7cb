//! Supplier repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use wine_cellar_core::{ContactDetails, Supplier, SupplierId};

use super::RepositoryError;

#[derive(Debug, sqlx::FromRow)]
struct SupplierRow {
    id: i32,
    name: String,
    address: Option<String>,
    post: Option<String>,
    city: Option<String>,
    land: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    website: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Self {
            id: SupplierId::new(row.id),
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
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Validated input for creating or updating a supplier.
#[derive(Debug, Clone)]
pub struct SupplierInput {
    pub name: String,
    pub contact: ContactDetails,
}

/// Repository for supplier CRUD operations.
pub struct SupplierRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SupplierRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all suppliers alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn list(&self) -> Result<Vec<Supplier>, RepositoryError> {
        let rows: Vec<SupplierRow> =
            sqlx::query_as("SELECT * FROM supplier ORDER BY name")
                .fetch_all(self.pool)
                .await?;
        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    /// Fetch one supplier by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn get(&self, id: SupplierId) -> Result<Option<Supplier>, RepositoryError> {
        let row: Option<SupplierRow> = sqlx::query_as("SELECT * FROM supplier WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(Supplier::from))
    }

    /// Insert a supplier and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn create(&self, input: &SupplierInput) -> Result<Supplier, RepositoryError> {
        let row: SupplierRow = sqlx::query_as(
            "INSERT INTO supplier (name, address, post, city, land, phone, email, website)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
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

    /// Update a supplier. Returns `None` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn update(
        &self,
        id: SupplierId,
        input: &SupplierInput,
    ) -> Result<Option<Supplier>, RepositoryError> {
        let row: Option<SupplierRow> = sqlx::query_as(
            "UPDATE supplier SET name = $2, address = $3, post = $4, city = $5, land = $6,
                 phone = $7, email = $8, website = $9, updated_at = NOW()
             WHERE id = $1
             RETURNING *",
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
        Ok(row.map(Supplier::from))
    }

    /// Delete a supplier. Returns `false` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn delete(&self, id: SupplierId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM supplier WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
