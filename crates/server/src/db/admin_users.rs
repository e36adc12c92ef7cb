//! Admin user repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use wine_cellar_core::{AdminUserId, Email};

use super::RepositoryError;
use crate::models::AdminUser;

#[derive(Debug, sqlx::FromRow)]
struct AdminUserRow {
    id: i32,
    email: String,
    name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AdminUserRow> for AdminUser {
    type Error = RepositoryError;

    fn try_from(row: AdminUserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid admin email in database: {e}"))
        })?;
        Ok(Self {
            id: AdminUserId::new(row.id),
            email,
            name: row.name,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for admin account lookups and provisioning.
pub struct AdminUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminUserRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up an admin by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails or the row is invalid.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<AdminUser>, RepositoryError> {
        let row: Option<AdminUserRow> =
            sqlx::query_as("SELECT * FROM admin_user WHERE email = $1")
                .bind(email)
                .fetch_optional(self.pool)
                .await?;
        row.map(AdminUser::try_from).transpose()
    }

    /// Insert an admin account with a pre-hashed password. The email must
    /// be unique.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn create(
        &self,
        email: &Email,
        name: &str,
        password_hash: &str,
    ) -> Result<AdminUser, RepositoryError> {
        let row: AdminUserRow = sqlx::query_as(
            "INSERT INTO admin_user (email, name, password_hash)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(email.as_str())
        .bind(name)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await?;
        row.try_into()
    }
}
