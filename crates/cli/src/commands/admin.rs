//! Admin user management command.
//!
//! # Usage
//!
//! ```bash
//! wine-cellar admin create -e admin@example.com -n "Admin Name" -p secret
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use wine_cellar_core::{AdminUserId, Email};
use wine_cellar_server::db::AdminUserRepository;

use super::CliError;

/// Hash a password with argon2 and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, CliError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CliError::PasswordHash(e.to_string()))
}

/// Create a new admin user.
///
/// # Errors
///
/// Fails for a malformed email, a duplicate account or database errors.
pub async fn create_user(email: &str, name: &str, password: &str) -> Result<AdminUserId, CliError> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidEmail(e.to_string()))?;

    let pool = super::connect().await?;
    let id = create_in(&pool, &email, name, password).await?;

    tracing::info!("Admin user created successfully! ID: {}, Email: {}", id, email.as_str());
    Ok(id)
}

/// Create an admin in an existing pool; shared with `seed`.
pub async fn create_in(
    pool: &PgPool,
    email: &Email,
    name: &str,
    password: &str,
) -> Result<AdminUserId, CliError> {
    let repo = AdminUserRepository::new(pool);

    if repo.get_by_email(email.as_str()).await?.is_some() {
        return Err(CliError::UserExists(email.as_str().to_owned()));
    }

    let password_hash = hash_password(password)?;
    let user = repo.create(email, name, &password_hash).await?;
    Ok(user.id)
}
