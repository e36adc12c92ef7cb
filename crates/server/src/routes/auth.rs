//! Admin authentication handlers.
//!
//! Email and password login against `admin_user`, with the argon2 hash
//! verified server-side. Login failures are deliberately indistinguishable
//! between unknown email and wrong password.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::db::AdminUserRepository;
use crate::error::AppError;
use crate::middleware::auth::{clear_current_admin, set_current_admin};
use crate::models::{CurrentAdmin, admin_user::session_keys};
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/session", get(session_info))
}

/// Request body for login.
#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid email or password".to_owned())
}

/// Log in an admin with email and password.
///
/// POST /api/auth/login
///
/// # Errors
///
/// Returns a generic 401 on any mismatch and an error if the database
/// operation fails.
async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<CurrentAdmin>, AppError> {
    let user = AdminUserRepository::new(state.pool())
        .get_by_email(&body.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Internal(format!("stored password hash is invalid: {e}")))?;
    Argon2::default()
        .verify_password(body.password.as_bytes(), &hash)
        .map_err(|_| invalid_credentials())?;

    let admin = CurrentAdmin::from(&user);
    set_current_admin(&session, &admin)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store session: {e}")))?;

    tracing::info!(admin = %admin.email, "Admin logged in");
    Ok(Json(admin))
}

/// Response for logout.
#[derive(Debug, Serialize)]
struct LogoutResponse {
    success: bool,
}

/// Log out and clear the session.
///
/// POST /api/auth/logout
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
async fn logout(session: Session) -> Result<Json<LogoutResponse>, AppError> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;
    Ok(Json(LogoutResponse { success: true }))
}

/// Return the logged-in admin, or null.
///
/// GET /api/auth/session
///
/// # Errors
///
/// Returns an error if the session cannot be read.
async fn session_info(session: Session) -> Result<Json<Option<CurrentAdmin>>, AppError> {
    let admin: Option<CurrentAdmin> = session
        .get(session_keys::CURRENT_ADMIN)
        .await
        .map_err(|e| AppError::Internal(format!("failed to read session: {e}")))?;
    Ok(Json(admin))
}
