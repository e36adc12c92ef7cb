//! Admin accounts and the session-resident admin snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wine_cellar_core::{AdminUserId, Email};

/// A stored admin account, including the argon2 password hash.
///
/// Never serialized to clients; handlers convert to [`CurrentAdmin`]
/// before responding.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The admin identity stored in the session after login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentAdmin {
    pub id: AdminUserId,
    pub email: String,
    pub name: String,
}

impl From<&AdminUser> for CurrentAdmin {
    fn from(user: &AdminUser) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_owned(),
            name: user.name.clone(),
        }
    }
}

/// Session keys used by the auth handlers and extractors.
pub mod session_keys {
    pub const CURRENT_ADMIN: &str = "current_admin";
}
