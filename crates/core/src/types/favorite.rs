//! Guest favorites and the pseudonymous guest key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id::{FavoriteId, WineId};
use super::wine::Wine;

/// HTTP header carrying the guest key on favorites requests.
pub const GUEST_KEY_HEADER: &str = "X-Guest-Key";

/// Errors that can occur when parsing a [`GuestKey`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum GuestKeyError {
    /// The input string is empty.
    #[error("guest key cannot be empty")]
    Empty,
}

/// Opaque client-issued token identifying an unauthenticated guest.
///
/// Generated once on the client (a random UUID), persisted indefinitely and
/// never rotated. The server treats it as an opaque non-empty string and
/// scopes favorite records by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestKey(String);

impl GuestKey {
    /// Parse a guest key, rejecting only empty input.
    ///
    /// # Errors
    ///
    /// Returns [`GuestKeyError::Empty`] for an empty string.
    pub fn parse(s: &str) -> Result<Self, GuestKeyError> {
        if s.is_empty() {
            return Err(GuestKeyError::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// Generate a fresh random key.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for GuestKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A guest's favorite association with a wine.
///
/// Unique per `(guest_key, wine_id)`; a repeated create for the same pair
/// returns the existing record rather than duplicating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: FavoriteId,
    pub guest_key: GuestKey,
    pub wine_id: WineId,
    /// Joined wine (with winery), present when the query included it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wine: Option<Wine>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_key_rejects_empty() {
        assert!(GuestKey::parse("").is_err());
        assert!(GuestKey::parse("abc").is_ok());
    }

    #[test]
    fn generated_keys_are_unique() {
        assert_ne!(GuestKey::generate(), GuestKey::generate());
    }

    #[test]
    fn favorite_serializes_camel_case() {
        let fav = Favorite {
            id: FavoriteId::new(1),
            guest_key: GuestKey::parse("g-1").unwrap(),
            wine_id: WineId::new(9),
            wine: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&fav).unwrap();
        assert_eq!(json["guestKey"], "g-1");
        assert_eq!(json["wineId"], 9);
        assert!(json.get("wine").is_none());
    }
}
