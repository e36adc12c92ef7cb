//! Remote endpoints consumed by the client stores.
//!
//! Stores depend on the small [`FavoritesRemote`] and [`AuthRemote`] traits
//! so tests can swap in scripted fakes; [`HttpRemote`] is the reqwest-backed
//! implementation used against a running server.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use wine_cellar_core::{Favorite, GUEST_KEY_HEADER, GuestKey, WineId};

use crate::auth::AdminSession;

/// Errors surfaced by a remote call.
///
/// A failed call is reported exactly once; no transport-level retry exists
/// anywhere in the client.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// The server answered with a non-success status.
    #[error("server returned {code}: {message}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Server-provided message, possibly empty.
        message: String,
    },

    /// The request never produced a server answer.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Guest-key-scoped favorites endpoints.
pub trait FavoritesRemote {
    /// Fetch all favorites for the guest key, newest first.
    fn list(
        &self,
        key: &GuestKey,
    ) -> impl Future<Output = Result<Vec<Favorite>, RemoteError>> + Send;

    /// Create (or idempotently re-create) a favorite for the wine.
    fn create(
        &self,
        key: &GuestKey,
        wine_id: WineId,
    ) -> impl Future<Output = Result<Favorite, RemoteError>> + Send;

    /// Delete the favorite for the wine. Zero matches is still a success.
    fn delete(
        &self,
        key: &GuestKey,
        wine_id: WineId,
    ) -> impl Future<Output = Result<(), RemoteError>> + Send;
}

/// Admin session endpoints.
pub trait AuthRemote {
    /// Exchange credentials for a server session.
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AdminSession, RemoteError>> + Send;

    /// Drop the server session.
    fn sign_out(&self) -> impl Future<Output = Result<(), RemoteError>> + Send;

    /// Fetch the current session, if any.
    fn session(&self) -> impl Future<Output = Result<Option<AdminSession>, RemoteError>> + Send;
}

/// Error body shape produced by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Acknowledgment body for deletes and logout.
#[derive(Debug, Deserialize)]
struct Ack {
    #[allow(dead_code)]
    success: bool,
}

/// reqwest-backed remote. Keeps a cookie store so the admin session cookie
/// survives across calls.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    /// Create a remote for the given server base URL (no trailing slash
    /// required).
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, RemoteError> {
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map_or(body, |parsed| parsed.message);
            return Err(RemoteError::Status {
                code: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))
    }
}

impl FavoritesRemote for HttpRemote {
    async fn list(&self, key: &GuestKey) -> Result<Vec<Favorite>, RemoteError> {
        Self::send(
            self.client
                .get(self.url("/api/favorites"))
                .header(GUEST_KEY_HEADER, key.as_str()),
        )
        .await
    }

    async fn create(&self, key: &GuestKey, wine_id: WineId) -> Result<Favorite, RemoteError> {
        Self::send(
            self.client
                .post(self.url("/api/favorites"))
                .header(GUEST_KEY_HEADER, key.as_str())
                .json(&serde_json::json!({ "wineId": wine_id })),
        )
        .await
    }

    async fn delete(&self, key: &GuestKey, wine_id: WineId) -> Result<(), RemoteError> {
        let _: Ack = Self::send(
            self.client
                .delete(self.url(&format!("/api/favorites/{wine_id}")))
                .header(GUEST_KEY_HEADER, key.as_str()),
        )
        .await?;
        Ok(())
    }
}

impl AuthRemote for HttpRemote {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AdminSession, RemoteError> {
        Self::send(
            self.client
                .post(self.url("/api/auth/login"))
                .json(&serde_json::json!({ "email": email, "password": password })),
        )
        .await
    }

    async fn sign_out(&self) -> Result<(), RemoteError> {
        let _: Ack = Self::send(self.client.post(self.url("/api/auth/logout"))).await?;
        Ok(())
    }

    async fn session(&self) -> Result<Option<AdminSession>, RemoteError> {
        Self::send(self.client.get(self.url("/api/auth/session"))).await
    }
}
