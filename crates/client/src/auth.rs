//! Admin session state.
//!
//! Unlike the favorites store, `login` rethrows its failure so a login form
//! can stay open and react; the error slot is still set for display.

use serde::{Deserialize, Serialize};

use wine_cellar_core::AdminUserId;

use crate::remote::{AuthRemote, RemoteError};

/// The signed-in admin as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub id: AdminUserId,
    pub email: String,
    pub name: String,
}

/// Client-side auth state.
#[derive(Debug)]
pub struct AuthStore<R> {
    remote: R,
    session: Option<AdminSession>,
    is_loading: bool,
    error: Option<String>,
}

impl<R: AuthRemote> AuthStore<R> {
    pub const fn new(remote: R) -> Self {
        Self {
            remote,
            session: None,
            is_loading: false,
            error: None,
        }
    }

    #[must_use]
    pub const fn session(&self) -> Option<&AdminSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Rethrows the remote failure after recording it in the error slot, so
    /// the caller can keep its form open.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), RemoteError> {
        self.is_loading = true;
        self.error = None;

        let result = self.remote.sign_in(email, password).await;
        self.is_loading = false;

        match result {
            Ok(session) => {
                self.session = Some(session);
                Ok(())
            }
            Err(e) => {
                self.error = Some(match &e {
                    RemoteError::Status { message, .. } if !message.is_empty() => message.clone(),
                    _ => "Invalid credentials".to_owned(),
                });
                Err(e)
            }
        }
    }

    /// Sign out. The local session is dropped even when the remote call
    /// fails; the server session expires on its own.
    pub async fn logout(&mut self) {
        self.is_loading = true;
        if let Err(e) = self.remote.sign_out().await {
            tracing::debug!(error = %e, "Logout request failed");
        }
        self.session = None;
        self.is_loading = false;
    }

    /// Refetch the current session from the server.
    pub async fn refresh(&mut self) {
        match self.remote.session().await {
            Ok(session) => self.session = session,
            Err(e) => {
                tracing::debug!(error = %e, "Session refresh failed");
            }
        }
    }
}
