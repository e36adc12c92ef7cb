//! Integration tests for WineCellar.
//!
//! The tests in `tests/` exercise the HTTP API of a running server and
//! are `#[ignore]`d by default.
//!
//! # Running
//!
//! ```bash
//! # Migrate and seed a local database, then start the server
//! cargo run -p wine-cellar-cli -- migrate
//! cargo run -p wine-cellar-cli -- seed
//! cargo run -p wine-cellar-server
//!
//! # Run the ignored tests against it
//! cargo test -p wine-cellar-integration-tests -- --ignored
//! ```

use reqwest::Client;

/// Base URL for the API, configurable via `WINE_CELLAR_BASE_URL`.
#[must_use]
pub fn base_url() -> String {
    std::env::var("WINE_CELLAR_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned())
}

/// HTTP client with a cookie store, so admin logins persist.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A fresh guest key value for test isolation.
#[must_use]
pub fn fresh_guest_key() -> String {
    uuid::Uuid::new_v4().to_string()
}
