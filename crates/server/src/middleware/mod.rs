//! HTTP middleware and request extractors.
//!
//! # Layer order (bottom to top in the router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)

pub mod auth;
pub mod guest;
pub mod session;

pub use auth::RequireAdminAuth;
pub use guest::GuestKeyHeader;
pub use session::create_session_layer;
