//! Server-side domain models that never leave the backend.

pub mod admin_user;

pub use admin_user::{AdminUser, CurrentAdmin};
