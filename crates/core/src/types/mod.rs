//! Core types for WineCellar.
//!
//! Entity types mirror the JSON wire format (camelCase) used by both the
//! server handlers and the client stores.

pub mod contact;
pub mod email;
pub mod favorite;
pub mod id;
pub mod website;
pub mod wine;

pub use contact::{ContactDetails, Supplier, Winery};
pub use email::{Email, EmailError};
pub use favorite::{Favorite, GUEST_KEY_HEADER, GuestKey, GuestKeyError};
pub use id::*;
pub use website::{Website, WebsiteError};
pub use wine::{Wine, WineTaste, WineType};
