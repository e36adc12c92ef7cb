//! WineCellar Core - Shared domain types library.
//!
//! This crate provides the common types used across all WineCellar components:
//! - `server` - JSON API for catalog, favorites and statistics
//! - `client` - Guest-side state stores (favorites, filters, preferences)
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Entity types, enumerations and validated field wrappers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
