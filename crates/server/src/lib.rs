//! WineCellar server library.
//!
//! Exposes the API as a library so routers and handlers can be exercised
//! from tests and reused by the CLI.
//!
//! # Surface
//!
//! - Guest catalog and guest favorites (keyed by the `X-Guest-Key` header)
//! - Wine statistics aggregation
//! - Admin CRUD for wines, wineries and suppliers behind a session login
//! - Image upload for wine photos

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod stats;
