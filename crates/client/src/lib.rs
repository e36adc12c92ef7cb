//! WineCellar Client - guest-side state stores.
//!
//! This crate holds the in-process state a WineCellar frontend works with:
//!
//! - [`favorites::FavoritesStore`] - optimistic favorites list reconciled
//!   against the server, keyed by a persistent guest key
//! - [`wines_view::WineListView`] - declarative filter/sort view over an
//!   in-memory wine list
//! - [`ui::UiPreferences`] - layout and theme preferences
//! - [`auth::AuthStore`] - admin session state
//!
//! Remote access goes through the [`remote::FavoritesRemote`] and
//! [`remote::AuthRemote`] traits; [`remote::HttpRemote`] is the reqwest-backed
//! implementation talking to a running server. Persistence of the guest key
//! and preferences goes through [`storage::KeyValueStorage`].
//!
//! No store retries a failed request. Every failure is surfaced once through
//! the store's single error slot (or, for login, rethrown to the caller) and
//! requires a new user action.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod favorites;
pub mod guest_key;
pub mod remote;
pub mod storage;
pub mod ui;
pub mod wines_view;

pub use favorites::FavoritesStore;
pub use remote::{HttpRemote, RemoteError};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use wines_view::WineListView;
