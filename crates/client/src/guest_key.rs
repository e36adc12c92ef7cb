//! Stable pseudonymous identity for unauthenticated guests.
//!
//! The key is generated once on first favoriting interaction, persisted
//! under a fixed storage key and never rotated or expired.

use wine_cellar_core::GuestKey;

use crate::storage::{KeyValueStorage, StorageError};

/// Storage key under which the guest key is persisted.
pub const GUEST_KEY_STORAGE_KEY: &str = "guestKey";

/// Load the persisted guest key, creating and persisting a fresh one when
/// none exists yet.
///
/// # Errors
///
/// Returns [`StorageError`] when persisting a newly created key fails. In
/// that case no key is returned; the caller stays keyless and may try again.
pub fn load_or_create<S: KeyValueStorage>(storage: &mut S) -> Result<GuestKey, StorageError> {
    if let Some(existing) = storage
        .get(GUEST_KEY_STORAGE_KEY)
        .and_then(|raw| GuestKey::parse(&raw).ok())
    {
        return Ok(existing);
    }

    let key = GuestKey::generate();
    storage.set(GUEST_KEY_STORAGE_KEY, key.as_str())?;
    tracing::debug!(guest_key = %key, "Created new guest key");
    Ok(key)
}
