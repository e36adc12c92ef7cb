//! Optimistic favorites store reconciled against the server.
//!
//! Every mutation applies to local state first and issues the remote call
//! afterwards; the failure branch receives the pre-mutation snapshot
//! explicitly and rolls local state back to it. The server response is the
//! source of truth: a confirmed create overwrites the optimistic placeholder
//! record in place.
//!
//! Known simplification, kept on purpose: `remove_all` clears locally, fires
//! all deletes concurrently and restores the *entire* previous list when any
//! single delete fails, even though other deletes may have landed remotely.
//! A subsequent `fetch_all` converges back to server state.

use chrono::{Datelike, Utc};

use wine_cellar_core::{Favorite, FavoriteId, GuestKey, Wine, WineId};

use crate::guest_key;
use crate::remote::FavoritesRemote;
use crate::storage::KeyValueStorage;

/// Client-side favorites state for one guest.
///
/// Methods take `&mut self`; overlapping mutations on one store instance are
/// therefore impossible. Remote ordering across separate user actions is
/// last-write-wins and not further guarded.
#[derive(Debug)]
pub struct FavoritesStore<R, S> {
    remote: R,
    storage: S,
    favorites: Vec<Favorite>,
    guest_key: Option<GuestKey>,
    is_loading: bool,
    error: Option<String>,
    /// Next optimistic placeholder id. Server ids are positive serials, so
    /// negative ids can never collide with a confirmed record.
    next_temp_id: i32,
}

impl<R, S> FavoritesStore<R, S>
where
    R: FavoritesRemote,
    S: KeyValueStorage,
{
    /// Create an empty store. No guest key is read or created until the
    /// first operation needs one.
    pub const fn new(remote: R, storage: S) -> Self {
        Self {
            remote,
            storage,
            favorites: Vec::new(),
            guest_key: None,
            is_loading: false,
            error: None,
            next_temp_id: -1,
        }
    }

    /// Current favorites, newest-first after a `fetch_all`.
    #[must_use]
    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    /// Wine ids of all current favorites.
    #[must_use]
    pub fn favorite_wine_ids(&self) -> Vec<WineId> {
        self.favorites.iter().map(|f| f.wine_id).collect()
    }

    /// Whether the wine is currently favorited (confirmed or pending).
    #[must_use]
    pub fn is_favorite(&self, wine_id: WineId) -> bool {
        self.favorites.iter().any(|f| f.wine_id == wine_id)
    }

    /// Whether a mutation is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Last error message, overwritten by each failure and cleared when a
    /// new mutation starts.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The guest key, once one has been loaded or created.
    #[must_use]
    pub const fn guest_key(&self) -> Option<&GuestKey> {
        self.guest_key.as_ref()
    }

    fn ensure_guest_key(&mut self) -> Option<GuestKey> {
        if self.guest_key.is_none() {
            match guest_key::load_or_create(&mut self.storage) {
                Ok(key) => self.guest_key = Some(key),
                Err(e) => {
                    tracing::warn!(error = %e, "Could not persist guest key");
                    self.error = Some("Failed to initialize guest identity".to_owned());
                    return None;
                }
            }
        }
        self.guest_key.clone()
    }

    fn next_temp_id(&mut self) -> FavoriteId {
        let id = FavoriteId::new(self.next_temp_id);
        self.next_temp_id -= 1;
        id
    }

    /// Replace local state with the server's current list.
    ///
    /// On failure local state is left untouched and the error slot is set.
    pub async fn fetch_all(&mut self) {
        let Some(key) = self.ensure_guest_key() else {
            return;
        };

        self.is_loading = true;
        self.error = None;

        match self.remote.list(&key).await {
            Ok(list) => self.favorites = list,
            Err(e) => {
                tracing::debug!(error = %e, "Favorites fetch failed");
                self.error = Some("Failed to fetch favorites".to_owned());
            }
        }

        self.is_loading = false;
    }

    /// Favorite a wine: optimistic local append, then remote create.
    ///
    /// On success the placeholder record (matched by its temporary id) is
    /// replaced with the authoritative record from the response. On failure
    /// the placeholder is removed again.
    pub async fn add(&mut self, wine_id: WineId) {
        let Some(key) = self.ensure_guest_key() else {
            return;
        };

        self.is_loading = true;
        self.error = None;

        let temp_id = self.next_temp_id();
        self.favorites.push(Favorite {
            id: temp_id,
            guest_key: key.clone(),
            wine_id,
            wine: None,
            created_at: Utc::now(),
        });

        match self.remote.create(&key, wine_id).await {
            Ok(confirmed) => {
                if let Some(slot) = self.favorites.iter_mut().find(|f| f.id == temp_id) {
                    *slot = confirmed;
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, wine_id = %wine_id, "Favorite create failed");
                self.favorites.retain(|f| f.id != temp_id);
                self.error = Some("Failed to add favorite".to_owned());
            }
        }

        self.is_loading = false;
    }

    /// Unfavorite a wine: optimistic local removal, then remote delete.
    ///
    /// On failure the removed record is reinserted at its old position.
    pub async fn remove(&mut self, wine_id: WineId) {
        let Some(key) = self.guest_key.clone() else {
            return;
        };
        let Some(position) = self.favorites.iter().position(|f| f.wine_id == wine_id) else {
            return;
        };

        self.is_loading = true;
        self.error = None;

        let removed = self.favorites.remove(position);

        if let Err(e) = self.remote.delete(&key, wine_id).await {
            tracing::debug!(error = %e, wine_id = %wine_id, "Favorite delete failed");
            let position = position.min(self.favorites.len());
            self.favorites.insert(position, removed);
            self.error = Some("Failed to remove favorite".to_owned());
        }

        self.is_loading = false;
    }

    /// Toggle a wine's favorite status.
    ///
    /// Silently does nothing when the wine is hidden from guests or not yet
    /// available this calendar year.
    pub async fn toggle(&mut self, wine: &Wine) {
        if !wine.eligible_for_favorite(Utc::now().year()) {
            return;
        }

        if self.is_favorite(wine.id) {
            self.remove(wine.id).await;
        } else {
            self.add(wine.id).await;
        }
    }

    /// Remove every favorite: local clear, then one concurrent remote delete
    /// per record.
    ///
    /// Any single failure restores the complete pre-clear list; partial
    /// remote successes are not reconciled back (see module docs).
    pub async fn remove_all(&mut self) {
        let Some(key) = self.guest_key.clone() else {
            return;
        };
        if self.favorites.is_empty() {
            return;
        }

        self.is_loading = true;
        self.error = None;

        let snapshot = std::mem::take(&mut self.favorites);

        let deletes = snapshot.iter().map(|f| self.remote.delete(&key, f.wine_id));
        let results = futures::future::join_all(deletes).await;

        if results.iter().any(Result::is_err) {
            self.favorites = snapshot;
            self.error = Some("Failed to remove all favorites".to_owned());
        }

        self.is_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

    use super::*;
    use crate::remote::RemoteError;
    use crate::storage::MemoryStorage;

    /// Scripted in-memory stand-in for the server.
    struct FakeRemote {
        stored: Mutex<Vec<Favorite>>,
        next_id: AtomicI32,
        fail_create: AtomicBool,
        fail_delete: AtomicBool,
        fail_list: AtomicBool,
    }

    impl Default for FakeRemote {
        fn default() -> Self {
            Self {
                stored: Mutex::new(Vec::new()),
                // Server ids are positive serials; start well above zero.
                next_id: AtomicI32::new(100),
                fail_create: AtomicBool::new(false),
                fail_delete: AtomicBool::new(false),
                fail_list: AtomicBool::new(false),
            }
        }
    }

    impl FakeRemote {
        fn with_favorites(favorites: Vec<Favorite>) -> Self {
            Self {
                stored: Mutex::new(favorites),
                next_id: AtomicI32::new(100),
                ..Self::default()
            }
        }

        fn err() -> RemoteError {
            RemoteError::Status {
                code: 500,
                message: "boom".to_owned(),
            }
        }
    }

    impl FavoritesRemote for &FakeRemote {
        async fn list(&self, _key: &GuestKey) -> Result<Vec<Favorite>, RemoteError> {
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(FakeRemote::err());
            }
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn create(&self, key: &GuestKey, wine_id: WineId) -> Result<Favorite, RemoteError> {
            if self.fail_create.load(Ordering::SeqCst) {
                return Err(FakeRemote::err());
            }
            let mut stored = self.stored.lock().unwrap();
            if let Some(existing) = stored
                .iter()
                .find(|f| f.wine_id == wine_id && &f.guest_key == key)
            {
                return Ok(existing.clone());
            }
            let favorite = Favorite {
                id: FavoriteId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
                guest_key: key.clone(),
                wine_id,
                wine: None,
                created_at: Utc::now(),
            };
            stored.push(favorite.clone());
            Ok(favorite)
        }

        async fn delete(&self, key: &GuestKey, wine_id: WineId) -> Result<(), RemoteError> {
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(FakeRemote::err());
            }
            self.stored
                .lock()
                .unwrap()
                .retain(|f| !(f.wine_id == wine_id && &f.guest_key == key));
            Ok(())
        }
    }

    fn store(remote: &FakeRemote) -> FavoritesStore<&FakeRemote, MemoryStorage> {
        FavoritesStore::new(remote, MemoryStorage::new())
    }

    fn wine(id: i32, hidden: bool, available_at_year: Option<i32>) -> Wine {
        use rust_decimal::Decimal;
        use wine_cellar_core::{WineTaste, WineType};

        Wine {
            id: WineId::new(id),
            name: format!("wine-{id}"),
            winery_id: None,
            winery: None,
            art: WineType::Red,
            taste: WineTaste::Dry,
            year: 2020,
            land: "AT_ST".to_owned(),
            region: None,
            price: Decimal::new(900, 2),
            bottles_amount: 1,
            available_at_year,
            image_url: None,
            description: None,
            hidden_for_guests: hidden,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn add_replaces_placeholder_with_confirmed_record() {
        let remote = FakeRemote::default();
        let mut store = store(&remote);

        store.add(WineId::new(5)).await;

        assert_eq!(store.favorites().len(), 1);
        let confirmed = &store.favorites()[0];
        // Server-issued id, not the negative placeholder.
        assert!(confirmed.id.as_i32() > 0);
        assert_eq!(confirmed.wine_id, WineId::new(5));
        assert!(store.error().is_none());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn add_creates_guest_key_on_first_use() {
        let remote = FakeRemote::default();
        let mut store = store(&remote);
        assert!(store.guest_key().is_none());

        store.add(WineId::new(1)).await;

        let key = store.guest_key().cloned().expect("guest key created");
        store.add(WineId::new(2)).await;
        assert_eq!(store.guest_key(), Some(&key));
    }

    #[tokio::test]
    async fn failed_add_rolls_back_placeholder() {
        let remote = FakeRemote::default();
        remote.fail_create.store(true, Ordering::SeqCst);
        let mut store = store(&remote);

        store.add(WineId::new(5)).await;

        assert!(store.favorites().is_empty());
        assert_eq!(store.error(), Some("Failed to add favorite"));
    }

    #[tokio::test]
    async fn failed_remove_reinserts_record() {
        let remote = FakeRemote::default();
        let mut store = store(&remote);
        store.add(WineId::new(1)).await;
        store.add(WineId::new(2)).await;
        let before = store.favorite_wine_ids();

        remote.fail_delete.store(true, Ordering::SeqCst);
        store.remove(WineId::new(1)).await;

        assert_eq!(store.favorite_wine_ids(), before);
        assert_eq!(store.error(), Some("Failed to remove favorite"));
    }

    #[tokio::test]
    async fn remove_deletes_locally_and_remotely() {
        let remote = FakeRemote::default();
        let mut store = store(&remote);
        store.add(WineId::new(1)).await;

        store.remove(WineId::new(1)).await;

        assert!(store.favorites().is_empty());
        assert!(remote.stored.lock().unwrap().is_empty());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn toggle_is_noop_for_hidden_wine() {
        let remote = FakeRemote::default();
        let mut store = store(&remote);

        store.toggle(&wine(2, true, None)).await;

        assert!(store.favorites().is_empty());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn toggle_is_noop_for_coming_soon_wine() {
        let remote = FakeRemote::default();
        let mut store = store(&remote);
        let next_year = Utc::now().year() + 1;

        store.toggle(&wine(2, false, Some(next_year))).await;

        assert!(store.favorites().is_empty());
    }

    #[tokio::test]
    async fn toggle_adds_then_removes_eligible_wine() {
        let remote = FakeRemote::default();
        let mut store = store(&remote);
        let w = wine(1, false, None);

        store.toggle(&w).await;
        assert!(store.is_favorite(w.id));

        store.toggle(&w).await;
        assert!(!store.is_favorite(w.id));
    }

    #[tokio::test]
    async fn fetch_all_replaces_state_wholesale() {
        let key = GuestKey::parse("fixed-key").unwrap();
        let existing = Favorite {
            id: FavoriteId::new(10),
            guest_key: key.clone(),
            wine_id: WineId::new(7),
            wine: None,
            created_at: Utc::now(),
        };
        let remote = FakeRemote::with_favorites(vec![existing.clone()]);
        let mut store = store(&remote);

        store.fetch_all().await;

        assert_eq!(store.favorites(), &[existing]);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_state_untouched() {
        let remote = FakeRemote::default();
        let mut store = store(&remote);
        store.add(WineId::new(3)).await;
        let before = store.favorites().to_vec();

        remote.fail_list.store(true, Ordering::SeqCst);
        store.fetch_all().await;

        assert_eq!(store.favorites(), before.as_slice());
        assert_eq!(store.error(), Some("Failed to fetch favorites"));
    }

    #[tokio::test]
    async fn remove_all_clears_local_and_remote() {
        let remote = FakeRemote::default();
        let mut store = store(&remote);
        store.add(WineId::new(1)).await;
        store.add(WineId::new(2)).await;
        store.add(WineId::new(3)).await;

        store.remove_all().await;

        assert!(store.favorites().is_empty());
        assert!(remote.stored.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_remove_all_restores_full_snapshot() {
        let remote = FakeRemote::default();
        let mut store = store(&remote);
        store.add(WineId::new(1)).await;
        store.add(WineId::new(2)).await;
        let before = store.favorite_wine_ids();

        remote.fail_delete.store(true, Ordering::SeqCst);
        store.remove_all().await;

        // Coarse rollback: the whole pre-clear list is back.
        assert_eq!(store.favorite_wine_ids(), before);
        assert_eq!(store.error(), Some("Failed to remove all favorites"));
    }

    #[tokio::test]
    async fn error_slot_is_cleared_by_next_mutation_and_last_error_wins() {
        let remote = FakeRemote::default();
        let mut store = store(&remote);

        remote.fail_create.store(true, Ordering::SeqCst);
        store.add(WineId::new(1)).await;
        assert_eq!(store.error(), Some("Failed to add favorite"));

        remote.fail_create.store(false, Ordering::SeqCst);
        store.add(WineId::new(1)).await;
        assert!(store.error().is_none());

        remote.fail_list.store(true, Ordering::SeqCst);
        store.fetch_all().await;
        assert_eq!(store.error(), Some("Failed to fetch favorites"));
    }
}
