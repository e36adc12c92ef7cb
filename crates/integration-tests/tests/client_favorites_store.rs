//! End-to-end test of the client favorites store against a live server.
//!
//! Run with: cargo test -p wine-cellar-integration-tests -- --ignored

use serde_json::Value;

use wine_cellar_client::{FavoritesStore, HttpRemote, MemoryStorage};
use wine_cellar_core::WineId;
use wine_cellar_integration_tests::{base_url, client};

#[tokio::test]
#[ignore = "Requires running server"]
async fn store_reconciles_against_live_server() {
    let wines: Vec<Value> = client()
        .get(format!("{}/api/guest/wines", base_url()))
        .send()
        .await
        .expect("Failed to list guest wines")
        .json()
        .await
        .expect("Failed to parse guest wines");
    assert!(!wines.is_empty(), "seeded catalog expected");
    #[allow(clippy::cast_possible_truncation)]
    let wine_id = WineId::new(wines[0]["id"].as_i64().expect("wine id") as i32);

    let remote = HttpRemote::new(base_url()).expect("remote");
    let mut store = FavoritesStore::new(remote, MemoryStorage::new());

    store.add(wine_id).await;
    assert!(store.error().is_none(), "add failed: {:?}", store.error());
    assert!(store.is_favorite(wine_id));
    // The optimistic placeholder must have been replaced by a server id.
    assert!(store.favorites()[0].id.as_i32() > 0);

    // A second store under the same guest key sees the favorite.
    let key = store.guest_key().expect("guest key").clone();
    let mut storage = MemoryStorage::new();
    wine_cellar_client::KeyValueStorage::set(
        &mut storage,
        wine_cellar_client::guest_key::GUEST_KEY_STORAGE_KEY,
        key.as_str(),
    )
    .expect("seed storage");
    let mut second = FavoritesStore::new(HttpRemote::new(base_url()).expect("remote"), storage);
    second.fetch_all().await;
    assert!(second.is_favorite(wine_id));

    // Cleanup through the store.
    store.remove(wine_id).await;
    assert!(store.error().is_none(), "remove failed: {:?}", store.error());
    assert!(!store.is_favorite(wine_id));
}
