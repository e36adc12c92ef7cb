//! Integration tests for admin auth and catalog CRUD.
//!
//! These tests require a seeded database (default admin) and a running
//! server.
//!
//! Run with: cargo test -p wine-cellar-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use wine_cellar_integration_tests::{base_url, client};

/// Log in with the seeded default admin; the session cookie sticks to the
/// returned client.
async fn admin_client() -> Client {
    let client = client();
    let resp = client
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({
            "email": "admin@winecellar.local",
            "password": "admin123",
        }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), StatusCode::OK, "seeded admin expected");
    client
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn mutations_require_a_session() {
    let resp = client()
        .post(format!("{}/api/wines", base_url()))
        .json(&json!({ "name": "Nope" }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn login_rejects_bad_credentials_generically() {
    let resp = client()
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({
            "email": "admin@winecellar.local",
            "password": "wrong",
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = resp.json().await.expect("error body");
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn session_endpoint_tracks_login_state() {
    let base = base_url();
    let anonymous: Value = client()
        .get(format!("{base}/api/auth/session"))
        .send()
        .await
        .expect("session request failed")
        .json()
        .await
        .expect("session body");
    assert!(anonymous.is_null());

    let client = admin_client().await;
    let session: Value = client
        .get(format!("{base}/api/auth/session"))
        .send()
        .await
        .expect("session request failed")
        .json()
        .await
        .expect("session body");
    assert_eq!(session["email"], "admin@winecellar.local");

    client
        .post(format!("{base}/api/auth/logout"))
        .send()
        .await
        .expect("logout failed");
    let after: Value = client
        .get(format!("{base}/api/auth/session"))
        .send()
        .await
        .expect("session request failed")
        .json()
        .await
        .expect("session body");
    assert!(after.is_null());
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn wine_crud_roundtrip() {
    let client = admin_client().await;
    let base = base_url();

    let created: Value = client
        .post(format!("{base}/api/wines"))
        .json(&json!({
            "name": "Integration Riesling",
            "art": "WHITE",
            "taste": "DRY",
            "year": 2023,
            "land": "Germany",
            "price": "11.80",
            "bottlesAmount": 12,
        }))
        .send()
        .await
        .expect("create failed")
        .json()
        .await
        .expect("wine body");
    let id = created["id"].as_i64().expect("wine id");

    let updated: Value = client
        .put(format!("{base}/api/wines/{id}"))
        .json(&json!({
            "name": "Integration Riesling",
            "art": "WHITE",
            "taste": "SEMI_DRY",
            "year": 2023,
            "land": "Germany",
            "price": "11.80",
            "bottlesAmount": 10,
        }))
        .send()
        .await
        .expect("update failed")
        .json()
        .await
        .expect("wine body");
    assert_eq!(updated["taste"], "SEMI_DRY");
    assert_eq!(updated["bottlesAmount"], 10);

    let deleted: Value = client
        .delete(format!("{base}/api/wines/{id}"))
        .send()
        .await
        .expect("delete failed")
        .json()
        .await
        .expect("delete body");
    assert_eq!(deleted["success"], true);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn winery_with_wines_cannot_be_deleted() {
    let client = admin_client().await;
    let base = base_url();

    let winery: Value = client
        .post(format!("{base}/api/wineries"))
        .json(&json!({ "name": "Refusal Test Winery", "land": "Austria" }))
        .send()
        .await
        .expect("create winery failed")
        .json()
        .await
        .expect("winery body");
    let winery_id = winery["id"].as_i64().expect("winery id");

    let wine: Value = client
        .post(format!("{base}/api/wines"))
        .json(&json!({
            "name": "Refusal Test Wine",
            "wineryId": winery_id,
            "art": "RED",
            "taste": "DRY",
            "year": 2022,
            "land": "Austria",
            "price": "10.00",
            "bottlesAmount": 1,
        }))
        .send()
        .await
        .expect("create wine failed")
        .json()
        .await
        .expect("wine body");
    let wine_id = wine["id"].as_i64().expect("wine id");

    let refusal = client
        .delete(format!("{base}/api/wineries/{winery_id}"))
        .send()
        .await
        .expect("delete winery failed");
    assert_eq!(refusal.status(), StatusCode::BAD_REQUEST);
    let body: Value = refusal.json().await.expect("error body");
    assert!(
        body["message"].as_str().expect("message").contains('1'),
        "refusal names the wine count"
    );

    // Cleanup: wine first, then the winery goes through.
    client
        .delete(format!("{base}/api/wines/{wine_id}"))
        .send()
        .await
        .expect("cleanup wine failed");
    let deleted = client
        .delete(format!("{base}/api/wineries/{winery_id}"))
        .send()
        .await
        .expect("cleanup winery failed");
    assert_eq!(deleted.status(), StatusCode::OK);
}
