//! Integration tests for the wine statistics endpoint.
//!
//! Run with: cargo test -p wine-cellar-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use wine_cellar_integration_tests::{base_url, client};

const WINE_TYPES: [&str; 6] = ["RED", "WHITE", "ROSE", "ORANGE", "SPARKLING", "DESSERT"];
const WINE_TASTES: [&str; 4] = ["DRY", "SEMI_DRY", "SEMI_SWEET", "SWEET"];

async fn fetch_stats() -> Value {
    let resp = client()
        .get(format!("{}/api/stats/wines", base_url()))
        .send()
        .await
        .expect("stats request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("stats body")
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn every_enum_variant_appears_in_stats() {
    let stats = fetch_stats().await;

    let by_type = stats["byType"].as_object().expect("byType object");
    for variant in WINE_TYPES {
        assert!(by_type.contains_key(variant), "missing type {variant}");
    }

    let by_taste = stats["byTaste"].as_object().expect("byTaste object");
    for variant in WINE_TASTES {
        assert!(by_taste.contains_key(variant), "missing taste {variant}");
    }
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn dimension_counts_agree_with_totals() {
    let stats = fetch_stats().await;

    let sum_counts = |key: &str| -> i64 {
        stats[key]
            .as_object()
            .expect("grouping object")
            .values()
            .map(|bucket| bucket["count"].as_i64().expect("count"))
            .sum()
    };

    let totals = stats["totals"]["count"].as_i64().expect("totals count");
    assert_eq!(sum_counts("byType"), totals);
    assert_eq!(sum_counts("byTaste"), totals);

    let land_total: i64 = stats["byLand"]
        .as_array()
        .expect("byLand array")
        .iter()
        .map(|entry| entry["count"].as_i64().expect("count"))
        .sum();
    assert_eq!(land_total, totals);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn lands_are_sorted_by_descending_count() {
    let stats = fetch_stats().await;

    let counts: Vec<i64> = stats["byLand"]
        .as_array()
        .expect("byLand array")
        .iter()
        .map(|entry| entry["count"].as_i64().expect("count"))
        .collect();

    assert!(counts.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn stats_ordering_is_deterministic() {
    let first = fetch_stats().await;
    let second = fetch_stats().await;
    assert_eq!(first, second);
}
