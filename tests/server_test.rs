use async_trait::async_trait;
use axum::{Extension, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use wishlist_sync::app::ports::HttpClientPort;
use wishlist_sync::app::WishlistUseCase;
use wishlist_sync::catalog::CatalogFetcher;
use wishlist_sync::common::error::Result;
use wishlist_sync::config::ApiConfig;
use wishlist_sync::server::{wishlist_handler, WishlistRequest};

/// Every source answers with the same two packages
struct StaticCatalog;

#[async_trait]
impl HttpClientPort for StaticCatalog {
    async fn get_json(&self, url: &str) -> Result<Value> {
        if url.ends_with("/api/packages") {
            Ok(json!([
                { "_id": "a", "title": "Andaman Escape", "location": "Port Blair", "price": "₹45,000" },
                { "_id": "b", "title": "Rann Utsav" }
            ]))
        } else {
            Ok(json!({}))
        }
    }
}

fn use_case() -> Arc<WishlistUseCase> {
    let fetcher = CatalogFetcher::new(Arc::new(StaticCatalog), ApiConfig::default());
    Arc::new(WishlistUseCase::new(fetcher))
}

#[tokio::test]
async fn test_wishlist_handler_returns_routed_items() {
    let request = WishlistRequest {
        ids: vec![json!({ "_id": "a" }), json!("zzz")],
    };

    let Json(report) = wishlist_handler(Extension(use_case()), Json(request)).await;

    assert_eq!(report.items.len(), 1);
    let body = serde_json::to_value(&report.items[0]).unwrap();
    assert_eq!(body["id"], "a");
    assert_eq!(body["destination"], "Port Blair");
    assert_eq!(body["price"], 45000.0);
    assert_eq!(body["source"], "package");
    assert_eq!(body["route"], "/itinerary/a");
}

#[tokio::test]
async fn test_wishlist_handler_accepts_missing_ids() {
    let request: WishlistRequest = serde_json::from_value(json!({})).unwrap();

    let Json(report) = wishlist_handler(Extension(use_case()), Json(request)).await;

    assert!(report.items.is_empty());
    assert_eq!(report.fetched_records, 0);
}
