use crate::app::{ReconcileReport, WishlistUseCase};
use crate::observability::metrics;
use crate::wishlist::WishlistIds;
use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Extension, Router,
};
use hyper::Server;
use serde::Deserialize;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Body of `POST /wishlist`: raw session entries, canonicalised server-side
#[derive(Debug, Default, Deserialize)]
pub struct WishlistRequest {
    #[serde(default)]
    pub ids: Vec<Value>,
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "wishlist-sync",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn metrics_text() -> impl IntoResponse {
    match metrics::render() {
        Some(body) => (StatusCode::OK, body).into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed".to_string(),
        )
            .into_response(),
    }
}

pub async fn wishlist_handler(
    Extension(use_case): Extension<Arc<WishlistUseCase>>,
    Json(request): Json<WishlistRequest>,
) -> Json<ReconcileReport> {
    let wishlist = WishlistIds::from_entries(&request.ids);
    Json(use_case.reconcile(&wishlist).await)
}

pub fn create_server(use_case: Arc<WishlistUseCase>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/wishlist", post(wishlist_handler))
        .layer(Extension(use_case))
        .layer(ServiceBuilder::new().layer(cors))
}

/// Start the HTTP server on the specified port
pub async fn start_server(use_case: Arc<WishlistUseCase>, port: u16) -> anyhow::Result<()> {
    let app = create_server(use_case);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("HTTP server listening on http://{}", addr);
    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
