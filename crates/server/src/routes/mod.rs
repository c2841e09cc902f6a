//! HTTP route handlers for the shop-registry API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Liveness check
//! GET    /health/ready           - Readiness check (probes the store)
//!
//! # ShopTwo resource (JSON)
//! POST   /api/shop-twos          - Create (body id must be null)
//! GET    /api/shop-twos          - List all, optional ?sort=id,desc
//! GET    /api/shop-twos/{id}     - Fetch one
//! PUT    /api/shop-twos/{id}     - Full replace
//! PATCH  /api/shop-twos/{id}     - Merge-patch (non-null fields only)
//! DELETE /api/shop-twos/{id}     - Delete (idempotent)
//! ```
//!
//! Methods without the required path id (e.g. `PUT /api/shop-twos`) fall
//! through to the router's 405 handling.

pub mod shop_twos;

use axum::http::StatusCode;
use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use shop_registry_core::ShopTwoId;

use crate::state::AppState;

/// Create the ShopTwo resource router.
pub fn shop_two_routes() -> Router<AppState> {
    Router::new()
        .route("/shop-twos", post(shop_twos::create).get(shop_twos::list))
        .route(
            "/shop-twos/{id}",
            get(shop_twos::get_one)
                .put(shop_twos::update)
                .patch(shop_twos::partial_update)
                .delete(shop_twos::delete_one),
        )
}

/// Assemble the full application router.
///
/// Shared by `main` and the integration tests; Sentry layers are added on
/// top by the binary only.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api", shop_two_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Probes the entity store before returning OK. Returns 503 Service
/// Unavailable if the store cannot serve reads.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().exists_by_id(ShopTwoId::new(0)) {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
