//! Integration tests for shop-registry.
//!
//! Each test boots the real router in-process on an ephemeral port and
//! drives it over HTTP with `reqwest`. The entity store is in-memory, so no
//! external services are required.
//!
//! ```bash
//! cargo test -p shop-registry-integration-tests
//! ```

use std::net::{IpAddr, Ipv4Addr};

use shop_registry_server::config::ServerConfig;
use shop_registry_server::routes;
use shop_registry_server::state::AppState;

/// Configuration for a test server instance.
#[must_use]
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
        broker: None,
    }
}

/// Boot a server on an ephemeral port and return its base URL.
///
/// The server runs on a background task for the remainder of the test
/// process; each call gets a fresh state and store.
///
/// # Panics
///
/// Panics if the listener cannot bind.
pub async fn spawn_server() -> String {
    let state = AppState::new(test_config());
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has a local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    format!("http://{addr}")
}
