//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use chain_router::config::RouterConfig;
use chain_router::{HttpServer, Router, Shutdown};
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral port. Returns the bound address and the
/// shutdown handle that stops the server.
pub async fn start_server(config: RouterConfig, router: Router) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, router);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// Client that never reuses connections between tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
