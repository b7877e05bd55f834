//! Test server lifecycle management
//!
//! Each test gets an isolated adapter instance wired to its own mock
//! upstream, both on random ports.

use statbank_mcp_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use statbank_mcp_server::statbank::StatbankClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::constants::*;
use super::upstream::MockUpstream;

/// Test server instance with its own mock upstream
///
/// When dropped, both servers gracefully shut down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the adapter is listening on
    pub port: u16,

    /// The mock upstream this adapter forwards to
    pub upstream: MockUpstream,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a mock upstream and an adapter pointing at it, both on
    /// random ports, and waits for the adapter to become ready.
    pub async fn spawn() -> Self {
        let upstream = MockUpstream::spawn().await;

        let statbank = Arc::new(
            StatbankClient::new(&upstream.base_url, REQUEST_TIMEOUT_SECS)
                .expect("Failed to create statbank client"),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
        };

        let app = make_app(config, statbank);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            upstream,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the home endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => {
                    return;
                }
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
