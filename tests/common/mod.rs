//! Shared utilities for integration testing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use stockroom::config::ServerConfig;
use stockroom::http::products;
use stockroom::lifecycle::Shutdown;
use stockroom::{HttpServer, Store};

/// A server running against a temp-dir store, reachable at `base_url`.
///
/// Dropping the harness closes the shutdown channel and stops the server.
pub struct TestServer {
    pub base_url: String,
    pub data_path: PathBuf,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server on an ephemeral port, backed by a store file in `dir`.
pub async fn start_server(dir: &Path) -> TestServer {
    let data_path = dir.join("db.json");

    let mut config = ServerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.storage.data_path = data_path.clone();

    let store = Arc::new(Store::open(&data_path).unwrap());
    let table = products::api_routes().unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, table, store);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        base_url: format!("http://{}", addr),
        data_path,
        shutdown,
    }
}
