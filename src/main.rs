use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use stockroom::config::{load_config, ServerConfig};
use stockroom::http::products;
use stockroom::lifecycle::Shutdown;
use stockroom::observability::logging;
use stockroom::{HttpServer, Store};

#[derive(Parser, Debug)]
#[command(name = "stockroom", version, about = "Flat-file products API server")]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the store data file path.
    #[arg(long)]
    data: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging("stockroom=debug,tower_http=debug");

    tracing::info!("stockroom v{} starting", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(data) = args.data {
        config.storage.data_path = data;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        data_path = %config.storage.data_path.display(),
        request_timeout_secs = config.timeouts.request_secs,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    // The store loads (or fail-safes to empty) before any request is accepted.
    let store = Arc::new(Store::open(&config.storage.data_path)?);
    let table = products::api_routes()?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, table, store);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
