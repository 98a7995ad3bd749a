use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use server_registry::storage::{MongoStore, ServerStore};
use server_registry::{build_router, AppState, Config};

#[derive(Parser)]
#[command(
    name = "server-registry",
    version,
    about = "Minimal HTTP API over a MongoDB-backed registry of server records"
)]
struct Cli {
    /// Address to serve the API on
    #[arg(long, env = "REGISTRY_BIND_ADDRESS", default_value = "0.0.0.0:8080")]
    bind_address: String,

    /// MongoDB URI to connect to
    #[arg(
        long,
        env = "REGISTRY_MONGO_URI",
        default_value = "mongodb://localhost:27017"
    )]
    mongo_uri: String,

    /// MongoDB database holding the server collection
    #[arg(long, env = "REGISTRY_MONGO_DB", default_value = "registry")]
    mongo_db: String,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            bind_address: self.bind_address,
            mongo_uri: self.mongo_uri,
            mongo_db: self.mongo_db,
        }
    }
}

#[tokio::main]
async fn main() {
    let config = Cli::parse().into_config();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run_server(config).await {
        error!("failed execution: {:#}", err);
        std::process::exit(1);
    }
}

async fn run_server(config: Config) -> Result<()> {
    info!(bind = %config.bind_address, db = %config.mongo_db, "starting server-registry");

    let store = Arc::new(
        MongoStore::connect(&config.mongo_uri, &config.mongo_db)
            .await
            .context("failed to connect to mongodb")?,
    );

    // Close the store on every exit path past this point.
    let result = serve(&config, store.clone()).await;
    if let Err(err) = store.close().await {
        error!("failed to close store: {}", err);
    }
    result
}

async fn serve(config: &Config, store: Arc<MongoStore>) -> Result<()> {
    let app = build_router(AppState { store });

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind address")?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
