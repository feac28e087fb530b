use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use todograph::{Config, MemoryStore, Neo4jStore, TodoService, TodoStore, http};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "todograph")]
#[command(about = "A minimal task-list manager backed by a graph database")]
#[command(version)]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Directory holding the single-page UI
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// Run against an in-memory store instead of Neo4j (data is lost on exit)
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let store: Arc<dyn TodoStore> = if cli.memory {
        info!("using in-memory store");
        Arc::new(MemoryStore::new())
    } else {
        let config = Config::from_env()?;
        Arc::new(Neo4jStore::connect(&config).await?)
    };

    let service = TodoService::new(store);
    // Seeding failure degrades the service but does not abort it; creates
    // will report the missing category until the store recovers.
    if let Err(err) = service.init_categories().await {
        error!(error = %err, "category seeding failed");
    }

    let app = http::router(service, Some(&cli.static_dir));
    let listener = tokio::net::TcpListener::bind(cli.addr).await?;
    info!(addr = %cli.addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
