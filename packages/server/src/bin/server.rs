use anyhow::Context;
use clap::Parser;
use pamphlet_renderer::PageOptions;
use pamphlet_server::{serve, AppState};
use pamphlet_storage::JsonFileStore;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pamphlet-server")]
#[command(about = "Serve published pamphlet pages", long_about = None)]
struct Args {
    /// Project store file
    #[arg(long, default_value = ".pamphlet/projects.json")]
    store: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3030)]
    port: u16,

    /// Origin passed to embedded videos
    #[arg(long, default_value = "")]
    origin: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", args.host, args.port))?;

    tracing::info!("Project store: {}", args.store.display());

    let state = AppState::new(
        Arc::new(JsonFileStore::new(args.store)),
        PageOptions {
            origin: args.origin,
            ..Default::default()
        },
    );

    serve(addr, state).await
}
