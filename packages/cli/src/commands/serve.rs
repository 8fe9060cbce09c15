use super::open_store;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pamphlet_editor::share_url;
use pamphlet_renderer::PageOptions;
use pamphlet_server::AppState;
use std::net::SocketAddr;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Origin passed to embedded videos
    #[arg(long, default_value = "")]
    pub origin: String,
}

pub async fn serve(args: ServeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", config.server.host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.server.host, port))?;

    println!("{}", "📰 Serving published pages".bright_blue().bold());
    println!("  store:  {}", config.get_store_path(cwd).display());
    println!("  shares: {}", share_url(&config.share_base_url, "<id>"));

    let state = AppState::new(
        open_store(&config, cwd),
        PageOptions {
            origin: args.origin,
            ..Default::default()
        },
    );
    pamphlet_server::serve(addr, state).await
}
