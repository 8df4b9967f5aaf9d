use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bpool_admin::upstream::ApiClient;
use bpool_admin::{api, cli, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "bpool_admin=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    let port = match args.command {
        Some(cli::Commands::Serve { port }) => port.unwrap_or(cfg.port),
        None => cfg.port,
    };

    let state = Arc::new(AppState {
        bpool: ApiClient::new(&cfg.api_base_url),
        config: cfg,
    });
    let app = api::app(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        backend = %state.config.api_base_url,
        "BPOOL admin gateway listening on {}",
        addr
    );
    axum::serve(listener, app).await?;

    Ok(())
}
