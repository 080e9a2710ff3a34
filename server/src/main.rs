use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wallcraft_server::config::{Cli, Config};
use wallcraft_server::routes;
use wallcraft_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_cli(Cli::parse());
    let state = Arc::new(AppState::from_config(&config).await?);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    tracing::info!(addr = %config.addr, "wallcraft server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
