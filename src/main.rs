use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ats_nexus::{
    config::{self, Config, DotenvOutcome},
    routes,
    services::{chat_proxy::ChatProxy, completion::OpenAiClient},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = config::load_dotenv();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}=info,tower_http=info", env!("CARGO_CRATE_NAME")))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match dotenv {
        DotenvOutcome::Loaded(path) => info!("loaded environment from {}", path.display()),
        DotenvOutcome::Missing => {}
        DotenvOutcome::Failed(e) => warn!("ignoring unreadable .env file: {e}"),
    }

    let client = OpenAiClient::new(&config.base_url, config.request_timeout)
        .context("failed to build HTTP client")?;
    let proxy = ChatProxy::from_config(&config, Arc::new(client));
    if !proxy.is_configured() {
        warn!("OPENAI_API_KEY is not set; /api/chat will answer 500 until it is");
    }
    info!(model = %config.model, endpoint = %config.base_url, "completion client ready");

    let app = routes::build_app(Arc::new(AppState::new(proxy)));

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("ATS Nexus backend listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
