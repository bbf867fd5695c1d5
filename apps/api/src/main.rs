use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_optimizer::config::{Config, OptimizerSettings};
use resume_optimizer::llm_client::{self, LlmClient};
use resume_optimizer::optimizer::Optimizer;
use resume_optimizer::routes::build_router;
use resume_optimizer::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_optimizer={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume optimizer API v{}", env!("CARGO_PKG_VERSION"));

    let mut optimizer = Optimizer::from_config(&config, OptimizerSettings::default());

    if config.external_rewrite_configured() {
        if let Some(key) = config.anthropic_api_key.clone() {
            let llm = LlmClient::new(key).context("Failed to build LLM HTTP client")?;
            optimizer = optimizer.with_external_rewriter(Arc::new(llm));
            info!(
                "External rewrite enabled (model: {}, timeout: {}s)",
                llm_client::MODEL,
                optimizer.timeout().as_secs()
            );
        }
    } else {
        warn!("External rewrite not configured; running rules-only");
    }

    if let Some(seed) = config.metric_seed {
        info!("Metric injection seeded with {seed}");
    }

    let state = AppState::new(optimizer, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
