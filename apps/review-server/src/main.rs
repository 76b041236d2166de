//! Scope-of-Work review server
//!
//! Exposes the rule-based reviewer over HTTP, with the language-model
//! advisory when an API key is configured. Requests are rate limited per
//! client IP since each review may spend model quota.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use llm_advisory::select_advisor;
use review_engine::{AdvisoryPolicy, ReviewConfig, ReviewEngine, Reviewer};
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;

use api::{handle_health, handle_normalize, handle_review, handle_review_pdf, handle_template};

/// Command-line arguments for the review server
#[derive(Parser, Debug)]
#[command(name = "review-server")]
#[command(about = "HTTP service for Scope-of-Work review")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Review configuration (TOML)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Enable the language-model advisory (needs an API key)
    #[arg(long)]
    llm: bool,

    /// API key for the language-model service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Largest accepted document text in bytes
    #[arg(long, default_value = "1000000")]
    max_text_bytes: usize,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "5")]
    rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub reviewer: Reviewer,
    pub max_text_bytes: usize,
}

/// Routes without the rate limiter, which needs peer addresses
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/template", get(handle_template))
        .route("/api/review", post(handle_review))
        .route("/api/review/pdf", post(handle_review_pdf))
        .route("/api/normalize", post(handle_normalize))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match &args.config {
        Some(path) => ReviewConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ReviewConfig::default(),
    };
    if args.llm {
        config.llm.enabled = true;
    }

    let engine = ReviewEngine::from_config(&config).context("Invalid review configuration")?;
    let advisor = select_advisor(&config.llm, args.api_key.as_deref());
    let live = advisor.is_live();
    let state = AppState {
        reviewer: Reviewer::new(Arc::new(engine), advisor)
            .with_policy(AdvisoryPolicy::from(&config.llm)),
        max_text_bytes: args.max_text_bytes,
    };

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.max(1).into())
            .burst_size(args.rate_limit.max(1) * 2)
            .finish()
            .context("Failed to create rate limiter config")?,
    );

    let app = app(state).layer(ServiceBuilder::new().layer(GovernorLayer {
        config: governor_conf,
    }));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("LLM advisory: {}", if live { "on" } else { "off" });

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
