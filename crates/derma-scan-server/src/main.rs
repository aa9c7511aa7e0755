//! DermaScan Server
//!
//! HTTP API for the screening frontend: account registration and login
//! with bearer tokens, and the advice endpoint backing the dashboard.

mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::state::{AdviceMode, AppState};

/// DermaScan Server
#[derive(Parser, Debug)]
#[command(name = "derma-scan-server")]
#[command(version)]
#[command(about = "Auth and advice HTTP service for derma-scan")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "5002")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Secret used to sign bearer tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// How /api/advice answers
    #[arg(long, value_enum, default_value = "tip")]
    advice_mode: AdviceMode,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("DermaScan Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Advice mode: {:?}", cli.advice_mode);

    let state = Arc::new(AppState::new(cli.jwt_secret, cli.advice_mode));

    let app = Router::new()
        // Health check
        .route("/health", get(routes::health::health_check))
        // Auth
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        // Advice
        .route("/api/advice", post(routes::advice::get_advice))
        .with_state(state)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
