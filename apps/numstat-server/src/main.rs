//! numstat Server
//!
//! A small HTTP service computing descriptive statistics over a
//! comma-separated `nums` query parameter:
//!
//! - `GET /mean?nums=1,2,3`
//! - `GET /median?nums=1,2,3`
//! - `GET /mode?nums=1,2,3`
//! - `GET /all?nums=1,2,3`
//!
//! Successful responses are `{"response": {"operation": ..., ...}}`; every
//! failure, including unknown routes, is `{"error": {"message", "status"}}`.

use std::net::SocketAddr;

use axum::{routing::get, Router};
use clap::Parser;
use numstat_core::{MedianOrder, ParseMode};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;

use api::{handle_all, handle_health, handle_mean, handle_median, handle_mode, handle_not_found};

/// Command-line arguments for the numstat server
#[derive(Parser, Debug)]
#[command(name = "numstat-server")]
#[command(about = "HTTP service for mean, median and mode of number lists")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Sort order used before taking the median: "numeric" or "lexicographic"
    #[arg(long, env = "NUMSTAT_MEDIAN_ORDER", default_value = "numeric")]
    median_order: MedianOrder,

    /// Reject segments with trailing non-numeric text ("3abc")
    #[arg(long, env = "NUMSTAT_STRICT_NUMBERS")]
    strict_numbers: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Ordering applied before taking the median
    pub median_order: MedianOrder,
    /// How strictly `nums` segments are parsed
    pub parse_mode: ParseMode,
}

impl From<&Args> for AppState {
    fn from(args: &Args) -> Self {
        AppState {
            median_order: args.median_order,
            parse_mode: if args.strict_numbers {
                ParseMode::Strict
            } else {
                ParseMode::Lenient
            },
        }
    }
}

/// Build the full router. Unknown paths and non-GET methods on the statistic
/// routes all fall through to the 404 envelope.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handle_health).fallback(handle_not_found))
        // Statistics
        .route("/mean", get(handle_mean).fallback(handle_not_found))
        .route("/median", get(handle_median).fallback(handle_not_found))
        .route("/mode", get(handle_mode).fallback(handle_not_found))
        .route("/all", get(handle_all).fallback(handle_not_found))
        .fallback(handle_not_found)
        // Apply middleware
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::from(&args);
    let app = build_router(state.clone());

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server is listening on http://{}", addr);
    info!("Median order: {}", state.median_order);
    info!("Parse mode: {:?}", state.parse_mode);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
