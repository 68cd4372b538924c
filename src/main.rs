//! Anesthesia Dashboard server
//!
//! Serves the single-page dashboard and its JSON API.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: 127.0.0.1:8050, built-in drug catalog
//! cargo run --release
//!
//! # Custom catalog and bind address
//! ./anesthesia-dashboard --config dashboard_config.toml --addr 0.0.0.0:8050
//! ```
//!
//! # Environment Variables
//!
//! - `ANESTHESIA_DASHBOARD_CONFIG`: Path to the TOML config file
//! - `ANESTHESIA_SERVER_ADDR`: Bind address when `--addr` is not given
//! - `ANESTHESIA_CORS_ORIGINS`: Comma-separated origins allowed cross-origin
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use anesthesia_dashboard::api::{create_app, DashboardState};
use anesthesia_dashboard::{DashboardConfig, RecommendationEngine};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "anesthesia-dashboard")]
#[command(about = "Anesthesia decision-support dashboard")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default: "127.0.0.1:8050")
    #[arg(short, long)]
    addr: Option<String>,

    /// Path to a TOML config file. A file given here must load; without
    /// it the standard search order applies and failures fall back to defaults.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<DashboardConfig> {
    match path {
        Some(p) => DashboardConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => Ok(DashboardConfig::load()),
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_format);

    let config = load_config(args.config.as_ref())?;
    let server_addr = config.server_addr(args.addr.as_deref());

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  Anesthesia Dashboard v{}", env!("CARGO_PKG_VERSION"));
    info!("  Illustrative output only, not clinical guidance");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!(
        drugs = config.catalog.len(),
        timeline_samples = config.engine.timeline_samples,
        require_patient_profile = config.engine.require_patient_profile,
        "Engine configured"
    );

    let state = DashboardState::new(RecommendationEngine::from_config(&config));
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&server_addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server to {server_addr}"))?;
    info!("Dashboard available at: http://{}", server_addr);

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
        })
        .await;

    match result {
        Ok(()) => {
            info!("Graceful shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!("Server error: {}", e);
            Err(anyhow::anyhow!("HTTP server error: {e}"))
        }
    }
}
