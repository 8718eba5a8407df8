//! horizons-web - Healing Horizons web service
//!
//! Serves the breakup-recovery site: journaling, mood tracking, support
//! resources and AI-generated recovery plans with curated fallbacks.

use anyhow::{Context, Result};
use clap::Parser;
use horizons_common::config::{ensure_root_folder, AppConfig, CliOverrides};
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};

use horizons_web::{build_router, AppState};

/// Command-line arguments for horizons-web
#[derive(Parser, Debug)]
#[command(name = "horizons-web")]
#[command(about = "Healing Horizons breakup recovery web service")]
#[command(version)]
struct Args {
    /// TOML config file (default: platform config dir, when present)
    #[arg(short, long, env = "HORIZONS_CONFIG")]
    config: Option<PathBuf>,

    /// Folder holding recovery.db
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:5000
    #[arg(short, long)]
    bind: Option<String>,

    /// sqlx SQLite URL; overrides the root folder database
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    info!(
        "Starting Healing Horizons (horizons-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let cli = CliOverrides {
        config_file: args.config,
        root_folder: args.root_folder,
        bind: args.bind,
        database_url: args.database_url,
    };

    let config = AppConfig::load(&cli).context("Failed to load configuration")?;

    ensure_root_folder(&config.root_folder)
        .with_context(|| format!("Failed to create root folder {}", config.root_folder.display()))?;
    info!("Root folder: {}", config.root_folder.display());

    let db_pool = horizons_common::db::init_database(&config.database_url)
        .await
        .context("Failed to open database")?;
    info!("Database connection established");

    match &config.groq_api_key {
        Some(_) => info!(model = %config.groq_model, "AI plans enabled"),
        None => warn!("GROQ_API_KEY not set; plan generation is disabled"),
    }

    let bind = config.bind.clone();
    let state = AppState::new(db_pool, config).context("Failed to create AI client")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind to {}", bind))?;
    info!("Listening on http://{}", bind);
    info!("Health check: http://{}/health", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
