//! rmexplorer server
//!
//! Serves the Rick and Morty Explorer pages, rendered server-side from the
//! public REST API.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use rmexplorer_client::{HttpClient, ReqwestTransport};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod pages;
mod router;
mod state;

use crate::config::Config;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "rmexplorer")]
#[command(about = "Browse Rick and Morty characters, episodes and locations", long_about = None)]
struct Args {
    /// Configuration file (defaults to the standard search paths)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind, overriding the configuration
    #[arg(short, long)]
    bind: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let (mut config, source) = match args.config {
        Some(path) => {
            let config = Config::load(&path)
                .wrap_err_with(|| format!("failed to load {}", path.display()))?;
            (config, Some(path))
        }
        None => Config::load_default()?,
    };
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    init_tracing(&config.server.log_level, args.json_logs);
    match source {
        Some(path) => info!(path = %path.display(), "loaded configuration"),
        None => warn!("no config file found, using defaults"),
    }

    let transport = ReqwestTransport::with_timeout(Duration::from_secs(config.api.timeout_secs))?;
    let client = HttpClient::with_transport(&config.api.base_url, Arc::new(transport))?;
    let state = AppState::new(client, &config)?;
    let app = router::create_router(Arc::new(state));

    info!(
        bind = %config.server.bind,
        public_url = %config.server.public_url,
        api = %config.api.base_url,
        "binding HTTP listener"
    );
    let listener = TcpListener::bind(&config.server.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server exited");
    Ok(())
}

/// `RUST_LOG` wins over the configured level
fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
