//! Solr Gateway: an HTTP front for full-text search on Apache Solr
//!
//! This is the main entry point for the application.

use anyhow::{bail, Result};
use solr_gateway::{
    config,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = match parse_args(std::env::args().skip(1))? {
        Command::Run { config } => config,
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Version => {
            println!("solr-gateway {}", solr_gateway::VERSION);
            return Ok(());
        }
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting solr-gateway v{}", solr_gateway::VERSION);

    // Load configuration
    let settings = config::load(config_path.as_deref())?;

    // Create application state
    let state = AppState::new(settings.clone())?;
    info!(
        "Forwarding searches to {} (field '{}')",
        settings.endpoint()?.url(),
        settings.search.field
    );

    // Create router
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

enum Command {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command> {
    let mut config = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-c" | "--config" => match args.next() {
                Some(path) => config = Some(PathBuf::from(path)),
                None => bail!("{} requires a file argument", arg),
            },
            other => bail!("unknown argument: {} (see --help)", other),
        }
    }
    Ok(Command::Run { config })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
solr-gateway v{}
An HTTP gateway for full-text search on Apache Solr

USAGE:
    solr-gateway [OPTIONS]

OPTIONS:
    -c, --config <FILE>    Path to configuration file
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    SOLR_GATEWAY_SETTINGS_PATH     Path to settings.yml
    SOLR_GATEWAY_PORT              Server port
    SOLR_GATEWAY_BIND_ADDRESS      Bind address
    SOLR_GATEWAY_SOLR_HOST         Solr base URL, e.g. http://localhost:8983/solr
    SOLR_GATEWAY_SOLR_CORE         Solr core name
    SOLR_GATEWAY_SEARCH_FIELD      Field used for matching and highlighting
    SOLR_GATEWAY_REQUEST_TIMEOUT   Solr request timeout in seconds
    RUST_LOG                       Log filter (default: info)
"#,
        solr_gateway::VERSION
    );
}
