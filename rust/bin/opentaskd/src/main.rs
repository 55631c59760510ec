//! `opentaskd` — the task management server binary.
//!
//! Usage:
//!   opentaskd -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/opentask/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod auth_middleware;
mod config;
mod routes;

use std::sync::Arc;

use clap::Parser;
use opentask_core::Module;
use opentask_doc::{DocStore, RetryPolicy, SqliteDocStore};
use taskman::TaskModule;
use tracing::info;

use auth_middleware::AuthState;
use config::ServerConfig;

/// Task management server.
#[derive(Parser, Debug)]
#[command(name = "opentaskd", about = "Task management server")]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address (overrides the configured value).
    #[arg(long = "listen")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let config_path = ServerConfig::resolve_path(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;
    server_config.validate()?;

    let listen = cli.listen.unwrap_or_else(|| server_config.listen.clone());

    // Open the document store, retrying while the database comes up.
    let store = SqliteDocStore::connect_with_retry(
        &server_config.connect_options(),
        &RetryPolicy::default(),
    )
    .await
    .map_err(|e| anyhow::anyhow!("failed to open document store: {}", e))?;
    let db: Arc<dyn DocStore> = Arc::new(store);

    // Initialize modules.
    let task_module = TaskModule::new(Arc::clone(&db)).await?;
    info!("Task module initialized");

    let module_routes = vec![(task_module.name(), task_module.routes())];

    // Build router.
    let auth = Arc::new(AuthState {
        secret: server_config.api.secret.clone(),
    });
    let app = routes::build_router(auth, module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&listen).await?;
    info!("opentaskd listening on {}", listen);
    axum::serve(listener, app).await?;

    Ok(())
}
