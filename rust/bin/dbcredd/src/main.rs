//! `dbcredd` — the role definition server.
//!
//! Usage:
//!   dbcredd -c <context-name-or-path> [--listen <addr>]
//!
//! The context name resolves to `/etc/dbcred/<name>.toml`.
//! If a path with `/` or `.` is given, it's used directly.

mod bootstrap;
mod config;
mod routes;

use clap::Parser;
use dbcred_core::Module;
use tracing::info;

use config::ServerConfig;

/// Database role definition server.
#[derive(Parser, Debug)]
#[command(name = "dbcredd", about = "Database role definition server", version)]
struct Cli {
    /// Context name or path to config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address.
    #[arg(long = "listen", default_value = "127.0.0.1:8200")]
    listen: String,
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
    bootstrap::verify_config(&server_config)?;

    let service_config = bootstrap::service_config(&server_config, &cli.listen);

    // Storage for role records, and the database templates are tested against.
    let kv = bootstrap::open_kv(server_config.storage.backend, &service_config)?;
    let db = bootstrap::open_db(&server_config)?;

    let postgresql_module = postgresql::PostgresqlModule::new(kv, db);
    info!("PostgreSQL role module initialized");

    let module_routes = vec![(postgresql_module.name(), postgresql_module.routes())];
    let app = routes::build_router(module_routes);

    let listener = tokio::net::TcpListener::bind(&service_config.listen).await?;
    info!("dbcredd listening on {}", service_config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
