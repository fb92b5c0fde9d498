//! # extcheck server
//!
//! Serves the extension blocklist API.
//!
//! Storage is PostgreSQL when `DATABASE_URL` is configured (migrations are
//! applied on startup) and an in-memory store otherwise.

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use extcheck_config::{Config, ConfigLoad, ConfigLoader};
use extcheck_server::{
    AppState, create_app,
    infra::startup::{connect_postgres, connect_store},
};
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "extcheck-server")]
#[command(about = "File extension blocklist service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to the TOML configuration file
    #[arg(long, global = true, env = "EXTCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Override via RUST_LOG.
                    "info,extcheck=debug,tower_http=warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_runtime_config(&cli.serve)?;

    if let Some(command) = cli.command {
        match command {
            Command::Db(DbCommand::Migrate) => {
                run_db_migrate(&config).await?;
                return Ok(());
            }
        }
    }

    run_server(config).await
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Arc<Config>> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_config_path(path);
    }
    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "configuration file loaded");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }

    info!(
        broadcast.capacity = config.broadcast.capacity,
        broadcast.client_queue = config.broadcast.client_queue,
        database.max_connections = config.database.max_connections,
        dev_mode = config.dev_mode,
        "configuration in effect"
    );

    Ok(Arc::new(config))
}

async fn run_db_migrate(config: &Config) -> anyhow::Result<()> {
    let url = config
        .database
        .url
        .as_deref()
        .context("DATABASE_URL is required for `db migrate`")?;
    let store = connect_postgres(url, config.database.max_connections).await?;
    store.migrate().await.context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

async fn run_server(config: Arc<Config>) -> anyhow::Result<()> {
    let store = connect_store(&config).await?;
    let state = AppState::new(Arc::clone(&config), store);
    let router = create_app(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Starting extcheck server (HTTP) on {addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, DbCommand};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn serve_flags_read_their_environment_variables() {
        let command = Cli::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .and_then(|name| name.to_str())
                .map(str::to_owned)
        };

        assert_eq!(env_of("config").as_deref(), Some("EXTCHECK_CONFIG"));
        assert_eq!(env_of("port").as_deref(), Some("SERVER_PORT"));
        assert_eq!(env_of("host").as_deref(), Some("SERVER_HOST"));
    }

    #[test]
    fn serve_flags_parse() {
        let cli = Cli::parse_from([
            "extcheck-server",
            "--config",
            "conf/extcheck.toml",
            "--port",
            "9000",
            "--host",
            "127.0.0.1",
        ]);
        assert!(cli.command.is_none());
        assert_eq!(
            cli.serve.config,
            Some(PathBuf::from("conf/extcheck.toml"))
        );
        assert_eq!(cli.serve.port, Some(9000));
        assert_eq!(cli.serve.host.as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn db_migrate_subcommand_parses() {
        let cli = Cli::parse_from([
            "extcheck-server",
            "db",
            "migrate",
            "--config",
            "x.toml",
        ]);
        assert!(matches!(cli.command, Some(Command::Db(DbCommand::Migrate))));
        assert_eq!(cli.serve.config, Some(PathBuf::from("x.toml")));
    }
}
