//! TeamRoster Server: member search over a team roster.
//!
//! Main entry point that loads configuration, selects the storage backend,
//! and starts the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt};

use teamroster_api::{AppState, build_app};
use teamroster_core::config::{AppConfig, StoreBackend};
use teamroster_core::error::AppError;
use teamroster_core::traits::ProjectionSource;
use teamroster_database::seed::seed_sample_data;
use teamroster_database::{DatabasePool, InMemoryStore, MemberRepository, TeamRepository};
use teamroster_entity::MemberTeamDto;
use teamroster_service::MemberSearchService;

/// TeamRoster: dynamic member search server
#[derive(Debug, Parser)]
#[command(name = "teamroster-server", version, about, long_about = None)]
struct Args {
    /// Directory holding `default.toml` and the environment overlays
    #[arg(long, env = "TEAMROSTER_CONFIG_DIR", default_value = "config")]
    config_dir: String,

    /// Environment overlay to load on top of the defaults
    #[arg(long, env = "TEAMROSTER_ENV", default_value = "development")]
    env: String,

    /// Override the configured storage backend
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Insert the sample teams and members at startup
    #[arg(long)]
    seed: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Postgres,
    Memory,
}

impl From<BackendArg> for StoreBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Postgres => Self::Postgres,
            BackendArg::Memory => Self::Memory,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match load_configuration(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration files and apply command-line overrides.
fn load_configuration(args: &Args) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load(&args.config_dir, &args.env)?;

    if let Some(backend) = args.backend {
        config.database.backend = backend.into();
    }
    if args.seed {
        config.seed.enabled = true;
    }

    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        backend = %config.database.backend,
        "Starting TeamRoster v{}",
        env!("CARGO_PKG_VERSION")
    );

    let (source, pool) = open_backend(&config).await?;

    let mut state = AppState::new(config.clone(), MemberSearchService::new(source));
    if let Some(pool) = &pool {
        state = state.with_database(pool.clone());
    }
    let app = build_app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("TeamRoster server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(pool) = pool {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        if tokio::time::timeout(grace, pool.close()).await.is_err() {
            tracing::warn!("Database pool did not close within the grace period");
        }
    }

    tracing::info!("TeamRoster server shut down gracefully");
    Ok(())
}

/// Open the configured storage backend, seeding it when enabled.
///
/// Returns the projection source for searches and, for PostgreSQL, the pool
/// to close on shutdown.
async fn open_backend(
    config: &AppConfig,
) -> Result<(Arc<dyn ProjectionSource<MemberTeamDto>>, Option<DatabasePool>), AppError> {
    match config.database.backend {
        StoreBackend::Memory => {
            let store = InMemoryStore::new();
            if config.seed.enabled {
                let inserted = seed_sample_data(&store.teams(), &store.members()).await?;
                tracing::info!(inserted, "Seeded in-memory store");
            }
            Ok((Arc::new(store.members()), None))
        }
        StoreBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = DatabasePool::connect(&config.database).await?;

            if config.database.run_migrations {
                teamroster_database::migration::run_migrations(&pool).await?;
            }

            let members = MemberRepository::new(pool.pool().clone());
            if config.seed.enabled {
                let teams = TeamRepository::new(pool.pool().clone());
                let inserted = seed_sample_data(&teams, &members).await?;
                tracing::info!(inserted, "Seeded database");
            }
            Ok((Arc::new(members), Some(pool)))
        }
    }
}

/// Resolves when Ctrl+C or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
