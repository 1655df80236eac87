//! Taskgate HTTP server.
//!
//! Reads configuration from the environment (and an optional `.env` file),
//! builds the configured task store, and serves the task API until SIGINT or
//! SIGTERM. See [`taskgate::config`] for the recognised variables; `RUST_LOG`
//! controls log filtering.

use std::process::ExitCode;
use std::sync::Arc;

use axum::Router;
use mockable::DefaultClock;
use taskgate::{
    config::{AppConfig, StorageMode},
    http::router,
    task::{
        adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
        ports::TaskRepositoryError,
        services::TaskLifecycleService,
    },
};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            init_tracing();
            tracing::error!(%error, "failed to read .env file");
            return ExitCode::FAILURE;
        }
    }
    init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "configuration error");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(storage_mode = ?config.storage_mode, "configuration loaded");

    let application = match build_application(&config).await {
        Ok(application) => application,
        Err(error) => {
            tracing::error!(%error, "failed to initialise task store");
            return ExitCode::FAILURE;
        }
    };

    let listener = match TcpListener::bind(config.listen_address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, address = %config.listen_address, "failed to bind");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(address = %config.listen_address, "taskgate listening");

    if let Err(error) = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("server shutdown complete");
    ExitCode::SUCCESS
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskgate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn build_application(config: &AppConfig) -> Result<Router, TaskRepositoryError> {
    let clock = Arc::new(DefaultClock);
    match (config.storage_mode, config.database_url.clone()) {
        (StorageMode::Postgres, Some(database_url)) => {
            let pool_size = config.database_pool_size;
            let repository = tokio::task::spawn_blocking(move || {
                PostgresTaskRepository::connect(&database_url, pool_size)
            })
            .await
            .map_err(TaskRepositoryError::persistence)??;
            Ok(router(TaskLifecycleService::new(Arc::new(repository), clock)))
        }
        (StorageMode::Postgres, None) | (StorageMode::InMemory, _) => {
            tracing::warn!("using in-memory storage, tasks are lost on restart");
            Ok(router(TaskLifecycleService::new(
                Arc::new(InMemoryTaskRepository::new()),
                clock,
            )))
        }
    }
}

/// Completes when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
