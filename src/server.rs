//! REST API process bootstrap.
//!
//! Start-up order: pool, schema, service, router, listener. Any failure
//! before the listener accepts connections is a [`ServerError`] and the
//! binary exits.

use crate::{
    config::ServerConfig,
    http::create_router,
    task::{
        adapters::postgres::{PostgresTaskRepository, build_pool},
        ports::TaskRepositoryError,
        services::TaskService,
    },
};
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

/// Fatal start-up and serving errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The connection pool could not be built.
    #[error("failed to connect to the database: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// The tasks table could not be created.
    #[error("failed to create the tasks table: {0}")]
    Schema(#[source] TaskRepositoryError),
    /// The listener could not bind or the server stopped abnormally.
    #[error("server I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Connects to storage, ensures the schema and serves until Ctrl-C.
///
/// # Errors
///
/// Returns [`ServerError`] when the database is unreachable, the schema
/// cannot be created, or the listener fails.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let pool = build_pool(
        &config.database.connection_string(),
        config.database.pool_size(),
    )?;
    let repository = PostgresTaskRepository::new(pool);
    repository
        .ensure_schema()
        .await
        .map_err(ServerError::Schema)?;
    tracing::info!("tasks table ready");

    let service = TaskService::new(Arc::new(repository), Arc::new(DefaultClock));
    let app = create_router(service, &config.allowed_origin);

    let bind_address = config.bind_address();
    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(
        address = %bind_address,
        origin = %config.allowed_origin,
        "taskboard API listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("taskboard API stopped");
    Ok(())
}

/// Resolves when Ctrl-C is received.
///
/// A failure to install the handler is logged and treated as an immediate
/// shutdown request.
pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}
