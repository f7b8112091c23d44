//! Runs the taskboard REST API.
//!
//! Configuration comes from the environment (and `.env` when present); see
//! [`taskboard::config::ServerConfig`]. Start-up failures are logged and the
//! process exits with status 1.

use std::process::ExitCode;
use taskboard::{
    config::ServerConfig,
    server,
    telemetry::{DEFAULT_FILTER, init_tracing},
};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing(DEFAULT_FILTER);

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?config, "configuration loaded");

    match server::serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "taskboard API failed");
            ExitCode::FAILURE
        }
    }
}
