//! Runs the taskboard browser client.
//!
//! The client renders the task page and forwards form submissions to the
//! REST API at `TASKBOARD_API_URL`.

use std::process::ExitCode;
use taskboard::{
    client::serve_web,
    config::ClientConfig,
    telemetry::{DEFAULT_FILTER, init_tracing},
};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing(DEFAULT_FILTER);

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match serve_web(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "taskboard web client failed");
            ExitCode::FAILURE
        }
    }
}
