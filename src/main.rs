use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;
use tracing::{error, info};

use showcase::config::{ConfigError, ServeArgs, Settings};
use showcase::telemetry::{self, TelemetryError};
use showcase::{mock_setups, rpc, InMemoryModelStore, SetupStore, StoreError};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to seed store: {0}")]
    Seed(#[from] StoreError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ (AppError::Config(_) | AppError::Telemetry(_))) => {
            eprintln!("showcase: {err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(error = %err, "application error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let settings = Settings::try_from(ServeArgs::parse())?;
    telemetry::init(&settings.logging)?;

    let store = SetupStore::new(InMemoryModelStore::new());
    if settings.seed {
        store.seed(mock_setups())?;
    }

    let service = Arc::new(rpc::setup_service(store));
    rpc::serve(service, &settings.addr.to_string(), shutdown_signal()).await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
