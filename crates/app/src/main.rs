//! Autovault interactive catalog

use std::{io, process};

use autovault_app::{
    config::AppConfig,
    context::{AppContext, AppInitError},
    observability::{self, ObservabilityError},
    session::{Session, SessionError},
    shutdown::{self, ShutdownSignalError},
    terminal::Terminal,
};
use thiserror::Error;
use tokio::{io::BufReader, runtime::Runtime};
use tracing::error;

#[derive(Debug, Error)]
enum RunError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error(transparent)]
    Observability(#[from] ObservabilityError),

    #[error(transparent)]
    Init(#[from] AppInitError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Signal(#[from] ShutdownSignalError),
}

pub fn main() {
    // Load configuration from .env and CLI arguments
    let config = AppConfig::load().unwrap_or_else(|error| error.exit());

    let result = Runtime::new()
        .map_err(RunError::Runtime)
        .and_then(|runtime| {
            let result = runtime.block_on(run(config));

            // A stdin read still pending after Ctrl+C must not hold the process open.
            runtime.shutdown_background();

            result
        });

    if let Err(run_error) = result {
        error!("{run_error}");

        #[expect(
            clippy::print_stderr,
            reason = "the error must reach the user even when logging is filtered out"
        )]
        {
            eprintln!("autovault: {run_error}");
        }

        process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), RunError> {
    observability::init(&config.logging)?;

    let context = AppContext::from_config(&config.store)?;
    let catalog = context.catalog(config.ready.policy()).await?;

    let terminal = Terminal::new(
        BufReader::new(tokio::io::stdin()),
        io::stdout(),
        config.assume_yes,
    );
    let mut session = Session::new(catalog, terminal);

    tokio::select! {
        result = session.run() => result?,
        result = shutdown::listen() => result?,
    }

    Ok(())
}
