//! Application configuration

use clap::Parser;

use crate::config::{observability::LoggingConfig, ready::ReadyConfig, store::StoreConfig};

pub mod observability;
pub mod ready;
pub mod store;

pub use observability::LogFormat;
pub use store::StoreKind;

/// Autovault interactive session configuration
#[derive(Debug, Parser)]
#[command(name = "autovault", about = "Autovault vehicle catalog", long_about = None)]
pub struct AppConfig {
    /// Document store settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Store readiness settings.
    #[command(flatten)]
    pub ready: ReadyConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Remove vehicles without asking for confirmation
    #[arg(short = 'y', long, env = "AUTOVAULT_ASSUME_YES", default_value_t = false)]
    pub assume_yes: bool,
}

impl AppConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
