//! Readiness Config

use std::time::Duration;

use autovault::bootstrap::ReadyPolicy;
use clap::Args;

/// Store readiness probing settings.
#[derive(Debug, Args)]
pub struct ReadyConfig {
    /// Delay between readiness probes in milliseconds
    #[arg(long, env = "AUTOVAULT_READY_INTERVAL_MS", default_value_t = 100_u64)]
    pub ready_interval_ms: u64,

    /// Readiness probes before giving up
    #[arg(long, env = "AUTOVAULT_READY_ATTEMPTS", default_value_t = 50_u32)]
    pub ready_attempts: u32,
}

impl ReadyConfig {
    #[must_use]
    pub fn policy(&self) -> ReadyPolicy {
        ReadyPolicy {
            interval: Duration::from_millis(self.ready_interval_ms),
            max_attempts: self.ready_attempts,
        }
    }
}
