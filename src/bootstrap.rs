//! Store readiness.
//!
//! A controller should not start until its store answers. Readiness is a
//! single awaited future with a bounded number of probes at a fixed interval.

use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::store::{DocumentStore, StoreError};

/// How often, and how many times, to probe the store before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyPolicy {
    /// Delay between failed probes.
    pub interval: Duration,

    /// Probes to attempt before failing; zero is treated as one.
    pub max_attempts: u32,
}

impl Default for ReadyPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            max_attempts: 50,
        }
    }
}

/// Errors related to waiting for the store.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Every probe failed.
    #[error("document store not ready after {attempts} attempt(s)")]
    NotReady {
        /// Probes made.
        attempts: u32,

        /// Error from the final probe.
        #[source]
        last: StoreError,
    },
}

/// Probe `store` until it answers, returning the number of attempts used.
///
/// # Errors
///
/// Returns [`BootstrapError::NotReady`] with the last probe error once
/// `policy.max_attempts` probes have failed.
pub async fn wait_until_ready(
    store: &dyn DocumentStore,
    collection: &str,
    policy: ReadyPolicy,
) -> Result<u32, BootstrapError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match store.ping(collection).await {
            Ok(()) => {
                debug!("store answered probe {attempt}");

                return Ok(attempt);
            }
            Err(last) if attempt >= max_attempts => {
                return Err(BootstrapError::NotReady {
                    attempts: attempt,
                    last,
                });
            }
            Err(error) => {
                warn!("store not ready yet (attempt {attempt}/{max_attempts}): {error}");
            }
        }

        attempt += 1;

        sleep(policy.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::store::{MemoryStore, MockDocumentStore};

    use super::*;

    fn quick(max_attempts: u32) -> ReadyPolicy {
        ReadyPolicy {
            interval: Duration::from_millis(1),
            max_attempts,
        }
    }

    #[tokio::test]
    async fn ready_store_needs_one_probe() -> TestResult {
        let attempts = wait_until_ready(&MemoryStore::new(), "cars", quick(3)).await?;

        assert_eq!(attempts, 1);

        Ok(())
    }

    #[tokio::test]
    async fn retries_until_the_store_answers() -> TestResult {
        let mut store = MockDocumentStore::new();
        let mut probes = 0;

        store.expect_ping().times(3).returning(move |_| {
            probes += 1;

            if probes < 3 {
                Err(StoreError::Unavailable("starting".to_string()))
            } else {
                Ok(())
            }
        });

        let attempts = wait_until_ready(&store, "cars", quick(5)).await?;

        assert_eq!(attempts, 3);

        Ok(())
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let mut store = MockDocumentStore::new();

        store
            .expect_ping()
            .times(4)
            .returning(|_| Err(StoreError::Unavailable("down".to_string())));

        let result = wait_until_ready(&store, "cars", quick(4)).await;

        assert!(
            matches!(
                result,
                Err(BootstrapError::NotReady {
                    attempts: 4,
                    last: StoreError::Unavailable(_),
                })
            ),
            "expected NotReady after 4 attempts, got {result:?}"
        );
    }

    #[tokio::test]
    async fn zero_attempts_still_probes_once() {
        let mut store = MockDocumentStore::new();

        store
            .expect_ping()
            .once()
            .returning(|_| Err(StoreError::Unavailable("down".to_string())));

        let result = wait_until_ready(&store, "cars", quick(0)).await;

        assert!(
            matches!(result, Err(BootstrapError::NotReady { attempts: 1, .. })),
            "expected NotReady after 1 attempt, got {result:?}"
        );
    }
}
