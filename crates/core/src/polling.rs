//! Bounded polling with a fixed interval.
//!
//! [`retry_until`] keeps re-running an async check until it succeeds or a
//! wait budget runs out, then hands back the last failure unchanged. The
//! acceptance harness uses it to wait for a page to reach an expected state.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Tunable parameters for [`retry_until`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Pause between a failed attempt and the next one.
    pub interval: Duration,
    /// Total time after which the last failure is returned.
    pub max_wait: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            max_wait: Duration::from_secs(10),
        }
    }
}

impl PollConfig {
    pub fn new(interval: Duration, max_wait: Duration) -> Self {
        Self { interval, max_wait }
    }
}

/// Run `attempt` until it returns `Ok`, sleeping `config.interval` between
/// failures.
///
/// Once `config.max_wait` has elapsed since the first attempt, the next
/// failure is returned as-is. The first attempt always runs, even with a
/// zero budget.
pub async fn retry_until<T, E, F, Fut>(config: &PollConfig, mut attempt: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let started = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if started.elapsed() >= config.max_wait {
                    tracing::debug!(attempts, error = %e, "Polling budget exhausted");
                    return Err(e);
                }
                tracing::trace!(attempts, error = %e, "Poll attempt failed, retrying");
            }
        }
        tokio::time::sleep(config.interval).await;
    }
}
