//! Retry with exponential backoff for fallible async operations.

use std::future::Future;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};

use crate::error::{Result, TicketKitError};

/// Number of attempts used by the session bootstrap.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Base delay used by the session bootstrap.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);

/// Runs `operation` up to `max_attempts` times with pure exponential
/// backoff: `initial_delay * 2^attempt`, no jitter.
///
/// Auth-fatal errors are re-raised immediately without further attempts;
/// retrying cannot make a rejected credential valid.
///
/// # Errors
///
/// Returns the first auth-fatal error encountered, or the last error once
/// attempts are exhausted.
pub async fn retry_with_backoff<T, Fut, Op>(
    operation: Op,
    max_attempts: usize,
    initial_delay: Duration,
) -> Result<T>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let backoff = ExponentialBuilder::default()
        .with_min_delay(initial_delay)
        .with_factor(2.0)
        .with_max_times(max_attempts.saturating_sub(1));

    operation
        .retry(backoff)
        .when(|err: &TicketKitError| !err.is_auth_fatal())
        .await
}
