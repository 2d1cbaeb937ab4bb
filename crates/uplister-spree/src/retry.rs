//! Fixed-count retry with linear backoff for admin-console navigation.
//!
//! The admin console is a shared production system that occasionally serves
//! transient 5xx pages mid-run; a short linear backoff rides those out.
//! Validation responses (duplicate SKU, bad input) are never retried.

use std::future::Future;
use std::time::Duration;

use crate::error::UploadError;

/// Returns `true` if `err` represents a transient condition worth retrying.
///
/// Retriable: network-level failures and 5xx statuses. Everything else
/// (login rejection, 4xx, validation) would fail identically on retry.
fn is_retriable(err: &UploadError) -> bool {
    match err {
        UploadError::Http(_) => true,
        UploadError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        _ => false,
    }
}

/// Executes `operation` with up to `max_retries` additional attempts after
/// the first failure, waiting `backoff_base_ms × n` before the n-th retry
/// (linear schedule: base, 2×base, 3×base, …).
pub(crate) async fn retry_navigation<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, UploadError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, UploadError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = backoff_base_ms.saturating_mul(u64::from(attempt));
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient navigation error, retrying after backoff"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
