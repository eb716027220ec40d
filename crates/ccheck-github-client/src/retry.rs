//! Backoff for GitHub calls.
//!
//! A request is retried when it never produced a response (connection
//! refused, timeout) or when GitHub answered with a gateway error
//! (502, 503, 504), which its API returns under load. Every other status
//! goes back to the caller on the first attempt.

use std::time::Duration;

use reqwest::StatusCode;

/// Retries after the first attempt.
const MAX_RETRIES: u32 = 3;

/// First delay; doubled on each retry (200ms, 400ms, 800ms).
const BASE_DELAY_MS: u64 = 200;

fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(BASE_DELAY_MS * 2u64.pow(attempt))
}

fn is_transient(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
    )
}

/// Send the request built by `f`, retrying transport failures and gateway
/// errors up to [`MAX_RETRIES`] times.
///
/// The last response is returned as-is even when its status is transient,
/// so the caller reports GitHub's own error body.
pub(crate) async fn retry_send<F, Fut>(f: F) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        let result = f().await;
        if attempt == MAX_RETRIES {
            return result;
        }
        let reason = match &result {
            Ok(resp) if is_transient(resp.status()) => Some(resp.status().to_string()),
            Ok(_) => None,
            Err(e) => Some(e.to_string()),
        };
        let Some(reason) = reason else {
            return result;
        };

        let delay = backoff(attempt);
        attempt += 1;
        tracing::warn!(
            attempt,
            max_retries = MAX_RETRIES,
            "GitHub request failed ({reason}), retrying in {delay:?}"
        );
        tokio::time::sleep(delay).await;
    }
}
