//! Shared HTTP transport for remote providers
//!
//! Providers build their own `RequestBuilder` (URL, headers, body); this module
//! sends it, classifies transport failures and retries the transient ones.
//! Response decoding stays with each provider because envelopes differ.

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Upper bound honoured for a server-sent `Retry-After`.
const MAX_RETRY_AFTER_SECS: u64 = 30;

/// Retry behaviour for transient transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (0 disables retrying).
    pub max_retries: u32,
    /// Delay before the first retry; doubles on every further attempt.
    pub base_delay: Duration,
    /// Cap for the exponential delay.
    pub max_delay: Duration,
    /// Retry network errors and timeouts, not only rate limiting. Off for
    /// requests that may have been applied before the connection failed.
    pub retry_transport: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::with_retries(2)
    }
}

impl RetryPolicy {
    /// Default backoff (100ms doubling, 10s cap) with the given retry count.
    pub fn with_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            retry_transport: true,
        }
    }

    /// Same policy, retrying only rejected (rate limited) requests.
    #[must_use]
    pub fn rate_limits_only(self) -> Self {
        Self {
            retry_transport: false,
            ..self
        }
    }

    /// Whether `error` may be retried under this policy.
    pub fn should_retry(&self, error: &ProviderError) -> bool {
        match error {
            ProviderError::RateLimited { .. } => true,
            _ => self.retry_transport && error.is_transient(),
        }
    }

    /// How long to wait before retry number `attempt` (0-based) after `error`.
    pub fn delay_for(&self, error: &ProviderError, attempt: u32) -> Duration {
        if let ProviderError::RateLimited {
            retry_after: Some(secs),
            ..
        } = error
        {
            return Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS));
        }
        let factor = 1_u32.checked_shl(attempt.min(20)).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// HTTP helpers shared by remote providers.
pub struct HttpUtils;

impl HttpUtils {
    /// Send one request and return `(status, body)`.
    ///
    /// HTTP 429 becomes [`ProviderError::RateLimited`] and 502-504 become
    /// [`ProviderError::NetworkError`]; every other status is handed back to the
    /// caller, which knows how the provider reports API errors.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        action: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] -> {action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] {action}: rate limited, retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider_name.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] {action}: gateway error HTTP {status}");
            return Err(ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("HTTP {status}: {}", truncate_for_log(&body)),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] <- {action} HTTP {status}: {}",
            truncate_for_log(&body)
        );

        Ok((status, body))
    }

    /// Send a request, retrying transient failures according to `policy`.
    ///
    /// Requests whose body cannot be cloned are sent once.
    pub async fn execute_with_retry(
        request_builder: RequestBuilder,
        provider_name: &str,
        action: &str,
        policy: RetryPolicy,
    ) -> Result<(u16, String), ProviderError> {
        let mut attempt = 0;
        loop {
            let Some(request) = request_builder.try_clone() else {
                log::warn!("[{provider_name}] {action}: request not cloneable, sending once");
                return Self::execute_request(request_builder, provider_name, action).await;
            };

            match Self::execute_request(request, provider_name, action).await {
                Err(e) if attempt < policy.max_retries && policy.should_retry(&e) => {
                    let delay = policy.delay_for(&e, attempt);
                    log::warn!(
                        "[{provider_name}] {action} failed (attempt {}/{}), retrying in {:.1}s: {e}",
                        attempt + 1,
                        policy.max_retries + 1,
                        delay.as_secs_f32(),
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Decode a JSON body, logging the truncated raw text on failure.
    pub fn parse_json<T>(body: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(body).map_err(|e| {
            log::error!(
                "[{provider_name}] JSON parse failed: {e}; raw response: {}",
                truncate_for_log(body)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
