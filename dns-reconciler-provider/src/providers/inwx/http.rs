//! INWX JSON-RPC transport

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::InwxProvider;
use super::types::{InwxRequest, InwxResponse};

/// Methods that must not be resent after a transport failure: the first
/// attempt may already have been applied.
const NON_IDEMPOTENT_METHODS: &[&str] = &["nameserver.createRecord"];

impl InwxProvider {
    /// Invoke a JSON-RPC method and return the raw envelope on success.
    async fn call_raw<P: Serialize>(
        &self,
        method: &str,
        params: P,
        ctx: ErrorContext,
    ) -> Result<InwxResponse> {
        let body = serde_json::to_string(&InwxRequest { method, params }).map_err(|e| {
            ProviderError::SerializationError {
                provider: self.provider_name().to_string(),
                detail: e.to_string(),
            }
        })?;

        let request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json; charset=utf-8")
            .body(body);

        let policy = if NON_IDEMPOTENT_METHODS.contains(&method) {
            self.retry.rate_limits_only()
        } else {
            self.retry
        };
        let (status, text) =
            HttpUtils::execute_with_retry(request, self.provider_name(), method, policy).await?;

        if !(200..300).contains(&status) {
            return Err(ProviderError::NetworkError {
                provider: self.provider_name().to_string(),
                detail: format!("{method}: unexpected HTTP {status}"),
            });
        }

        let response: InwxResponse = HttpUtils::parse_json(&text, self.provider_name())?;
        if !response.is_success() {
            log::debug!(
                "[{}] {method} failed with code {}: {}",
                self.provider_name(),
                response.code,
                response.error_message()
            );
            return Err(self.map_error(
                RawApiError::with_code(response.code.to_string(), response.error_message()),
                ctx,
            ));
        }
        Ok(response)
    }

    /// Invoke a method whose result data is irrelevant.
    pub(crate) async fn call_unit<P: Serialize>(
        &self,
        method: &str,
        params: P,
        ctx: ErrorContext,
    ) -> Result<()> {
        self.call_raw(method, params, ctx).await.map(|_| ())
    }

    /// Invoke a method and decode its `resData`.
    pub(crate) async fn call<T: DeserializeOwned, P: Serialize>(
        &self,
        method: &str,
        params: P,
        ctx: ErrorContext,
    ) -> Result<T> {
        let response = self.call_raw(method, params, ctx).await?;
        let data = response
            .res_data
            .ok_or_else(|| self.parse_error(format!("{method}: missing resData")))?;
        serde_json::from_value(data).map_err(|e| self.parse_error(format!("{method}: {e}")))
    }
}
