//! INWX error code mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::InwxProvider;

/// INWX result codes follow the EPP numbering.
/// Reference: <https://www.inwx.com/en/help/apidoc/f/ch04.html>
impl ProviderErrorMapper for InwxProvider {
    fn provider_name(&self) -> &'static str {
        "inwx"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match raw.code.as_deref() {
            // Authentication error
            Some("2200") => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },

            // Authorization error
            Some("2201") => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },

            // Required parameter missing / value range / value syntax
            Some(code @ ("2003" | "2004" | "2005")) => ProviderError::InvalidParameter {
                provider,
                param: format!("code {code}"),
                detail: raw.message,
            },

            // Object exists
            Some("2302") => ProviderError::RecordExists {
                provider,
                record_name: context
                    .record_name
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // Object does not exist
            Some("2303") => match context.record_id {
                Some(record_id) => ProviderError::RecordNotFound {
                    provider,
                    record_id,
                    raw_message: Some(raw.message),
                },
                None => ProviderError::DomainNotFound {
                    provider,
                    domain: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                    raw_message: Some(raw.message),
                },
            },

            // Object status prohibits operation
            Some("2304") => ProviderError::DomainLocked {
                provider,
                domain: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // Session limit exceeded
            Some("2502") => ProviderError::RateLimited {
                provider,
                retry_after: None,
                raw_message: Some(raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}
