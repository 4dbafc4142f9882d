use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    CreateRecordRequest, PaginatedResponse, PaginationParams, ProviderRecord, UpdateRecordRequest,
};

/// Raw API error before mapping (internal).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code, format differs per provider.
    pub code: Option<String>,
    /// Original error message.
    pub message: String,
}

impl RawApiError {
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Extra context for error mapping (internal).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Record name, for `RecordExists`.
    pub record_name: Option<String>,
    /// Record id, for `RecordNotFound`.
    pub record_id: Option<String>,
    /// Zone, for `DomainNotFound` / `DomainLocked`.
    pub domain: Option<String>,
}

impl ErrorContext {
    pub fn domain(domain: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            ..Self::default()
        }
    }

    pub fn record(record_id: &str) -> Self {
        Self {
            record_id: Some(record_id.to_string()),
            ..Self::default()
        }
    }
}

/// Maps provider-specific API errors onto [`ProviderError`] (internal).
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier used in error messages.
    fn provider_name(&self) -> &'static str;

    /// Map a raw API error to the unified type.
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut for a parse failure.
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Fallback for unmapped codes.
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Capability set of a DNS hosting provider.
///
/// Record names crossing this boundary are always zone-relative with the apex
/// as `""`; translating to and from provider sentinels is the implementor's job.
/// Implementations handle authentication, transport, retries and wire
/// marshalling, nothing else.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Provider identifier.
    fn id(&self) -> &'static str;

    /// Open an authenticated session.
    async fn login(&self) -> Result<()>;

    /// Close the session opened by [`login`](Self::login).
    async fn logout(&self) -> Result<()>;

    /// List one page of the zones managed by the account.
    async fn list_zones(&self, params: &PaginationParams) -> Result<PaginatedResponse<String>>;

    /// List every record of a zone, in provider order.
    async fn list_records(&self, zone: &str) -> Result<Vec<ProviderRecord>>;

    /// Create a record and return its provider-assigned id.
    async fn create_record(&self, req: &CreateRecordRequest) -> Result<String>;

    /// Rewrite an existing record in place.
    async fn update_record(&self, record_id: &str, req: &UpdateRecordRequest) -> Result<()>;

    /// Delete a record.
    async fn delete_record(&self, record_id: &str) -> Result<()>;
}
