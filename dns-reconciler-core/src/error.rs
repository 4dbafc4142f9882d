//! Unified error type definition

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use dns_reconciler_provider::DnsRecordType;

// Re-export library error type
pub use dns_reconciler_provider::ProviderError;

/// Kind of batch entry an [`EndpointFailure`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Create,
    Update,
    Delete,
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// One batch entry that could not be converged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointFailure {
    pub action: ChangeAction,
    pub dns_name: String,
    pub record_type: DnsRecordType,
    pub reason: String,
}

impl fmt::Display for EndpointFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}: {}",
            self.action, self.dns_name, self.record_type, self.reason
        )
    }
}

fn join_failures(failures: &[EndpointFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Some batch entries failed; the others were applied
    #[error("{} endpoint(s) failed to apply: {}", .failures.len(), join_failures(.failures))]
    ApplyFailed { failures: Vec<EndpointFailure> },

    /// The batch was cancelled between entries
    #[error("Cancelled with {pending} entries pending")]
    Cancelled {
        pending: usize,
        failures: Vec<EndpointFailure>,
    },

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, cancellation, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_) | Self::Config(_) | Self::Cancelled { .. } => true,
            Self::Provider(e) => e.is_expected(),
            Self::ApplyFailed { .. } => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
