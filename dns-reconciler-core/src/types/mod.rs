//! Type definitions

mod endpoint;

pub use endpoint::{ApplySummary, Changes, Endpoint};

// Re-export public types from the provider library
pub use dns_reconciler_provider::{DnsRecordType, ProviderRecord};
