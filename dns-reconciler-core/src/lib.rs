//! DNS Reconciler Core Library
//!
//! Converges the records held by a DNS host toward a desired set of
//! endpoints:
//! - Zone Directory: which managed zone owns a name (cached zone list)
//! - Record Matcher: which provider records represent an endpoint
//! - Change Applier: idempotent create/update/delete with upsert and fallback
//! - Record Reader: the host's records folded back into endpoints
//!
//! The DNS host is reached through the
//! [`DnsProvider`](dns_reconciler_provider::DnsProvider) trait; this crate
//! never talks to the network itself.

pub mod cancellation;
pub mod clock;
pub mod config;
pub mod domain_filter;
pub mod error;
pub mod reconciler;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use cancellation::CancellationFlag;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ReconcilerConfig;
pub use domain_filter::DomainFilter;
pub use error::{ChangeAction, CoreError, CoreResult, EndpointFailure};
pub use reconciler::DnsReconciler;
pub use types::{ApplySummary, Changes, Endpoint};
