//! Reconciliation services

mod change_applier;
mod convergence;
mod record_matcher;
mod record_reader;
mod zone_directory;

pub use change_applier::ChangeApplier;
pub use record_matcher::{
    match_endpoint, match_record_ids, qualified_name, records_at, relative_name,
};
pub use record_reader::{group_records, RecordReader};
pub use zone_directory::{resolve_zone, ZoneDirectory, ZoneSnapshot};

use std::sync::Arc;

use dns_reconciler_provider::DnsProvider;

use crate::domain_filter::DomainFilter;
use crate::types::Endpoint;

/// Service context - holds the dependencies shared by every service
pub struct ReconcilerContext {
    /// DNS host
    pub provider: Arc<dyn DnsProvider>,
    /// Managed zones
    pub zone_directory: ZoneDirectory,
    /// Names the reconciler may touch
    pub domain_filter: DomainFilter,
}

impl ReconcilerContext {
    #[must_use]
    pub fn new(
        provider: Arc<dyn DnsProvider>,
        zone_directory: ZoneDirectory,
        domain_filter: DomainFilter,
    ) -> Self {
        Self {
            provider,
            zone_directory,
            domain_filter,
        }
    }

    /// Zone owning the endpoint, or `None` when the endpoint is out of scope.
    pub fn scope<'s>(&self, snapshot: &'s ZoneSnapshot, endpoint: &Endpoint) -> Option<&'s str> {
        if !self.domain_filter.matches(&endpoint.dns_name) {
            return None;
        }
        snapshot.resolve(&endpoint.dns_name)
    }
}
