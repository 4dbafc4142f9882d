//! Test helpers
//!
//! An in-memory provider wired to the services with a manual clock.

use std::sync::Arc;
use std::time::Duration;

use dns_reconciler_provider::{DnsRecordType, InMemoryProvider, ProviderRecord};

use crate::cancellation::CancellationFlag;
use crate::clock::ManualClock;
use crate::domain_filter::DomainFilter;
use crate::error::CoreResult;
use crate::services::{ChangeApplier, RecordReader, ReconcilerContext, ZoneDirectory};
use crate::types::{ApplySummary, Changes};

pub struct Fixture {
    pub provider: Arc<InMemoryProvider>,
    pub clock: Arc<ManualClock>,
    pub applier: ChangeApplier,
    pub reader: RecordReader,
}

impl Fixture {
    pub async fn new(zones: &[&str]) -> Self {
        Self::with_filter(zones, &[]).await
    }

    pub async fn with_filter(zones: &[&str], filter: &[&str]) -> Self {
        let provider = Arc::new(InMemoryProvider::new());
        for zone in zones {
            provider.add_zone(zone).await;
        }
        let clock = Arc::new(ManualClock::new());
        let filter = DomainFilter::new(filter);
        let directory = ZoneDirectory::new(
            provider.clone(),
            filter.clone(),
            clock.clone(),
            Duration::from_secs(300),
            100,
        );
        let ctx = Arc::new(ReconcilerContext::new(provider.clone(), directory, filter));

        Self {
            provider,
            clock,
            applier: ChangeApplier::new(Arc::clone(&ctx)),
            reader: RecordReader::new(ctx),
        }
    }

    pub async fn seed(
        &self,
        zone: &str,
        name: &str,
        record_type: DnsRecordType,
        content: &str,
        ttl: u32,
    ) -> String {
        self.provider
            .insert_record(zone, name, record_type, content, ttl)
            .await
            .unwrap()
    }

    pub async fn apply(&self, changes: &Changes) -> CoreResult<ApplySummary> {
        self.applier.apply(changes, &CancellationFlag::new()).await
    }
}

/// `"name TYPE content"` per record, for compact assertions.
pub fn contents(records: &[ProviderRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| format!("{} {} {}", r.name, r.record_type, r.content))
        .collect()
}
