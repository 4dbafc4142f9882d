//! Shared test helpers

#![allow(dead_code)]

use std::sync::Arc;

use dns_reconciler_core::{DnsReconciler, DomainFilter, Endpoint, ManualClock, ReconcilerConfig};
use dns_reconciler_provider::{DnsRecordType, InMemoryProvider, ProviderRecord};

/// Assert that a `Result` is `Ok` and unwrap it (failing the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Reconciler over an in-memory provider holding `zones`.
pub struct TestContext {
    pub provider: Arc<InMemoryProvider>,
    pub clock: Arc<ManualClock>,
    pub reconciler: DnsReconciler,
}

impl TestContext {
    pub async fn new(zones: &[&str]) -> Self {
        Self::with_filter(zones, &[]).await
    }

    pub async fn with_filter(zones: &[&str], filter: &[&str]) -> Self {
        let provider = Arc::new(InMemoryProvider::new());
        for zone in zones {
            provider.add_zone(zone).await;
        }
        let clock = Arc::new(ManualClock::new());
        let config = ReconcilerConfig {
            domain_filter: DomainFilter::new(filter),
            ..ReconcilerConfig::default()
        };
        let reconciler = DnsReconciler::with_clock(provider.clone(), &config, clock.clone())
            .unwrap_or_else(|e| panic!("invalid test config: {e}"));

        Self {
            provider,
            clock,
            reconciler,
        }
    }

    pub async fn records(&self, zone: &str) -> Vec<ProviderRecord> {
        self.provider.records(zone).await
    }
}

pub fn a(name: &str, targets: &[&str]) -> Endpoint {
    Endpoint::new(name, DnsRecordType::A, targets.iter().copied())
}

pub fn txt(name: &str, targets: &[&str]) -> Endpoint {
    Endpoint::new(name, DnsRecordType::Txt, targets.iter().copied())
}

/// `(name, type, content, ttl)` per record, ids left out.
pub fn shape(records: &[ProviderRecord]) -> Vec<(String, DnsRecordType, String, u32)> {
    records
        .iter()
        .map(|r| (r.name.clone(), r.record_type, r.content.clone(), r.ttl))
        .collect()
}
