//! Managed zone directory with a TTL cache

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};

use dns_reconciler_provider::{DnsProvider, PaginationParams};

use crate::clock::Clock;
use crate::domain_filter::DomainFilter;
use crate::error::CoreResult;

/// Most specific zone containing `name`, if any.
///
/// A zone contains a name equal to it or ending in `"." + zone`; a trailing
/// dot on `name` is ignored.
pub fn resolve_zone<'a, S: AsRef<str>>(zones: &'a [S], name: &str) -> Option<&'a str> {
    let name = name.trim_end_matches('.');
    zones
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|zone| {
            name == *zone
                || name
                    .strip_suffix(*zone)
                    .is_some_and(|rest| rest.ends_with('.'))
        })
        .max_by_key(|zone| zone.len())
}

/// Zone list as fetched at one point in time. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSnapshot {
    zones: Vec<String>,
    fetched_at: Instant,
}

impl ZoneSnapshot {
    pub fn zones(&self) -> &[String] {
        &self.zones
    }

    pub fn fetched_at(&self) -> Instant {
        self.fetched_at
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        resolve_zone(&self.zones, name)
    }
}

/// Answers which managed zone owns a name.
///
/// The zone list is fetched from the provider on first use and again once
/// it is older than the TTL. A refresh replaces the snapshot wholesale;
/// readers holding the previous `Arc` are unaffected.
pub struct ZoneDirectory {
    provider: Arc<dyn DnsProvider>,
    filter: DomainFilter,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    page_size: u32,
    snapshot: RwLock<Option<Arc<ZoneSnapshot>>>,
    refresh_lock: Mutex<()>,
}

impl ZoneDirectory {
    pub fn new(
        provider: Arc<dyn DnsProvider>,
        filter: DomainFilter,
        clock: Arc<dyn Clock>,
        ttl: Duration,
        page_size: u32,
    ) -> Self {
        Self {
            provider,
            filter,
            clock,
            ttl,
            page_size,
            snapshot: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    fn is_fresh(&self, snapshot: &ZoneSnapshot) -> bool {
        self.clock.now().saturating_duration_since(snapshot.fetched_at) < self.ttl
    }

    async fn fresh_cached(&self) -> Option<Arc<ZoneSnapshot>> {
        self.snapshot
            .read()
            .await
            .as_ref()
            .filter(|s| self.is_fresh(s))
            .cloned()
    }

    /// Current snapshot, refreshing it when missing or expired.
    ///
    /// A failed refresh is an error only when nothing was cached before;
    /// otherwise the stale snapshot keeps being served.
    pub async fn snapshot(&self) -> CoreResult<Arc<ZoneSnapshot>> {
        if let Some(snapshot) = self.fresh_cached().await {
            return Ok(snapshot);
        }

        let _refresh = self.refresh_lock.lock().await;
        // Another caller may have refreshed while we waited
        if let Some(snapshot) = self.fresh_cached().await {
            return Ok(snapshot);
        }

        match self.fetch().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                *self.snapshot.write().await = Some(Arc::clone(&snapshot));
                Ok(snapshot)
            }
            Err(e) => match self.snapshot.read().await.clone() {
                Some(stale) => {
                    log::warn!("Zone list refresh failed, serving stale zone list: {e}");
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }

    /// Most specific managed zone for `name`.
    pub async fn resolve(&self, name: &str) -> CoreResult<Option<String>> {
        Ok(self.snapshot().await?.resolve(name).map(str::to_string))
    }

    /// Drop the cached snapshot so the next call refetches.
    pub async fn invalidate(&self) {
        *self.snapshot.write().await = None;
    }

    async fn fetch(&self) -> CoreResult<ZoneSnapshot> {
        let mut params = PaginationParams::new(1, self.page_size);
        let mut fetched: Vec<String> = Vec::new();

        loop {
            let page = self.provider.list_zones(&params).await?;
            if page.items.is_empty() {
                break;
            }
            fetched.extend(page.items);
            if fetched.len() >= page.total_count as usize {
                break;
            }
            params.page += 1;
        }

        let total = fetched.len();
        let mut zones: Vec<String> = Vec::with_capacity(total);
        for zone in fetched {
            let zone = zone.trim_end_matches('.').to_string();
            if self.filter.matches_zone(&zone) && !zones.contains(&zone) {
                zones.push(zone);
            }
        }

        log::info!(
            "Fetched {total} zones in {} pages, {} managed",
            params.page,
            zones.len()
        );
        Ok(ZoneSnapshot {
            zones,
            fetched_at: self.clock.now(),
        })
    }
}
