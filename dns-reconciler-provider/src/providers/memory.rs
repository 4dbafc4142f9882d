//! In-memory provider
//!
//! Keeps zones and records in process memory. Used by the reconciler's tests
//! and for dry runs; supports failure injection and counts every call.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ProviderError, Result};
use crate::traits::DnsProvider;
use crate::types::{
    CreateRecordRequest, DnsRecordType, PaginatedResponse, PaginationParams, ProviderRecord,
    UpdateRecordRequest,
};

const PROVIDER: &str = "memory";

/// TTL assigned when a record is created with the "provider default" TTL of 0.
pub const DEFAULT_TTL: u32 = 3600;

/// Largest page served by [`InMemoryProvider::list_zones`].
const MAX_PAGE_SIZE: u32 = 1000;

/// Number of calls made against an [`InMemoryProvider`], per operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallStats {
    pub logins: usize,
    pub logouts: usize,
    pub zone_pages: usize,
    pub record_listings: usize,
    pub creates: usize,
    pub updates: usize,
    pub deletes: usize,
}

impl CallStats {
    /// Creates, updates and deletes combined.
    pub fn mutations(&self) -> usize {
        self.creates + self.updates + self.deletes
    }
}

#[derive(Default)]
struct MemoryState {
    zones: Vec<String>,
    records: HashMap<String, Vec<ProviderRecord>>,
    record_zone: HashMap<String, String>,
    next_id: u64,
    session_open: bool,
    failing_contents: HashSet<String>,
    fail_zone_listing: bool,
    stats: CallStats,
}

impl MemoryState {
    fn injected_failure(&self, content: &str) -> Result<()> {
        if self.failing_contents.contains(content) {
            return Err(ProviderError::Unknown {
                provider: PROVIDER.to_string(),
                raw_code: None,
                raw_message: format!("injected failure for content '{content}'"),
            });
        }
        Ok(())
    }

    fn zone_records_mut(&mut self, zone: &str) -> Result<&mut Vec<ProviderRecord>> {
        self.records
            .get_mut(zone)
            .ok_or_else(|| ProviderError::DomainNotFound {
                provider: PROVIDER.to_string(),
                domain: zone.to_string(),
                raw_message: None,
            })
    }

    fn record_mut(&mut self, record_id: &str) -> Result<&mut ProviderRecord> {
        let not_found = || ProviderError::RecordNotFound {
            provider: PROVIDER.to_string(),
            record_id: record_id.to_string(),
            raw_message: None,
        };
        let zone = self.record_zone.get(record_id).cloned().ok_or_else(not_found)?;
        self.zone_records_mut(&zone)?
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(not_found)
    }

    fn insert(
        &mut self,
        zone: &str,
        name: &str,
        record_type: DnsRecordType,
        content: &str,
        ttl: u32,
    ) -> Result<String> {
        let id = self.next_id.to_string();
        let record = ProviderRecord {
            id: id.clone(),
            name: name.to_string(),
            record_type,
            content: content.to_string(),
            ttl: if ttl == 0 { DEFAULT_TTL } else { ttl },
        };
        self.zone_records_mut(zone)?.push(record);
        self.next_id += 1;
        self.record_zone.insert(id.clone(), zone.to_string());
        Ok(id)
    }
}

/// DNS provider backed by process memory.
///
/// Record ids are sequential decimal strings starting at `"0"`.
#[derive(Default)]
pub struct InMemoryProvider {
    state: RwLock<MemoryState>,
}

impl InMemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone; registering an existing zone is a no-op.
    pub async fn add_zone(&self, zone: &str) {
        let mut state = self.state.write().await;
        if !state.records.contains_key(zone) {
            state.zones.push(zone.to_string());
            state.records.insert(zone.to_string(), Vec::new());
        }
    }

    /// Seed a record without touching the call statistics.
    pub async fn insert_record(
        &self,
        zone: &str,
        name: &str,
        record_type: DnsRecordType,
        content: &str,
        ttl: u32,
    ) -> Result<String> {
        self.state
            .write()
            .await
            .insert(zone, name, record_type, content, ttl)
    }

    /// Current records of a zone in insertion order (empty for unknown zones).
    pub async fn records(&self, zone: &str) -> Vec<ProviderRecord> {
        self.state
            .read()
            .await
            .records
            .get(zone)
            .cloned()
            .unwrap_or_default()
    }

    /// Make every create/update carrying `content` fail.
    pub async fn fail_on_content(&self, content: &str) {
        self.state
            .write()
            .await
            .failing_contents
            .insert(content.to_string());
    }

    /// Make zone listing fail (or succeed again).
    pub async fn fail_zone_listing(&self, fail: bool) {
        self.state.write().await.fail_zone_listing = fail;
    }

    pub async fn stats(&self) -> CallStats {
        self.state.read().await.stats.clone()
    }

    /// Whether a session is open (login without matching logout).
    pub async fn session_open(&self) -> bool {
        self.state.read().await.session_open
    }
}

#[async_trait]
impl DnsProvider for InMemoryProvider {
    fn id(&self) -> &'static str {
        PROVIDER
    }

    async fn login(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.stats.logins += 1;
        state.session_open = true;
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.stats.logouts += 1;
        state.session_open = false;
        Ok(())
    }

    async fn list_zones(&self, params: &PaginationParams) -> Result<PaginatedResponse<String>> {
        let mut state = self.state.write().await;
        state.stats.zone_pages += 1;
        if state.fail_zone_listing {
            return Err(ProviderError::NetworkError {
                provider: PROVIDER.to_string(),
                detail: "zone listing unavailable".to_string(),
            });
        }

        let params = params.validated(MAX_PAGE_SIZE);
        let start = (params.page as usize - 1) * params.page_size as usize;
        let items: Vec<String> = state
            .zones
            .iter()
            .skip(start)
            .take(params.page_size as usize)
            .cloned()
            .collect();
        let total = u32::try_from(state.zones.len()).unwrap_or(u32::MAX);
        Ok(PaginatedResponse::new(
            items,
            params.page,
            params.page_size,
            total,
        ))
    }

    async fn list_records(&self, zone: &str) -> Result<Vec<ProviderRecord>> {
        let mut state = self.state.write().await;
        state.stats.record_listings += 1;
        state.zone_records_mut(zone).map(|records| records.clone())
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<String> {
        let mut state = self.state.write().await;
        state.stats.creates += 1;
        state.injected_failure(&req.content)?;
        state.insert(&req.zone, &req.name, req.record_type, &req.content, req.ttl)
    }

    async fn update_record(&self, record_id: &str, req: &UpdateRecordRequest) -> Result<()> {
        let mut state = self.state.write().await;
        state.stats.updates += 1;
        state.injected_failure(&req.content)?;
        let record = state.record_mut(record_id)?;
        record.content.clone_from(&req.content);
        if req.ttl > 0 {
            record.ttl = req.ttl;
        }
        if let Some(name) = &req.name {
            record.name.clone_from(name);
        }
        Ok(())
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        state.stats.deletes += 1;
        let zone = state
            .record_zone
            .remove(record_id)
            .ok_or_else(|| ProviderError::RecordNotFound {
                provider: PROVIDER.to_string(),
                record_id: record_id.to_string(),
                raw_message: None,
            })?;
        state.zone_records_mut(&zone)?.retain(|r| r.id != record_id);
        Ok(())
    }
}
