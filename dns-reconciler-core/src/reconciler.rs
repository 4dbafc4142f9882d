//! Entry point for the orchestrating framework

use std::sync::Arc;

use tokio::sync::Mutex;

use dns_reconciler_provider::DnsProvider;

use crate::cancellation::CancellationFlag;
use crate::clock::{Clock, SystemClock};
use crate::config::ReconcilerConfig;
use crate::domain_filter::DomainFilter;
use crate::error::CoreResult;
use crate::services::{ChangeApplier, RecordReader, ReconcilerContext, ZoneDirectory};
use crate::types::{ApplySummary, Changes, Endpoint};

/// Reconciles desired endpoints against one provider account.
///
/// Every call runs inside a provider session, closed afterwards also when
/// the call itself failed. Overlapping calls share one session: the first
/// call in logs in and the last call out logs out. The zone list cache is
/// shared across calls.
pub struct DnsReconciler {
    ctx: Arc<ReconcilerContext>,
    applier: ChangeApplier,
    reader: RecordReader,
    /// Calls currently inside the session.
    sessions: Mutex<usize>,
}

impl DnsReconciler {
    pub fn new(provider: Arc<dyn DnsProvider>, config: &ReconcilerConfig) -> CoreResult<Self> {
        Self::with_clock(provider, config, Arc::new(SystemClock))
    }

    /// Like [`new`](Self::new) with an explicit time source for the zone cache.
    pub fn with_clock(
        provider: Arc<dyn DnsProvider>,
        config: &ReconcilerConfig,
        clock: Arc<dyn Clock>,
    ) -> CoreResult<Self> {
        config.validate()?;

        let zone_directory = ZoneDirectory::new(
            Arc::clone(&provider),
            config.domain_filter.clone(),
            clock,
            config.zone_cache_ttl(),
            config.zone_page_size,
        );
        let ctx = Arc::new(ReconcilerContext::new(
            provider,
            zone_directory,
            config.domain_filter.clone(),
        ));

        Ok(Self {
            applier: ChangeApplier::new(Arc::clone(&ctx)),
            reader: RecordReader::new(Arc::clone(&ctx)),
            ctx,
            sessions: Mutex::new(0),
        })
    }

    pub fn domain_filter(&self) -> &DomainFilter {
        &self.ctx.domain_filter
    }

    /// Zone cache; its methods expect an open provider session.
    pub fn zone_directory(&self) -> &ZoneDirectory {
        &self.ctx.zone_directory
    }

    /// Apply a change batch. See [`ChangeApplier::apply`].
    pub async fn apply_changes(&self, changes: &Changes) -> CoreResult<ApplySummary> {
        self.apply_changes_with_cancel(changes, &CancellationFlag::new())
            .await
    }

    pub async fn apply_changes_with_cancel(
        &self,
        changes: &Changes,
        cancel: &CancellationFlag,
    ) -> CoreResult<ApplySummary> {
        changes.validate()?;
        if changes.is_empty() {
            log::debug!("Empty change batch, nothing to apply");
            return Ok(ApplySummary::default());
        }

        self.enter_session().await?;
        let result = self.applier.apply(changes, cancel).await;
        self.leave_session().await;

        if let Ok(summary) = &result {
            log::info!(
                "Applied {} entries: {} created, {} updated, {} deleted, {} unchanged, {} skipped",
                changes.len(),
                summary.created,
                summary.updated,
                summary.deleted,
                summary.unchanged,
                summary.skipped
            );
        }
        result
    }

    /// Current records of every managed zone, as endpoints.
    pub async fn records(&self) -> CoreResult<Vec<Endpoint>> {
        self.enter_session().await?;
        let result = self.reader.endpoints().await;
        self.leave_session().await;
        result
    }

    /// Log in unless another call already holds the session open.
    async fn enter_session(&self) -> CoreResult<()> {
        let mut open = self.sessions.lock().await;
        if *open == 0 {
            self.ctx.provider.login().await.map_err(|e| {
                if e.is_expected() {
                    log::warn!("Provider login failed: {e}");
                } else {
                    log::error!("Provider login failed: {e}");
                }
                e
            })?;
        }
        *open += 1;
        Ok(())
    }

    /// Log out once the last call inside the session leaves it.
    async fn leave_session(&self) {
        let mut open = self.sessions.lock().await;
        *open = open.saturating_sub(1);
        if *open > 0 {
            return;
        }
        if let Err(e) = self.ctx.provider.logout().await {
            log::warn!("Provider logout failed: {e}");
        }
    }
}
