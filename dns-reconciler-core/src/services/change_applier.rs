//! Change application: converges provider records toward a batch of
//! desired changes.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use dns_reconciler_provider::{CreateRecordRequest, ProviderRecord, UpdateRecordRequest};

use crate::cancellation::CancellationFlag;
use crate::error::{ChangeAction, CoreError, CoreResult, EndpointFailure};
use crate::services::convergence::{plan, ConvergencePlan, Mutation, PlanInput};
use crate::services::record_matcher::{match_endpoint, records_at, relative_name};
use crate::services::{ReconcilerContext, ZoneSnapshot};
use crate::types::{ApplySummary, Changes, Endpoint};

/// One unit of work of a batch.
#[derive(Debug, Clone, Copy)]
enum Entry<'a> {
    Delete(&'a Endpoint),
    Update {
        old: &'a Endpoint,
        new: &'a Endpoint,
    },
    Create(&'a Endpoint),
}

impl<'a> Entry<'a> {
    /// Deletes first, then updates, then creates.
    fn ordered(changes: &'a Changes) -> Vec<Self> {
        changes
            .delete
            .iter()
            .map(Entry::Delete)
            .chain(
                changes
                    .update_old
                    .iter()
                    .zip(&changes.update_new)
                    .map(|(old, new)| Entry::Update { old, new }),
            )
            .chain(changes.create.iter().map(Entry::Create))
            .collect()
    }

    fn action(self) -> ChangeAction {
        match self {
            Self::Delete(_) => ChangeAction::Delete,
            Self::Update { .. } => ChangeAction::Update,
            Self::Create(_) => ChangeAction::Create,
        }
    }

    /// Endpoint reported on failure.
    fn endpoint(self) -> &'a Endpoint {
        match self {
            Self::Delete(endpoint) | Self::Create(endpoint) => endpoint,
            Self::Update { new, .. } => new,
        }
    }
}

/// Record group an entry converges: its zone, relative name and endpoint.
struct Target<'a> {
    zone: &'a str,
    relative: &'a str,
    endpoint: &'a Endpoint,
}

impl<'a> Target<'a> {
    fn new(zone: &'a str, endpoint: &'a Endpoint) -> CoreResult<Self> {
        let relative = relative_name(&endpoint.dns_name, zone).ok_or_else(|| {
            CoreError::ValidationError(format!(
                "{} is not part of zone {zone}",
                endpoint.dns_name
            ))
        })?;
        Ok(Self {
            zone,
            relative,
            endpoint,
        })
    }

    /// Plan for "make sure the endpoint's targets exist", never removing records.
    fn ensure_plan(&self, records: &[ProviderRecord]) -> ConvergencePlan {
        let settled: Vec<&ProviderRecord> =
            records_at(self.relative, self.endpoint.record_type, records).collect();
        let spare: Vec<&ProviderRecord> = settled
            .iter()
            .copied()
            .filter(|r| !self.endpoint.targets.contains(&r.content))
            .collect();
        plan(&PlanInput {
            targets: &self.endpoint.targets,
            ttl: self.endpoint.record_ttl,
            settled: &settled,
            reusable: &spare,
            prune: false,
            rename: None,
        })
    }
}

/// Applies change batches.
///
/// Entries run one after another. Every entry lists its zone afresh and holds
/// that zone's lock from listing to its last mutation, so batches running
/// concurrently never decide on the same stale record set.
pub struct ChangeApplier {
    ctx: Arc<ReconcilerContext>,
    zone_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ChangeApplier {
    #[must_use]
    pub fn new(ctx: Arc<ReconcilerContext>) -> Self {
        Self {
            ctx,
            zone_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Apply a batch, continuing past failing entries.
    ///
    /// Failed entries are reported together as [`CoreError::ApplyFailed`]
    /// once every other entry ran. A set `cancel` flag stops the batch before
    /// the next entry with [`CoreError::Cancelled`].
    ///
    /// `changes` must have passed [`Changes::validate`]; unpaired update
    /// entries are ignored here.
    pub async fn apply(
        &self,
        changes: &Changes,
        cancel: &CancellationFlag,
    ) -> CoreResult<ApplySummary> {
        let snapshot = self.ctx.zone_directory.snapshot().await?;
        let entries = Entry::ordered(changes);

        let mut summary = ApplySummary::default();
        let mut failures = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            if cancel.is_cancelled() {
                let pending = entries.len() - index;
                log::warn!("Change batch cancelled, {pending} entries not applied");
                return Err(CoreError::Cancelled { pending, failures });
            }

            if let Err(e) = self.apply_entry(&snapshot, *entry, &mut summary).await {
                let endpoint = entry.endpoint();
                if e.is_expected() {
                    log::warn!(
                        "Failed to {} {} {}: {e}",
                        entry.action(),
                        endpoint.dns_name,
                        endpoint.record_type
                    );
                } else {
                    log::error!(
                        "Failed to {} {} {}: {e}",
                        entry.action(),
                        endpoint.dns_name,
                        endpoint.record_type
                    );
                }
                failures.push(EndpointFailure {
                    action: entry.action(),
                    dns_name: endpoint.dns_name.clone(),
                    record_type: endpoint.record_type,
                    reason: e.to_string(),
                });
            }
        }

        if failures.is_empty() {
            Ok(summary)
        } else {
            Err(CoreError::ApplyFailed { failures })
        }
    }

    async fn apply_entry(
        &self,
        snapshot: &ZoneSnapshot,
        entry: Entry<'_>,
        summary: &mut ApplySummary,
    ) -> CoreResult<()> {
        let endpoint = entry.endpoint();
        let Some(zone) = self.ctx.scope(snapshot, endpoint) else {
            log::debug!(
                "Skipping {} {} {}: not in a managed zone",
                entry.action(),
                endpoint.dns_name,
                endpoint.record_type
            );
            summary.skipped += 1;
            return Ok(());
        };

        match entry {
            Entry::Delete(endpoint) => self.delete(&Target::new(zone, endpoint)?, summary).await,
            Entry::Create(endpoint) => self.ensure(&Target::new(zone, endpoint)?, summary).await,
            Entry::Update { old, new } => {
                let new_target = Target::new(zone, new)?;
                match self.ctx.scope(snapshot, old) {
                    Some(old_zone) if old_zone == zone && old.record_type == new.record_type => {
                        self.rewrite(&Target::new(zone, old)?, &new_target, summary)
                            .await
                    }
                    Some(old_zone) => {
                        // Cannot be rewritten in place
                        self.delete(&Target::new(old_zone, old)?, summary).await?;
                        self.ensure(&new_target, summary).await
                    }
                    None => self.ensure(&new_target, summary).await,
                }
            }
        }
    }

    async fn lock_zone(&self, zone: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.zone_locks.lock().await;
            Arc::clone(locks.entry(zone.to_string()).or_default())
        };
        lock.lock_owned().await
    }

    async fn delete(&self, target: &Target<'_>, summary: &mut ApplySummary) -> CoreResult<()> {
        let _zone_guard = self.lock_zone(target.zone).await;
        let records = self.ctx.provider.list_records(target.zone).await?;
        let ids = match_endpoint(target.zone, target.endpoint, &records)?;
        if ids.is_empty() {
            log::debug!(
                "Nothing to delete for {} {}",
                target.endpoint.dns_name,
                target.endpoint.record_type
            );
        }

        let plan = ConvergencePlan {
            mutations: ids
                .into_iter()
                .map(|record_id| Mutation::Delete { record_id })
                .collect(),
            unchanged: 0,
        };
        self.execute(target, plan, summary).await
    }

    async fn ensure(&self, target: &Target<'_>, summary: &mut ApplySummary) -> CoreResult<()> {
        let _zone_guard = self.lock_zone(target.zone).await;
        let records = self.ctx.provider.list_records(target.zone).await?;
        self.execute(target, target.ensure_plan(&records), summary)
            .await
    }

    /// Same-zone, same-type update: rewrite the records holding the old
    /// targets, or behave like a create when none exist anymore.
    async fn rewrite(
        &self,
        old: &Target<'_>,
        new: &Target<'_>,
        summary: &mut ApplySummary,
    ) -> CoreResult<()> {
        let _zone_guard = self.lock_zone(new.zone).await;
        let records = self.ctx.provider.list_records(new.zone).await?;
        let matched_ids = match_endpoint(old.zone, old.endpoint, &records)?;

        if matched_ids.is_empty() {
            log::debug!(
                "No record of {} {} left to update, creating {}",
                old.endpoint.dns_name,
                old.endpoint.record_type,
                new.endpoint.dns_name
            );
            return self
                .execute(new, new.ensure_plan(&records), summary)
                .await;
        }

        let matched: Vec<&ProviderRecord> = records
            .iter()
            .filter(|r| matched_ids.contains(&r.id))
            .collect();
        let settled: Vec<&ProviderRecord> =
            records_at(new.relative, new.endpoint.record_type, &records).collect();
        let plan = plan(&PlanInput {
            targets: &new.endpoint.targets,
            ttl: new.endpoint.record_ttl,
            settled: &settled,
            reusable: &matched,
            prune: true,
            rename: (old.relative != new.relative).then_some(new.relative),
        });
        self.execute(new, plan, summary).await
    }

    /// Send the planned mutations; the first failure aborts the entry.
    async fn execute(
        &self,
        target: &Target<'_>,
        plan: ConvergencePlan,
        summary: &mut ApplySummary,
    ) -> CoreResult<()> {
        let endpoint = target.endpoint;
        summary.unchanged += plan.unchanged;

        for mutation in plan.mutations {
            match mutation {
                Mutation::Create { content } => {
                    let record_id = self
                        .ctx
                        .provider
                        .create_record(&CreateRecordRequest {
                            zone: target.zone.to_string(),
                            name: target.relative.to_string(),
                            record_type: endpoint.record_type,
                            content: content.clone(),
                            ttl: endpoint.record_ttl,
                        })
                        .await?;
                    summary.created += 1;
                    log::info!(
                        "Created {} {} -> {content} (id {record_id})",
                        endpoint.record_type,
                        endpoint.dns_name
                    );
                }
                Mutation::Update {
                    record_id,
                    content,
                    rename,
                } => {
                    self.ctx
                        .provider
                        .update_record(
                            &record_id,
                            &UpdateRecordRequest {
                                record_type: endpoint.record_type,
                                content: content.clone(),
                                ttl: endpoint.record_ttl,
                                name: rename,
                            },
                        )
                        .await?;
                    summary.updated += 1;
                    log::info!(
                        "Updated {} {} -> {content} (id {record_id})",
                        endpoint.record_type,
                        endpoint.dns_name
                    );
                }
                Mutation::Delete { record_id } => {
                    self.ctx.provider.delete_record(&record_id).await?;
                    summary.deleted += 1;
                    log::info!(
                        "Deleted {} {} (id {record_id})",
                        endpoint.record_type,
                        endpoint.dns_name
                    );
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use dns_reconciler_provider::DnsRecordType;

    use super::*;
    use crate::test_utils::{contents, Fixture};

    fn a(name: &str, targets: &[&str]) -> Endpoint {
        Endpoint::new(name, DnsRecordType::A, targets.iter().copied())
    }

    fn creates(endpoints: Vec<Endpoint>) -> Changes {
        Changes {
            create: endpoints,
            ..Changes::default()
        }
    }

    #[tokio::test]
    async fn create_in_empty_zone() {
        let fx = Fixture::new(&["example.com"]).await;
        let summary = fx
            .apply(&creates(vec![a("foo.example.com", &["1.1.1.1", "1.1.1.2"])]))
            .await
            .unwrap();
        assert_eq!(summary.created, 2);
        assert_eq!(
            contents(&fx.provider.records("example.com").await),
            vec!["foo A 1.1.1.1", "foo A 1.1.1.2"]
        );
    }

    #[tokio::test]
    async fn create_is_idempotent() {
        let fx = Fixture::new(&["example.com"]).await;
        let batch = creates(vec![a("foo.example.com", &["1.1.1.1"])]);
        fx.apply(&batch).await.unwrap();
        let second = fx.apply(&batch).await.unwrap();

        assert_eq!(second.mutations(), 0);
        assert_eq!(second.unchanged, 1);
        assert_eq!(fx.provider.records("example.com").await.len(), 1);
    }

    #[tokio::test]
    async fn create_upserts_different_content() {
        let fx = Fixture::new(&["example.com"]).await;
        fx.apply(&creates(vec![a("foo.example.com", &["1.1.1.1"])]))
            .await
            .unwrap();
        let summary = fx
            .apply(&creates(vec![a("foo.example.com", &["2.2.2.2"])]))
            .await
            .unwrap();

        assert_eq!((summary.created, summary.updated), (0, 1));
        assert_eq!(
            contents(&fx.provider.records("example.com").await),
            vec!["foo A 2.2.2.2"]
        );
    }

    #[tokio::test]
    async fn create_never_rewrites_a_record_holding_a_target() {
        let fx = Fixture::new(&["example.com"]).await;
        fx.seed("example.com", "foo", DnsRecordType::A, "1.1.1.1", 300)
            .await;
        fx.seed("example.com", "foo", DnsRecordType::A, "1.1.1.1", 300)
            .await;

        let summary = fx
            .apply(&creates(vec![a("foo.example.com", &["1.1.1.1", "2.2.2.2"])]))
            .await
            .unwrap();

        assert_eq!((summary.created, summary.updated), (1, 0));
        assert_eq!(
            contents(&fx.provider.records("example.com").await),
            vec!["foo A 1.1.1.1", "foo A 1.1.1.1", "foo A 2.2.2.2"]
        );
    }

    #[tokio::test]
    async fn create_at_apex() {
        let fx = Fixture::new(&["example.com"]).await;
        fx.apply(&creates(vec![Endpoint::new(
            "example.com",
            DnsRecordType::Txt,
            ["v=spf1 -all"],
        )]))
        .await
        .unwrap();
        assert_eq!(
            contents(&fx.provider.records("example.com").await),
            vec![" TXT v=spf1 -all"]
        );
    }

    #[tokio::test]
    async fn create_with_new_ttl_updates_ttl_only() {
        let fx = Fixture::new(&["example.com"]).await;
        fx.seed("example.com", "foo", DnsRecordType::A, "1.1.1.1", 300)
            .await;
        let summary = fx
            .apply(&creates(vec![a("foo.example.com", &["1.1.1.1"]).with_ttl(60)]))
            .await
            .unwrap();
        assert_eq!(summary.updated, 1);
        assert_eq!(fx.provider.records("example.com").await[0].ttl, 60);
    }

    #[tokio::test]
    async fn zone_added_later_is_seen_after_cache_expiry() {
        let fx = Fixture::new(&["example.com"]).await;
        let batch = creates(vec![a("foo.example.org", &["1.1.1.1"])]);
        assert_eq!(fx.apply(&batch).await.unwrap().skipped, 1);

        fx.provider.add_zone("example.org").await;
        assert_eq!(fx.apply(&batch).await.unwrap().skipped, 1);

        fx.clock.advance(Duration::from_secs(300));
        assert_eq!(fx.apply(&batch).await.unwrap().created, 1);
    }

    #[tokio::test]
    async fn out_of_scope_entries_are_skipped() {
        let fx = Fixture::new(&["example.com"]).await;
        let summary = fx
            .apply(&creates(vec![a("foo.example.org", &["1.1.1.1"])]))
            .await
            .unwrap();
        assert_eq!(summary.skipped, 1);
        assert_eq!(fx.provider.stats().await.mutations(), 0);
    }

    #[tokio::test]
    async fn filtered_names_are_skipped_even_in_managed_zone() {
        let fx = Fixture::with_filter(&["example.com"], &["sub.example.com"]).await;
        let summary = fx
            .apply(&creates(vec![
                a("www.example.com", &["1.1.1.1"]),
                a("www.sub.example.com", &["1.1.1.2"]),
            ]))
            .await
            .unwrap();
        assert_eq!((summary.skipped, summary.created), (1, 1));
        assert_eq!(
            contents(&fx.provider.records("example.com").await),
            vec!["www.sub A 1.1.1.2"]
        );
    }

    #[tokio::test]
    async fn delete_removes_every_matching_record() {
        let fx = Fixture::new(&["example.com"]).await;
        fx.seed("example.com", "foo", DnsRecordType::A, "1.1.1.1", 300)
            .await;
        fx.seed("example.com", "foo", DnsRecordType::A, "1.1.1.2", 300)
            .await;
        fx.seed("example.com", "foo", DnsRecordType::A, "9.9.9.9", 300)
            .await;

        let summary = fx
            .apply(&Changes {
                delete: vec![a("foo.example.com", &["1.1.1.1", "1.1.1.2"])],
                ..Changes::default()
            })
            .await
            .unwrap();
        assert_eq!(summary.deleted, 2);
        assert_eq!(
            contents(&fx.provider.records("example.com").await),
            vec!["foo A 9.9.9.9"]
        );
    }

    #[tokio::test]
    async fn delete_of_absent_record_is_noop() {
        let fx = Fixture::new(&["example.com"]).await;
        let summary = fx
            .apply(&Changes {
                delete: vec![a("foo.example.com", &["1.1.1.1"])],
                ..Changes::default()
            })
            .await
            .unwrap();
        assert_eq!(summary.mutations(), 0);
    }

    #[tokio::test]
    async fn update_rewrites_in_place() {
        let fx = Fixture::new(&["example.com"]).await;
        let id = fx
            .seed("example.com", "foo", DnsRecordType::A, "1.1.1.1", 300)
            .await;

        let summary = fx
            .apply(&Changes {
                update_old: vec![a("foo.example.com", &["1.1.1.1"])],
                update_new: vec![a("foo.example.com", &["2.2.2.2"])],
                ..Changes::default()
            })
            .await
            .unwrap();

        assert_eq!(summary.updated, 1);
        let records = fx.provider.records("example.com").await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].content, "2.2.2.2");
    }

    #[tokio::test]
    async fn update_renames_within_zone() {
        let fx = Fixture::new(&["example.com"]).await;
        fx.seed("example.com", "old", DnsRecordType::A, "1.1.1.1", 300)
            .await;
        fx.apply(&Changes {
            update_old: vec![a("old.example.com", &["1.1.1.1"])],
            update_new: vec![a("new.example.com", &["1.1.1.1"])],
            ..Changes::default()
        })
        .await
        .unwrap();
        assert_eq!(
            contents(&fx.provider.records("example.com").await),
            vec!["new A 1.1.1.1"]
        );
    }

    #[tokio::test]
    async fn update_shrinking_targets_prunes_leftovers() {
        let fx = Fixture::new(&["example.com"]).await;
        fx.seed("example.com", "foo", DnsRecordType::A, "1.1.1.1", 300)
            .await;
        fx.seed("example.com", "foo", DnsRecordType::A, "1.1.1.2", 300)
            .await;

        let summary = fx
            .apply(&Changes {
                update_old: vec![a("foo.example.com", &["1.1.1.1", "1.1.1.2"])],
                update_new: vec![a("foo.example.com", &["1.1.1.2"])],
                ..Changes::default()
            })
            .await
            .unwrap();
        assert_eq!((summary.unchanged, summary.deleted), (1, 1));
        assert_eq!(
            contents(&fx.provider.records("example.com").await),
            vec!["foo A 1.1.1.2"]
        );
    }

    #[tokio::test]
    async fn update_falls_back_to_create() {
        let fx = Fixture::new(&["example.com"]).await;
        let summary = fx
            .apply(&Changes {
                update_old: vec![a("foo.example.com", &["1.1.1.1"])],
                update_new: vec![a("foo.example.com", &["2.2.2.2"])],
                ..Changes::default()
            })
            .await
            .unwrap();
        assert_eq!(summary.created, 1);
        assert_eq!(
            contents(&fx.provider.records("example.com").await),
            vec!["foo A 2.2.2.2"]
        );
    }

    #[tokio::test]
    async fn update_across_zones_moves_record() {
        let fx = Fixture::new(&["example.com", "example.org"]).await;
        fx.seed("example.com", "foo", DnsRecordType::A, "1.1.1.1", 300)
            .await;
        fx.apply(&Changes {
            update_old: vec![a("foo.example.com", &["1.1.1.1"])],
            update_new: vec![a("foo.example.org", &["1.1.1.1"])],
            ..Changes::default()
        })
        .await
        .unwrap();
        assert!(fx.provider.records("example.com").await.is_empty());
        assert_eq!(
            contents(&fx.provider.records("example.org").await),
            vec!["foo A 1.1.1.1"]
        );
    }

    #[tokio::test]
    async fn update_changing_type_replaces_record() {
        let fx = Fixture::new(&["example.com"]).await;
        fx.seed("example.com", "foo", DnsRecordType::A, "1.1.1.1", 300)
            .await;
        fx.apply(&Changes {
            update_old: vec![a("foo.example.com", &["1.1.1.1"])],
            update_new: vec![Endpoint::new(
                "foo.example.com",
                DnsRecordType::Cname,
                ["bar.example.com"],
            )],
            ..Changes::default()
        })
        .await
        .unwrap();
        assert_eq!(
            contents(&fx.provider.records("example.com").await),
            vec!["foo CNAME bar.example.com"]
        );
    }

    #[tokio::test]
    async fn update_to_unmanaged_name_is_skipped() {
        let fx = Fixture::new(&["example.com"]).await;
        fx.seed("example.com", "foo", DnsRecordType::A, "1.1.1.1", 300)
            .await;
        let summary = fx
            .apply(&Changes {
                update_old: vec![a("foo.example.com", &["1.1.1.1"])],
                update_new: vec![a("foo.example.net", &["1.1.1.1"])],
                ..Changes::default()
            })
            .await
            .unwrap();
        assert_eq!(summary.skipped, 1);
        assert_eq!(fx.provider.records("example.com").await.len(), 1);
    }

    #[tokio::test]
    async fn deletes_run_before_creates() {
        let fx = Fixture::new(&["example.com"]).await;
        fx.seed("example.com", "foo", DnsRecordType::A, "1.1.1.1", 300)
            .await;
        let summary = fx
            .apply(&Changes {
                create: vec![a("foo.example.com", &["2.2.2.2"])],
                delete: vec![a("foo.example.com", &["1.1.1.1"])],
                ..Changes::default()
            })
            .await
            .unwrap();
        assert_eq!((summary.deleted, summary.created, summary.updated), (1, 1, 0));
        assert_eq!(
            contents(&fx.provider.records("example.com").await),
            vec!["foo A 2.2.2.2"]
        );
    }

    #[tokio::test]
    async fn failures_are_collected_and_other_entries_continue() {
        let fx = Fixture::new(&["example.com"]).await;
        fx.provider.fail_on_content("6.6.6.6").await;

        let err = fx
            .apply(&creates(vec![
                a("bad.example.com", &["6.6.6.6"]),
                a("good.example.com", &["1.1.1.1"]),
            ]))
            .await
            .unwrap_err();

        assert!(
            matches!(err, CoreError::ApplyFailed { .. }),
            "unexpected error: {err:?}"
        );
        let CoreError::ApplyFailed { failures } = err else {
            return;
        };
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].dns_name, "bad.example.com");
        assert_eq!(failures[0].action, ChangeAction::Create);
        assert_eq!(
            contents(&fx.provider.records("example.com").await),
            vec!["good A 1.1.1.1"]
        );
    }

    #[tokio::test]
    async fn cancellation_stops_before_next_entry() {
        let fx = Fixture::new(&["example.com"]).await;
        let cancel = CancellationFlag::new();
        cancel.cancel();

        let err = fx
            .applier
            .apply(
                &creates(vec![a("foo.example.com", &["1.1.1.1"])]),
                &cancel,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Cancelled { pending: 1, .. }));
        assert!(fx.provider.records("example.com").await.is_empty());
    }

    #[tokio::test]
    async fn cold_zone_listing_failure_aborts_before_mutations() {
        let fx = Fixture::new(&["example.com"]).await;
        fx.provider.fail_zone_listing(true).await;
        let err = fx
            .apply(&creates(vec![a("foo.example.com", &["1.1.1.1"])]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Provider(_)));
        assert_eq!(fx.provider.stats().await.mutations(), 0);
    }

    #[tokio::test]
    async fn concurrent_batches_on_one_zone_do_not_duplicate() {
        let fx = Fixture::new(&["example.com"]).await;
        let batch = creates(vec![a("foo.example.com", &["1.1.1.1"])]);
        let (first, second) = tokio::join!(fx.apply(&batch), fx.apply(&batch));
        assert!(first.is_ok() && second.is_ok());
        assert_eq!(fx.provider.records("example.com").await.len(), 1);
    }
}
