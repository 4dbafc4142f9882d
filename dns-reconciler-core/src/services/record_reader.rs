//! Reading the provider's records back as endpoints

use std::collections::HashMap;
use std::sync::Arc;

use dns_reconciler_provider::{DnsRecordType, ProviderRecord};

use crate::error::CoreResult;
use crate::services::record_matcher::qualified_name;
use crate::services::ReconcilerContext;
use crate::types::Endpoint;

/// Fold a zone's records into endpoints, one per name and type.
///
/// Groups appear in the order their first record was listed and keep the
/// listing order of their contents. The TTL is the first record's.
pub fn group_records(zone: &str, records: &[ProviderRecord]) -> Vec<Endpoint> {
    let mut endpoints: Vec<Endpoint> = Vec::new();
    let mut index: HashMap<(&str, DnsRecordType), usize> = HashMap::new();

    for record in records {
        let key = (record.name.as_str(), record.record_type);
        if let Some(&i) = index.get(&key) {
            endpoints[i].targets.push(record.content.clone());
        } else {
            index.insert(key, endpoints.len());
            endpoints.push(
                Endpoint::new(
                    qualified_name(&record.name, zone),
                    record.record_type,
                    [record.content.clone()],
                )
                .with_ttl(record.ttl),
            );
        }
    }
    endpoints
}

/// Lists the current state of every managed zone.
pub struct RecordReader {
    ctx: Arc<ReconcilerContext>,
}

impl RecordReader {
    #[must_use]
    pub fn new(ctx: Arc<ReconcilerContext>) -> Self {
        Self { ctx }
    }

    /// Every record of every managed zone as endpoints, minus names outside
    /// the domain filter. Zones are listed concurrently; any listing failure
    /// fails the read.
    pub async fn endpoints(&self) -> CoreResult<Vec<Endpoint>> {
        let snapshot = self.ctx.zone_directory.snapshot().await?;

        let listings = futures::future::join_all(snapshot.zones().iter().map(|zone| {
            let provider = Arc::clone(&self.ctx.provider);
            async move { (zone, provider.list_records(zone).await) }
        }))
        .await;

        let mut endpoints = Vec::new();
        for (zone, records) in listings {
            let records = records?;
            endpoints.extend(
                group_records(zone, &records)
                    .into_iter()
                    .filter(|e| self.ctx.domain_filter.matches(&e.dns_name)),
            );
        }

        log::debug!(
            "Read {} endpoints from {} zones",
            endpoints.len(),
            snapshot.zones().len()
        );
        Ok(endpoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::Fixture;

    fn record(id: &str, name: &str, record_type: DnsRecordType, content: &str, ttl: u32) -> ProviderRecord {
        ProviderRecord {
            id: id.to_string(),
            name: name.to_string(),
            record_type,
            content: content.to_string(),
            ttl,
        }
    }

    #[test]
    fn groups_by_name_and_type_in_first_seen_order() {
        let records = vec![
            record("1", "www", DnsRecordType::A, "1.1.1.1", 300),
            record("2", "", DnsRecordType::Txt, "hello", 600),
            record("3", "www", DnsRecordType::A, "1.1.1.2", 300),
            record("4", "www", DnsRecordType::Aaaa, "::1", 300),
        ];
        let endpoints = group_records("example.com", &records);

        assert_eq!(
            endpoints,
            vec![
                Endpoint::new("www.example.com", DnsRecordType::A, ["1.1.1.1", "1.1.1.2"])
                    .with_ttl(300),
                Endpoint::new("example.com", DnsRecordType::Txt, ["hello"]).with_ttl(600),
                Endpoint::new("www.example.com", DnsRecordType::Aaaa, ["::1"]).with_ttl(300),
            ]
        );
    }

    #[test]
    fn group_ttl_comes_from_first_record() {
        let records = vec![
            record("1", "www", DnsRecordType::A, "1.1.1.1", 300),
            record("2", "www", DnsRecordType::A, "1.1.1.2", 60),
        ];
        assert_eq!(group_records("example.com", &records)[0].record_ttl, 300);
    }

    #[tokio::test]
    async fn empty_provider_reads_nothing() {
        let fx = Fixture::new(&[]).await;
        assert!(fx.reader.endpoints().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reads_every_zone_and_applies_filter() {
        let fx = Fixture::with_filter(&["example.com", "example.org"], &["sub.example.com", "example.org"]).await;
        fx.seed("example.com", "www", DnsRecordType::A, "1.1.1.1", 300).await;
        fx.seed("example.com", "www.sub", DnsRecordType::A, "1.1.1.2", 300).await;
        fx.seed("example.org", "", DnsRecordType::Txt, "hi", 300).await;

        let endpoints = fx.reader.endpoints().await.unwrap();
        let names: Vec<&str> = endpoints.iter().map(|e| e.dns_name.as_str()).collect();
        assert_eq!(names, vec!["www.sub.example.com", "example.org"]);
    }
}
