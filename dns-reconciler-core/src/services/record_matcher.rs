//! Matching desired endpoints to provider records

use dns_reconciler_provider::{DnsRecordType, ProviderRecord};

use crate::error::{CoreError, CoreResult};
use crate::types::Endpoint;

/// Name relative to `zone`: `Some("")` for the apex, `None` outside the zone.
///
/// Trailing dots on either side are ignored.
pub fn relative_name<'a>(name: &'a str, zone: &str) -> Option<&'a str> {
    let name = name.trim_end_matches('.');
    let zone = zone.trim_end_matches('.');
    if name == zone {
        return Some("");
    }
    name.strip_suffix(zone)?.strip_suffix('.')
}

/// Fully qualified form of a zone-relative name.
pub fn qualified_name(relative: &str, zone: &str) -> String {
    if relative.is_empty() {
        zone.to_string()
    } else {
        format!("{relative}.{zone}")
    }
}

/// Records stored under `relative` with type `record_type`, in listing order.
pub fn records_at<'a>(
    relative: &'a str,
    record_type: DnsRecordType,
    records: &'a [ProviderRecord],
) -> impl Iterator<Item = &'a ProviderRecord> + 'a {
    records
        .iter()
        .filter(move |r| r.name == relative && r.record_type == record_type)
}

/// Ids of the records under `relative`/`record_type` whose content is one of
/// `targets`.
///
/// Ids follow the listing order of `records`, not the order of `targets`.
/// Targets without a record are simply absent; a content held by several
/// records yields every one of them.
pub fn match_record_ids(
    relative: &str,
    record_type: DnsRecordType,
    targets: &[String],
    records: &[ProviderRecord],
) -> Vec<String> {
    records_at(relative, record_type, records)
        .filter(|r| targets.contains(&r.content))
        .map(|r| r.id.clone())
        .collect()
}

/// [`match_record_ids`] for an endpoint of `zone`.
pub fn match_endpoint(
    zone: &str,
    endpoint: &Endpoint,
    records: &[ProviderRecord],
) -> CoreResult<Vec<String>> {
    let relative = relative_name(&endpoint.dns_name, zone).ok_or_else(|| {
        CoreError::ValidationError(format!(
            "{} is not part of zone {zone}",
            endpoint.dns_name
        ))
    })?;
    Ok(match_record_ids(
        relative,
        endpoint.record_type,
        &endpoint.targets,
        records,
    ))
}
