//! Helpers shared by provider implementations

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::types::DnsRecordType;

// ============ HTTP Client ============

/// Connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Request timeout (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build an HTTP client with timeouts and a cookie jar for session-based APIs.
pub fn create_http_client(provider: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .cookie_store(true)
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("failed to build HTTP client: {e}"),
        })
}

// ============ Record types ============

/// Parse a provider record type token.
pub fn parse_record_type(record_type: &str, provider: &str) -> Result<DnsRecordType> {
    match record_type.to_ascii_uppercase().as_str() {
        "A" => Ok(DnsRecordType::A),
        "AAAA" => Ok(DnsRecordType::Aaaa),
        "CNAME" => Ok(DnsRecordType::Cname),
        "MX" => Ok(DnsRecordType::Mx),
        "TXT" => Ok(DnsRecordType::Txt),
        "NS" => Ok(DnsRecordType::Ns),
        "SRV" => Ok(DnsRecordType::Srv),
        "CAA" => Ok(DnsRecordType::Caa),
        "PTR" => Ok(DnsRecordType::Ptr),
        _ => Err(ProviderError::UnsupportedRecordType {
            provider: provider.to_string(),
            record_type: record_type.to_string(),
        }),
    }
}

// ============ Priority folding ============

/// Split the leading priority off MX/SRV content (`"10 mx.example.com"`).
///
/// Other types, or content without a numeric first field, are returned as-is.
pub fn split_priority(record_type: DnsRecordType, content: &str) -> (Option<u32>, String) {
    if !record_type.has_priority() {
        return (None, content.to_string());
    }
    match content.trim().split_once(char::is_whitespace) {
        Some((prio, rest)) => match prio.parse::<u32>() {
            Ok(prio) => (Some(prio), rest.trim_start().to_string()),
            Err(_) => (None, content.to_string()),
        },
        None => (None, content.to_string()),
    }
}

/// Inverse of [`split_priority`].
pub fn join_priority(record_type: DnsRecordType, prio: Option<u32>, content: &str) -> String {
    match prio {
        Some(prio) if record_type.has_priority() => format!("{prio} {content}"),
        _ => content.to_string(),
    }
}

// ============ Names ============

/// Strip the trailing dot of a fully qualified name.
pub fn normalize_domain_name(name: &str) -> &str {
    name.trim_end_matches('.')
}

/// Fully qualified name to zone-relative name.
///
/// `"www.example.com"` + `"example.com"` -> `"www"`,
/// `"example.com"` + `"example.com"` -> `""`,
/// names outside the zone are returned unchanged.
pub fn full_name_to_relative(full_name: &str, zone_name: &str) -> String {
    let full = normalize_domain_name(full_name);
    let zone = normalize_domain_name(zone_name);

    if full == zone {
        String::new()
    } else if let Some(sub) = full
        .strip_suffix(zone)
        .and_then(|rest| rest.strip_suffix('.'))
    {
        sub.to_string()
    } else {
        full.to_string()
    }
}
