//! Reconciler configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain_filter::DomainFilter;
use crate::error::{CoreError, CoreResult};

/// Comma separated list of managed domain suffixes.
pub const ENV_DOMAIN_FILTER: &str = "DNS_RECONCILER_DOMAIN_FILTER";
/// Zone list cache lifetime in seconds.
pub const ENV_ZONE_CACHE_TTL: &str = "DNS_RECONCILER_ZONE_CACHE_TTL";
/// Page size used when listing zones.
pub const ENV_ZONE_PAGE_SIZE: &str = "DNS_RECONCILER_ZONE_PAGE_SIZE";

const DEFAULT_ZONE_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_ZONE_PAGE_SIZE: u32 = 100;
const MAX_ZONE_PAGE_SIZE: u32 = 1000;

/// Settings of a [`DnsReconciler`](crate::DnsReconciler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReconcilerConfig {
    /// Managed domain suffixes; empty manages every zone of the account.
    pub domain_filter: DomainFilter,
    /// How long a fetched zone list stays fresh.
    pub zone_cache_ttl_secs: u64,
    /// Zones requested per listing page.
    pub zone_page_size: u32,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            domain_filter: DomainFilter::default(),
            zone_cache_ttl_secs: DEFAULT_ZONE_CACHE_TTL_SECS,
            zone_page_size: DEFAULT_ZONE_PAGE_SIZE,
        }
    }
}

impl ReconcilerConfig {
    /// Read the configuration from `DNS_RECONCILER_*` variables, falling back
    /// to defaults for unset ones.
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CoreResult<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_DOMAIN_FILTER) {
            config.domain_filter = DomainFilter::new(value.split(','));
        }
        if let Some(value) = lookup(ENV_ZONE_CACHE_TTL) {
            config.zone_cache_ttl_secs = value.trim().parse().map_err(|e| {
                CoreError::Config(format!("{ENV_ZONE_CACHE_TTL}: invalid value '{value}': {e}"))
            })?;
        }
        if let Some(value) = lookup(ENV_ZONE_PAGE_SIZE) {
            config.zone_page_size = value.trim().parse().map_err(|e| {
                CoreError::Config(format!("{ENV_ZONE_PAGE_SIZE}: invalid value '{value}': {e}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.zone_cache_ttl_secs == 0 {
            return Err(CoreError::Config(
                "zone cache TTL must be greater than zero".to_string(),
            ));
        }
        if !(1..=MAX_ZONE_PAGE_SIZE).contains(&self.zone_page_size) {
            return Err(CoreError::Config(format!(
                "zone page size must be between 1 and {MAX_ZONE_PAGE_SIZE}, got {}",
                self.zone_page_size
            )));
        }
        Ok(())
    }

    pub fn zone_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.zone_cache_ttl_secs)
    }
}
