//! Desired-state types exchanged with the orchestrator

use serde::{Deserialize, Serialize};

use dns_reconciler_provider::DnsRecordType;

use crate::error::{CoreError, CoreResult};

/// Desired record group: one fully qualified name and type with its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Fully qualified name.
    pub dns_name: String,
    pub record_type: DnsRecordType,
    /// One value per provider record.
    #[serde(default)]
    pub targets: Vec<String>,
    /// TTL in seconds, 0 for the provider default.
    #[serde(default, rename = "recordTTL")]
    pub record_ttl: u32,
}

impl Endpoint {
    pub fn new(
        dns_name: impl Into<String>,
        record_type: DnsRecordType,
        targets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            dns_name: dns_name.into(),
            record_type,
            targets: targets.into_iter().map(Into::into).collect(),
            record_ttl: 0,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.record_ttl = ttl;
        self
    }
}

/// A batch of desired changes. `update_old[i]` is replaced by `update_new[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changes {
    #[serde(default, rename = "Create")]
    pub create: Vec<Endpoint>,
    #[serde(default, rename = "UpdateOld")]
    pub update_old: Vec<Endpoint>,
    #[serde(default, rename = "UpdateNew")]
    pub update_new: Vec<Endpoint>,
    #[serde(default, rename = "Delete")]
    pub delete: Vec<Endpoint>,
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        self.create.is_empty()
            && self.update_old.is_empty()
            && self.update_new.is_empty()
            && self.delete.is_empty()
    }

    /// Number of entries the batch will process (an update pair counts once).
    pub fn len(&self) -> usize {
        self.create.len() + self.update_new.len() + self.delete.len()
    }

    /// Reject structurally broken batches before anything is applied.
    pub fn validate(&self) -> CoreResult<()> {
        if self.update_old.len() != self.update_new.len() {
            return Err(CoreError::ValidationError(format!(
                "update batch is unpaired: {} old vs {} new endpoints",
                self.update_old.len(),
                self.update_new.len()
            )));
        }
        Ok(())
    }
}

/// What a successful batch did, counted per provider mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplySummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    /// Desired targets already present with the right TTL.
    pub unchanged: usize,
    /// Entries outside the managed zones or the domain filter.
    pub skipped: usize,
}

impl ApplySummary {
    pub fn mutations(&self) -> usize {
        self.created + self.updated + self.deleted
    }
}
