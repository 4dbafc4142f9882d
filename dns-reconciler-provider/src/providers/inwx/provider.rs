//! INWX `DnsProvider` implementation

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::{
    full_name_to_relative, join_priority, parse_record_type, split_priority,
};
use crate::traits::{DnsProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{
    CreateRecordRequest, PaginatedResponse, PaginationParams, ProviderRecord, UpdateRecordRequest,
};
use crate::utils::log_sanitizer::mask_secret;

use super::types::{
    CreateRecordData, CreateRecordParams, DeleteRecordParams, InwxRecord, LoginParams,
    NameserverInfoData, NameserverInfoParams, NameserverListData, NameserverListParams,
    UpdateRecordParams,
};
use super::{InwxProvider, MAX_PAGE_SIZE};

/// Provider default is requested by leaving the TTL off the wire.
fn wire_ttl(ttl: u32) -> Option<u32> {
    (ttl > 0).then_some(ttl)
}

impl InwxProvider {
    /// Convert a listed record into the zone-relative form.
    ///
    /// Returns `None` for record types the reconciler does not manage (SOA, URL, ...).
    pub(crate) fn to_provider_record(&self, record: InwxRecord, zone: &str) -> Option<ProviderRecord> {
        let record_type = match parse_record_type(&record.record_type, self.provider_name()) {
            Ok(t) => t,
            Err(_) => {
                log::debug!(
                    "[inwx] skipping unmanaged {} record {} in {zone}",
                    record.record_type,
                    record.id
                );
                return None;
            }
        };

        Some(ProviderRecord {
            id: record.id,
            name: full_name_to_relative(&record.name, zone),
            record_type,
            content: join_priority(record_type, record.prio, &record.content),
            ttl: record.ttl,
        })
    }

    fn numeric_id(&self, record_id: &str) -> Result<u64> {
        record_id
            .parse::<u64>()
            .map_err(|_| ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "id".to_string(),
                detail: format!("INWX record ids are numeric, got '{record_id}'"),
            })
    }
}

#[async_trait]
impl DnsProvider for InwxProvider {
    fn id(&self) -> &'static str {
        "inwx"
    }

    async fn login(&self) -> Result<()> {
        log::debug!("[inwx] login as {}", mask_secret(&self.username));
        self.call_unit(
            "account.login",
            LoginParams {
                user: &self.username,
                pass: &self.password,
                lang: "en",
            },
            ErrorContext::default(),
        )
        .await
    }

    async fn logout(&self) -> Result<()> {
        self.call_unit(
            "account.logout",
            serde_json::json!({}),
            ErrorContext::default(),
        )
        .await
    }

    async fn list_zones(&self, params: &PaginationParams) -> Result<PaginatedResponse<String>> {
        let params = params.validated(MAX_PAGE_SIZE);
        let data: NameserverListData = self
            .call(
                "nameserver.list",
                NameserverListParams {
                    domain: "*",
                    page: params.page,
                    pagelimit: params.page_size,
                },
                ErrorContext::default(),
            )
            .await?;

        let zones = data.domains.into_iter().map(|d| d.domain).collect();
        Ok(PaginatedResponse::new(
            zones,
            params.page,
            params.page_size,
            data.count,
        ))
    }

    async fn list_records(&self, zone: &str) -> Result<Vec<ProviderRecord>> {
        let data: NameserverInfoData = self
            .call(
                "nameserver.info",
                NameserverInfoParams { domain: zone },
                ErrorContext::domain(zone),
            )
            .await?;

        Ok(data
            .records
            .into_iter()
            .filter_map(|r| self.to_provider_record(r, zone))
            .collect())
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<String> {
        let (prio, content) = split_priority(req.record_type, &req.content);
        let data: CreateRecordData = self
            .call(
                "nameserver.createRecord",
                CreateRecordParams {
                    domain: &req.zone,
                    record_type: req.record_type.as_str(),
                    content: &content,
                    name: &req.name,
                    ttl: wire_ttl(req.ttl),
                    prio,
                },
                ErrorContext {
                    record_name: Some(req.name.clone()),
                    domain: Some(req.zone.clone()),
                    ..ErrorContext::default()
                },
            )
            .await?;
        Ok(data.id)
    }

    async fn update_record(&self, record_id: &str, req: &UpdateRecordRequest) -> Result<()> {
        let id = self.numeric_id(record_id)?;
        let (prio, content) = split_priority(req.record_type, &req.content);
        self.call_unit(
            "nameserver.updateRecord",
            UpdateRecordParams {
                id,
                content: &content,
                name: req.name.as_deref(),
                ttl: wire_ttl(req.ttl),
                prio,
            },
            ErrorContext::record(record_id),
        )
        .await
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        let id = self.numeric_id(record_id)?;
        self.call_unit(
            "nameserver.deleteRecord",
            DeleteRecordParams { id },
            ErrorContext::record(record_id),
        )
        .await
    }
}
