use serde::{Deserialize, Serialize};

// ============ Pagination ============

/// Pagination parameters for list operations.
///
/// Pages are 1-indexed. The default is `page = 1, page_size = 100`, which is
/// the largest page most registrar APIs accept for zone listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 100,
        }
    }
}

impl PaginationParams {
    /// Parameters for the given page with the given size.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Clamp pagination values to valid ranges.
    ///
    /// - `page` is clamped to `>= 1`
    /// - `page_size` is clamped to `1..=max_page_size`
    #[must_use]
    pub fn validated(&self, max_page_size: u32) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, max_page_size),
        }
    }
}

/// One page of a listing plus the provider-reported total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Current page number.
    pub page: u32,
    /// Page size used for this request.
    pub page_size: u32,
    /// Total number of items across all pages, as reported by the provider.
    pub total_count: u32,
    /// Whether there are more pages after this one.
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// Create a page, computing [`has_more`](Self::has_more) from the total.
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_count: u32) -> Self {
        let has_more = u64::from(page) * u64::from(page_size) < u64::from(total_count);
        Self {
            items,
            page,
            page_size,
            total_count,
            has_more,
        }
    }
}

// ============ Records ============

/// DNS record types the reconciler manages.
///
/// Serialized as upper-case tokens (`"A"`, `"AAAA"`, `"CNAME"`, ...), which is
/// also what [`Display`](std::fmt::Display) prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
    /// Reverse pointer record.
    Ptr,
}

impl DnsRecordType {
    /// Upper-case wire token for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
            Self::Ptr => "PTR",
        }
    }

    /// Whether providers store a separate priority field for this type.
    pub fn has_priority(self) -> bool {
        matches!(self, Self::Mx | Self::Srv)
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single record as stored by the DNS host.
///
/// `name` is relative to the zone the record was listed from; the apex is
/// the empty string, never a provider sentinel such as `"@"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    /// Provider-assigned, opaque record identifier.
    pub id: String,
    /// Zone-relative record name.
    pub name: String,
    /// Record type.
    pub record_type: DnsRecordType,
    /// Single record value.
    pub content: String,
    /// Time to live in seconds.
    pub ttl: u32,
}

/// Request to create a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    /// Zone to create the record in.
    pub zone: String,
    /// Zone-relative name (`""` for the apex).
    pub name: String,
    /// Record type.
    pub record_type: DnsRecordType,
    /// Record value.
    pub content: String,
    /// TTL in seconds, `0` for the provider default.
    pub ttl: u32,
}

/// Request to rewrite an existing record in place.
///
/// The record type never changes through an update; it is carried so
/// providers can re-split type-specific fields such as MX priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordRequest {
    /// Type of the record being updated.
    pub record_type: DnsRecordType,
    /// New record value.
    pub content: String,
    /// New TTL in seconds, `0` to leave the provider's choice untouched.
    pub ttl: u32,
    /// New zone-relative name; `None` keeps the current name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ============ Credentials ============

/// Credentials for the remote providers this crate can build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// INWX account login.
    #[cfg(feature = "inwx")]
    #[serde(rename = "inwx")]
    Inwx {
        /// Account user name.
        username: String,
        /// Account password.
        password: String,
        /// Use the OTE sandbox instead of production.
        #[serde(default)]
        sandbox: bool,
    },
}
