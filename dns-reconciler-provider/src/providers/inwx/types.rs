//! INWX JSON-RPC payloads

use serde::{Deserialize, Deserializer, Serialize};

// ============ Envelope ============

/// JSON-RPC request body.
#[derive(Debug, Serialize)]
pub struct InwxRequest<'a, P> {
    pub method: &'a str,
    pub params: P,
}

/// JSON-RPC response envelope shared by every method.
#[derive(Debug, Deserialize)]
pub struct InwxResponse {
    pub code: u32,
    #[serde(default)]
    pub msg: String,
    #[serde(rename = "resData")]
    pub res_data: Option<serde_json::Value>,
    pub reason: Option<String>,
}

impl InwxResponse {
    /// 1xxx codes are successful completions (1000 ok, 1500 session ended, ...).
    pub fn is_success(&self) -> bool {
        (1000..2000).contains(&self.code)
    }

    /// Message to surface for a failed call, preferring the detailed reason.
    pub fn error_message(&self) -> String {
        match &self.reason {
            Some(reason) if !reason.is_empty() => format!("{}: {reason}", self.msg),
            _ => self.msg.clone(),
        }
    }
}

/// INWX ids arrive as JSON numbers; older endpoints send strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(u64),
        Text(String),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Number(n) => n.to_string(),
        Id::Text(s) => s,
    })
}

// ============ Params ============

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_apex(name: &&str) -> bool {
    name.is_empty()
}

#[derive(Debug, Serialize)]
pub struct LoginParams<'a> {
    pub user: &'a str,
    pub pass: &'a str,
    pub lang: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NameserverListParams<'a> {
    pub domain: &'a str,
    pub page: u32,
    pub pagelimit: u32,
}

#[derive(Debug, Serialize)]
pub struct NameserverInfoParams<'a> {
    pub domain: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreateRecordParams<'a> {
    pub domain: &'a str,
    #[serde(rename = "type")]
    pub record_type: &'a str,
    pub content: &'a str,
    #[serde(skip_serializing_if = "is_apex")]
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prio: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct UpdateRecordParams<'a> {
    pub id: u64,
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prio: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct DeleteRecordParams {
    pub id: u64,
}

// ============ Result data ============

/// `resData` of `nameserver.list`.
#[derive(Debug, Deserialize)]
pub struct NameserverListData {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub domains: Vec<InwxDomain>,
}

#[derive(Debug, Deserialize)]
pub struct InwxDomain {
    pub domain: String,
}

/// `resData` of `nameserver.info`.
#[derive(Debug, Deserialize)]
pub struct NameserverInfoData {
    #[serde(default, rename = "record")]
    pub records: Vec<InwxRecord>,
}

/// A record as listed by `nameserver.info`; `name` is fully qualified.
#[derive(Debug, Deserialize)]
pub struct InwxRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub content: String,
    #[serde(default)]
    pub ttl: u32,
    #[serde(default)]
    pub prio: Option<u32>,
}

/// `resData` of `nameserver.createRecord`.
#[derive(Debug, Deserialize)]
pub struct CreateRecordData {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}
