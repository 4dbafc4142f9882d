//! INWX Provider (JSON-RPC `DomRobot` API)

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::http_client::RetryPolicy;
use crate::providers::common::create_http_client;

/// Production API endpoint.
pub const INWX_API_URL: &str = "https://api.domrobot.com/jsonrpc/";
/// OTE (sandbox) API endpoint.
pub const INWX_OTE_API_URL: &str = "https://api.ote.domrobot.com/jsonrpc/";
/// Largest `pagelimit` accepted by `nameserver.list`.
pub(crate) const MAX_PAGE_SIZE: u32 = 100;

/// INWX Provider
pub struct InwxProvider {
    pub(crate) client: Client,
    pub(crate) endpoint: String,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) retry: RetryPolicy,
}

/// INWX Provider Builder
pub struct InwxProviderBuilder {
    username: String,
    password: String,
    endpoint: String,
    max_retries: u32,
}

impl InwxProviderBuilder {
    fn new(username: String, password: String) -> Self {
        Self {
            username,
            password,
            endpoint: INWX_API_URL.to_string(),
            max_retries: 2,
        }
    }

    /// Talk to the OTE sandbox instead of production.
    #[must_use]
    pub fn sandbox(mut self) -> Self {
        self.endpoint = INWX_OTE_API_URL.to_string();
        self
    }

    /// Override the JSON-RPC endpoint URL.
    #[must_use]
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Retries for transient transport failures.
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn build(self) -> Result<InwxProvider> {
        Ok(InwxProvider {
            client: create_http_client("inwx")?,
            endpoint: self.endpoint,
            username: self.username,
            password: self.password,
            retry: RetryPolicy::with_retries(self.max_retries),
        })
    }
}

impl InwxProvider {
    pub fn new(username: String, password: String) -> Result<Self> {
        Self::builder(username, password).build()
    }

    pub fn builder(username: String, password: String) -> InwxProviderBuilder {
        InwxProviderBuilder::new(username, password)
    }
}
