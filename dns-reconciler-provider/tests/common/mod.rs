//! Shared test helpers

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use dns_reconciler_provider::{
    DnsProvider, InwxProvider, PaginationParams, ProviderCredentials, create_provider,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Skip the test when any of the environment variables is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: environment variable {} not set", $var);
                return;
            }
        )+
    };
}

/// Assert that an `Option` is `Some` and unwrap it (failing the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert that a `Result` is `Ok` and unwrap it (failing the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Unique record name so parallel runs never collide.
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

// ============ Offline JSON-RPC mocks ============

/// Successful JSON-RPC envelope.
pub fn ok_envelope(res_data: Value) -> Value {
    json!({ "code": 1000, "msg": "Command completed successfully", "resData": res_data })
}

/// Failed JSON-RPC envelope.
pub fn error_envelope(code: u32, msg: &str) -> Value {
    json!({ "code": code, "msg": msg })
}

/// Answer every call of `rpc_method` with `body`.
pub async fn mock_rpc(server: &MockServer, rpc_method: &str, body: Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": rpc_method })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// INWX client pointed at the mock server, without retries.
pub fn inwx_against(server: &MockServer) -> InwxProvider {
    InwxProvider::builder("user".to_string(), "secret".to_string())
        .endpoint(server.uri())
        .max_retries(0)
        .build()
        .unwrap()
}

/// Bodies of every JSON-RPC call the server received, in order.
pub async fn received_calls(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter_map(|r| serde_json::from_slice(&r.body).ok())
        .collect()
}

// ============ Live context ============

/// Live provider plus the zone reserved for tests.
pub struct TestContext {
    pub provider: Arc<dyn DnsProvider>,
    pub zone: String,
}

impl TestContext {
    /// INWX context from `INWX_USERNAME`, `INWX_PASSWORD` and `TEST_DOMAIN`.
    ///
    /// Uses the OTE sandbox unless `INWX_PRODUCTION` is set.
    pub fn inwx() -> Option<Self> {
        let username = env::var("INWX_USERNAME").ok()?;
        let password = env::var("INWX_PASSWORD").ok()?;
        let zone = env::var("TEST_DOMAIN").ok()?;

        let credentials = ProviderCredentials::Inwx {
            username,
            password,
            sandbox: env::var("INWX_PRODUCTION").is_err(),
        };
        let provider = create_provider(credentials).ok()?;

        Some(Self { provider, zone })
    }

    /// Whether the account manages the test zone (scans every page).
    pub async fn zone_is_managed(&self) -> bool {
        let mut params = PaginationParams::default();
        loop {
            let Ok(page) = self.provider.list_zones(&params).await else {
                return false;
            };
            if page.items.iter().any(|z| z == &self.zone) {
                return true;
            }
            if !page.has_more || page.items.is_empty() {
                return false;
            }
            params.page += 1;
        }
    }

    /// Delete every record left behind by earlier runs.
    pub async fn cleanup_all_test_records(&self) {
        if let Ok(records) = self.provider.list_records(&self.zone).await {
            for record in records {
                if record.name.starts_with("_test-") {
                    let _ = self.provider.delete_record(&record.id).await;
                }
            }
        }
    }
}
