//! # dns-reconciler-provider
//!
//! DNS host abstraction used by the reconciler: a narrow async trait over the
//! handful of calls a registrar API has to offer (session, zone listing,
//! record CRUD), a JSON-RPC client for INWX and an in-memory host for tests.
//!
//! ## Feature Flags
//!
//! - **`inwx`** *(default)*: INWX `DomRobot` JSON-RPC provider.
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation.
//!
//! The [`InMemoryProvider`] is always available.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_reconciler_provider::{
//!     create_provider, DnsProvider, PaginationParams, ProviderCredentials,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ProviderCredentials::Inwx {
//!         username: "user".to_string(),
//!         password: "secret".to_string(),
//!         sandbox: true,
//!     })?;
//!
//!     provider.login().await?;
//!     let zones = provider.list_zones(&PaginationParams::default()).await?;
//!     for zone in &zones.items {
//!         for record in provider.list_records(zone).await? {
//!             println!("{zone}: {} {} {}", record.name, record.record_type, record.content);
//!         }
//!     }
//!     provider.logout().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are retried
//! with exponential backoff inside the remote providers before surfacing.

mod error;
mod factory;
#[cfg(feature = "inwx")]
mod http_client;
mod providers;
mod traits;
mod types;
#[cfg(feature = "inwx")]
mod utils;

pub use error::{ProviderError, Result};

pub use factory::create_provider;

// Core trait only; the error-mapping traits stay internal
pub use traits::DnsProvider;

pub use types::{
    CreateRecordRequest, DnsRecordType, PaginatedResponse, PaginationParams, ProviderCredentials,
    ProviderRecord, UpdateRecordRequest,
};

#[cfg(feature = "inwx")]
pub use http_client::RetryPolicy;

pub use providers::{CallStats, DEFAULT_TTL, InMemoryProvider};

#[cfg(feature = "inwx")]
pub use providers::{INWX_API_URL, INWX_OTE_API_URL, InwxProvider, InwxProviderBuilder};
