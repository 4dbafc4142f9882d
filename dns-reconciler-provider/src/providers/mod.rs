//! DNS Provider implementations

/// Shared utilities used by remote provider implementations.
#[cfg(feature = "inwx")]
pub mod common;

#[cfg(feature = "inwx")]
mod inwx;
mod memory;

#[cfg(feature = "inwx")]
pub use inwx::{INWX_API_URL, INWX_OTE_API_URL, InwxProvider, InwxProviderBuilder};
pub use memory::{CallStats, DEFAULT_TTL, InMemoryProvider};
