//! Provider factory.

use std::sync::Arc;

#[cfg(feature = "inwx")]
use crate::error::ProviderError;
use crate::error::Result;
#[cfg(feature = "inwx")]
use crate::providers::InwxProvider;
use crate::traits::DnsProvider;
use crate::types::ProviderCredentials;

/// Creates a [`DnsProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`] variant.
/// Empty credential fields are rejected before any network traffic happens.
///
/// # Examples
///
/// ```rust,no_run
/// use dns_reconciler_provider::{create_provider, ProviderCredentials};
///
/// let provider = create_provider(ProviderCredentials::Inwx {
///     username: "user".to_string(),
///     password: "secret".to_string(),
///     sandbox: true,
/// }).unwrap();
/// ```
pub fn create_provider(credentials: ProviderCredentials) -> Result<Arc<dyn DnsProvider>> {
    match credentials {
        #[cfg(feature = "inwx")]
        ProviderCredentials::Inwx {
            username,
            password,
            sandbox,
        } => {
            for (field, value) in [("username", &username), ("password", &password)] {
                if value.trim().is_empty() {
                    return Err(ProviderError::InvalidParameter {
                        provider: "inwx".to_string(),
                        param: field.to_string(),
                        detail: "must not be empty".to_string(),
                    });
                }
            }
            let mut builder = InwxProvider::builder(username, password);
            if sandbox {
                builder = builder.sandbox();
            }
            Ok(Arc::new(builder.build()?))
        }
    }
}
