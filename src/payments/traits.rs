//! Collaborator trait definitions
//!
//! The request builder reaches the outside world only through these seams.

use crate::error::PayflowResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Transport used for the secure token exchange
///
/// Implementations perform one POST and hand back the raw response body.
/// Retries and timeouts are the implementation's business; the builder
/// calls `post` exactly once per exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Post `body` to `url` and return the response body
    ///
    /// # Errors
    /// * `PayflowError::NetworkError` - connection, TLS or HTTP status failure
    async fn post(&self, url: &str, body: Vec<u8>) -> PayflowResult<Vec<u8>>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post(&self, url: &str, body: Vec<u8>) -> PayflowResult<Vec<u8>> {
        (**self).post(url, body).await
    }
}

/// Country code lookup used by the billing address mapping
pub trait CountryLookup: Send + Sync {
    /// Resolve a country name or code to an ISO 3166-1 alpha-2 code
    ///
    /// Returns `None` when nothing matches; callers keep the original value.
    fn lookup(&self, name_or_code: &str) -> Option<String>;
}
