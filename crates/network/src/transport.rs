//! The transport port.
//!
//! Connection management, TLS, redirects and timeouts all live behind this
//! trait. The `transport` crate provides the `reqwest`-backed implementation.

use async_trait::async_trait;

use crate::{TransportRequest, TransportResponse};

/// Sends one request and returns the raw response.
///
/// Implementations return every response the server produced, whatever its
/// status; classifying the status is the pipeline's job. `Err` is reserved
/// for failing to obtain a response at all.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// The transport's own fault type. It reaches the caller unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sends `request`.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, Self::Error>;
}

#[async_trait]
impl<T> HttpTransport for std::sync::Arc<T>
where
    T: HttpTransport + ?Sized,
{
    type Error = T::Error;

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, Self::Error> {
        (**self).send(request).await
    }
}
