use async_trait::async_trait;
use network::{HttpTransport, TransportRequest, TransportResponse};
use reqwest::{Client, Method, Url};
use tracing::{debug, trace};

use crate::{TransportConfig, TransportError};

/// [`HttpTransport`] backed by a [`reqwest::Client`].
///
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a transport from `config`.
    ///
    /// # Errors
    ///
    /// - [`TransportError::InvalidConfig`] for unusable default headers.
    /// - [`TransportError::Build`] if `reqwest` rejects the settings (for
    ///   example when no TLS backend can be initialised).
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().default_headers(config.header_map()?);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder.build().map_err(TransportError::Build)?;
        Ok(Self::with_client(client))
    }

    /// Wraps an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    type Error = TransportError;

    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = Url::parse(request.address().as_str()).map_err(|_| {
            TransportError::InvalidAddress {
                address: request.address().to_string(),
            }
        })?;
        let method = Method::from_bytes(request.method().as_bytes()).map_err(|_| {
            TransportError::InvalidMethod {
                method: request.method().to_owned(),
            }
        })?;

        debug!(%method, %url, "sending request");
        let mut builder = self.client.request(method, url);
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.into_body() {
            trace!(bytes = body.len(), "attaching body");
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(TransportError::Send)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(TransportError::Body)?;
        debug!(status, bytes = body.len(), "response received");

        Ok(TransportResponse::new(status, body.to_vec()))
    }
}
