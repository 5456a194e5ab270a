//! Turning a descriptor into the request handed to the transport.

use crate::{HttpMethod, NetworkError, ResourceAddress, ResourceDescriptor};

const APPLICATION_JSON: &str = "application/json";

/// The resolved request handed to an [`crate::HttpTransport`].
///
/// Built once per call and owned by that call; the transport consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    address: ResourceAddress,
    method: &'static str,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl TransportRequest {
    /// The target address.
    pub fn address(&self) -> &ResourceAddress {
        &self.address
    }

    /// The method label (`"GET"`, `"POST"`).
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Header fields in the order they should be sent.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The request body, present only for methods that carry one.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Consumes the request, returning the body.
    pub fn into_body(self) -> Option<Vec<u8>> {
        self.body
    }
}

/// Builds [`TransportRequest`]s from descriptors.
///
/// Pure and deterministic: the same descriptor always yields the same request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBuilder;

impl RequestBuilder {
    /// Builds the transport request for `descriptor`.
    ///
    /// The body is exactly the descriptor's `POST` payload. The builder never
    /// synthesises one, and a `GET` never carries one.
    ///
    /// # Errors
    ///
    /// [`NetworkError::BadRequest`] if the descriptor has no address.
    pub fn build<R>(descriptor: &R) -> Result<TransportRequest, NetworkError>
    where
        R: ResourceDescriptor + ?Sized,
    {
        let address = descriptor.address().ok_or(NetworkError::BadRequest)?;
        let method = descriptor.method();

        let mut headers = vec![("Accept".to_owned(), APPLICATION_JSON.to_owned())];
        let body = match method {
            HttpMethod::Get => None,
            HttpMethod::Post { payload } => payload.clone(),
        };
        if body.is_some() {
            headers.push(("Content-Type".to_owned(), APPLICATION_JSON.to_owned()));
        }

        Ok(TransportRequest {
            address,
            method: method.name(),
            headers,
            body,
        })
    }
}
