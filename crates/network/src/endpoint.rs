//! A concrete descriptor resolved from scheme, host, path and query items.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{HttpMethod, NetworkError, ResourceAddress, ResourceDescriptor};

const DEFAULT_SCHEME: &str = "https";

/// A resource on an HTTP host.
///
/// [`Endpoint::resolve`] composes `scheme://host/path?query` with [`Url`],
/// percent-encoding path segments and encoding the query items with
/// `application/x-www-form-urlencoded` rules in insertion order. An endpoint
/// that cannot be resolved reports no address, which the pipeline turns into
/// [`NetworkError::BadRequest`]; call
/// [`Endpoint::resolve`] directly to get the precise [`NetworkError::InvalidUrl`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    scheme: String,
    host: String,
    path: String,
    query_items: Vec<(String, String)>,
    method: HttpMethod,
}

impl Endpoint {
    /// Creates an endpoint with an explicit method.
    pub fn new(host: impl Into<String>, path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_owned(),
            host: host.into(),
            path: path.into(),
            query_items: Vec::new(),
            method,
        }
    }

    /// Creates a `GET` endpoint.
    pub fn get(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(host, path, HttpMethod::Get)
    }

    /// Creates a `POST` endpoint. `payload` is sent as-is; `None` sends no body.
    pub fn post(
        host: impl Into<String>,
        path: impl Into<String>,
        payload: Option<Vec<u8>>,
    ) -> Self {
        Self::new(host, path, HttpMethod::Post { payload })
    }

    /// Appends a query parameter. Repeated keys are kept in order.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_items.push((key.into(), value.into()));
        self
    }

    /// Replaces the scheme (`https` by default).
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Resolves the full address.
    ///
    /// Path segments and query items are percent-encoded, so a `#` or `?`
    /// inside the path stays part of the path.
    ///
    /// # Errors
    ///
    /// [`NetworkError::InvalidUrl`] if the scheme is not `http`/`https`, the
    /// host (optionally with a port) does not parse as a URL authority, or the
    /// path contains whitespace.
    pub fn resolve(&self) -> Result<ResourceAddress, NetworkError> {
        if !matches!(self.scheme.as_str(), "http" | "https") {
            return Err(NetworkError::InvalidUrl);
        }
        if self.path.chars().any(char::is_whitespace) {
            return Err(NetworkError::InvalidUrl);
        }

        let mut url = parse_origin(&self.scheme, &self.host)?;
        url.path_segments_mut()
            .map_err(|_| NetworkError::InvalidUrl)?
            .clear()
            .extend(self.path.trim_start_matches('/').split('/'));
        if !self.query_items.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query_items);
        }

        ResourceAddress::new(url.as_str()).ok_or(NetworkError::InvalidUrl)
    }
}

/// Parses `scheme://host/`, rejecting anything in `host` beyond a host and
/// an optional port (userinfo, path, query, fragment).
fn parse_origin(scheme: &str, host: &str) -> Result<Url, NetworkError> {
    if host.is_empty() {
        return Err(NetworkError::InvalidUrl);
    }
    let url = Url::parse(&format!("{scheme}://{host}/")).map_err(|_| NetworkError::InvalidUrl)?;
    let origin_only = url.host_str().is_some()
        && url.username().is_empty()
        && url.password().is_none()
        && url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none();
    if origin_only {
        Ok(url)
    } else {
        Err(NetworkError::InvalidUrl)
    }
}

impl ResourceDescriptor for Endpoint {
    fn address(&self) -> Option<ResourceAddress> {
        self.resolve().ok()
    }

    fn method(&self) -> &HttpMethod {
        &self.method
    }

    fn host(&self) -> Option<&str> {
        Some(&self.host)
    }

    fn path(&self) -> Option<&str> {
        Some(&self.path)
    }

    fn query_items(&self) -> &[(String, String)] {
        &self.query_items
    }
}
