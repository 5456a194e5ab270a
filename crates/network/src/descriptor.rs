//! The resource descriptor contract.
//!
//! A descriptor is a value describing *what* to request: an addressable
//! target and a method with its optional payload. It performs no I/O. The
//! pipeline reads only [`ResourceDescriptor::address`] and
//! [`ResourceDescriptor::method`]; the remaining accessors are metadata a
//! concrete descriptor may choose to expose.

use serde::{Deserialize, Serialize};

use crate::ResourceAddress;

// ---------------------------------------------------------------------------
// Method
// ---------------------------------------------------------------------------

/// HTTP method, carrying the payload for methods that have one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// `GET`. Never carries a body.
    Get,
    /// `POST` with an optional raw payload, sent exactly as given.
    Post {
        /// Raw request body. `None` sends no body at all.
        payload: Option<Vec<u8>>,
    },
}

impl HttpMethod {
    /// Creates a `POST` carrying `payload`.
    pub fn post(payload: impl Into<Vec<u8>>) -> Self {
        Self::Post {
            payload: Some(payload.into()),
        }
    }

    /// The label used on the wire.
    ///
    /// A pure function of the variant; payload presence never changes it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post { .. } => "POST",
        }
    }

    /// Returns the payload for variants that carry one.
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::Get => None,
            Self::Post { payload } => payload.as_deref(),
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

/// Describes a resource to request without performing any I/O.
///
/// How the address is computed (host, path, query encoding) is entirely up to
/// the implementation; see [`crate::Endpoint`] for a ready-made one.
pub trait ResourceDescriptor: Send + Sync {
    /// The resolved address, or `None` if the descriptor cannot produce one.
    ///
    /// `None` is a valid state, not an exceptional one; the pipeline turns it
    /// into [`crate::NetworkError::BadRequest`].
    fn address(&self) -> Option<ResourceAddress>;

    /// The method and its payload.
    fn method(&self) -> &HttpMethod;

    /// Host the address was resolved from, when the descriptor tracks one.
    fn host(&self) -> Option<&str> {
        None
    }

    /// Path the address was resolved from, when the descriptor tracks one.
    fn path(&self) -> Option<&str> {
        None
    }

    /// Query parameters in the order they are encoded.
    fn query_items(&self) -> &[(String, String)] {
        &[]
    }
}

impl<R> ResourceDescriptor for &R
where
    R: ResourceDescriptor + ?Sized,
{
    fn address(&self) -> Option<ResourceAddress> {
        (**self).address()
    }

    fn method(&self) -> &HttpMethod {
        (**self).method()
    }

    fn host(&self) -> Option<&str> {
        (**self).host()
    }

    fn path(&self) -> Option<&str> {
        (**self).path()
    }

    fn query_items(&self) -> &[(String, String)] {
        (**self).query_items()
    }
}
