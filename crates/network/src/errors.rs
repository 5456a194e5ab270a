//! Error types for the request pipeline.
//!
//! [`NetworkError`] is the flat, exhaustive taxonomy of failures the pipeline
//! itself can classify. [`RequestError`] is what
//! [`crate::NetworkClient::request`] returns: either one of those, or the
//! transport's own fault carried through untouched.
//!
//! No error is logged, retried or recovered inside this crate; the caller owns
//! all recovery policy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// Failures classified by the request pipeline.
///
/// Value-comparable and free of source chains: everything a caller needs is in
/// the variant's fields.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum NetworkError {
    /// A descriptor could not resolve its address.
    ///
    /// Never produced by the pipeline itself. Concrete descriptors such as
    /// [`crate::Endpoint::resolve`] raise it before a request is attempted.
    #[error("Invalid URL")]
    InvalidUrl,

    /// The descriptor has no resolvable address, so nothing can be sent.
    #[error("Bad request: descriptor has no resolvable address")]
    BadRequest,

    /// The response status is outside the success interval.
    #[error("Invalid status code: {code}")]
    InvalidStatusCode {
        /// The exact status code returned by the transport.
        code: u16,
    },

    /// The response body could not be decoded into the requested shape.
    #[error("Decoding error: {description}")]
    DecodingError {
        /// Human-readable description including the field path.
        description: String,
    },
}

// ---------------------------------------------------------------------------
// Call-level errors
// ---------------------------------------------------------------------------

/// The error returned by a single [`crate::NetworkClient::request`] call.
///
/// `E` is the transport's error type. Transport faults are never reclassified
/// into a [`NetworkError`].
#[derive(Debug, Error)]
pub enum RequestError<E>
where
    E: std::error::Error + 'static,
{
    /// The pipeline classified the failure.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The transport failed to deliver the request or receive a response.
    #[error("Transport failure: {0}")]
    Transport(#[source] E),
}

impl<E> RequestError<E>
where
    E: std::error::Error + 'static,
{
    /// Returns the classified pipeline error, if this is one.
    pub fn network(&self) -> Option<&NetworkError> {
        match self {
            Self::Network(error) => Some(error),
            Self::Transport(_) => None,
        }
    }

    /// Returns the transport's fault, if this is one.
    pub fn transport(&self) -> Option<&E> {
        match self {
            Self::Network(_) => None,
            Self::Transport(error) => Some(error),
        }
    }
}
