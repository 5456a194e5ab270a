//! Newtype identifiers.
//!
//! An address and a request correlation id are both "just strings" at some
//! level; wrapping them keeps a raw `String` from being passed where a resolved
//! address is required.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// An already-resolved addressable reference (an absolute URL).
///
/// The core never parses or re-encodes the address; it is handed to the
/// transport exactly as the descriptor produced it. Absence is modelled as
/// `Option<ResourceAddress>` on the descriptor, not as an empty address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceAddress(String);

impl ResourceAddress {
    /// Creates a new address, returning `None` if the value is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Request correlation
// ---------------------------------------------------------------------------

/// Identifies a single [`crate::NetworkClient::request`] call.
///
/// Generated fresh for every call and recorded on the call's tracing span so
/// the dispatch and status events of one call can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a new random request identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
