//! Decoding response bodies into typed values.
//!
//! The [`StructuredDecoder`] port reports failures as an explicit
//! [`DecodeFailure`], one of four cases each carrying a structural
//! [`DecodePath`]. [`PayloadDecoder`] turns those into a single descriptive
//! [`NetworkError::DecodingError`] naming the target shape.
//!
//! [`JsonDecoder`] is the default implementation: `serde_json` for the format
//! and `serde_path_to_error` to locate the failure inside the target shape.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::NetworkError;

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// One step into a structured value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field or map key.
    Field(String),
    /// A position in a sequence.
    Index(usize),
    /// An enum variant.
    Variant(String),
    /// A step the decoder could not name.
    Unknown,
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(name) | Self::Variant(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
            Self::Unknown => f.write_str("?"),
        }
    }
}

/// Location inside the target shape, outermost segment first.
///
/// Displays as a dotted path (`address.id`, `items.1.name`); the root displays
/// as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DecodePath(Vec<PathSegment>);

impl DecodePath {
    /// The root of the target shape.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns `true` for the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl FromIterator<PathSegment> for DecodePath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for DecodePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Decode port
// ---------------------------------------------------------------------------

/// Why a structured decode failed.
///
/// The four cases are mutually exclusive and cover every failure a
/// [`StructuredDecoder`] may report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeFailure {
    /// A required field is absent. `path` locates the object that lacks it.
    #[error("missing field '{field}' at path: {path}")]
    MissingField { field: String, path: DecodePath },

    /// A value is present but of the wrong type.
    #[error("type mismatch, expected {expected} at path: {path}")]
    TypeMismatch { expected: String, path: DecodePath },

    /// A value is null where a non-null one is required.
    #[error("value not found, expected {expected} at path: {path}")]
    ValueNotFound { expected: String, path: DecodePath },

    /// Any other failure (malformed input, invalid value, trailing data...).
    #[error("{message}")]
    Other { message: String },
}

/// Decodes raw bytes into a typed value.
///
/// Implementations must be usable from concurrent calls: a stateless decoder
/// can be shared freely, a stateful one must synchronise internally.
pub trait StructuredDecoder: Send + Sync {
    /// Decodes `bytes` into `T`.
    fn decode<T>(&self, bytes: &[u8]) -> Result<T, DecodeFailure>
    where
        T: DeserializeOwned;
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Stateless JSON decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl StructuredDecoder for JsonDecoder {
    fn decode<T>(&self, bytes: &[u8]) -> Result<T, DecodeFailure>
    where
        T: DeserializeOwned,
    {
        let mut deserializer = serde_json::Deserializer::from_slice(bytes);
        let value: T = serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
            let path = error.path().iter().map(segment_from).collect();
            classify(error.into_inner(), path)
        })?;
        deserializer.end().map_err(|error| DecodeFailure::Other {
            message: error.to_string(),
        })?;
        Ok(value)
    }
}

fn segment_from(segment: &serde_path_to_error::Segment) -> PathSegment {
    use serde_path_to_error::Segment;

    match segment {
        Segment::Seq { index } => PathSegment::Index(*index),
        Segment::Map { key } => PathSegment::Field(key.clone()),
        Segment::Enum { variant } => PathSegment::Variant(variant.clone()),
        Segment::Unknown => PathSegment::Unknown,
    }
}

/// Sorts a `serde_json` error into one of the four failure cases.
///
/// serde reports these conditions only through its error text
/// (`missing field ...`, `invalid type: ..., expected ...`).
fn classify(error: serde_json::Error, path: DecodePath) -> DecodeFailure {
    let message = error.to_string();
    if !error.is_data() {
        return DecodeFailure::Other { message };
    }

    let text = strip_position(&message);
    if let Some(rest) = text.strip_prefix("missing field `") {
        if let Some(field) = rest.strip_suffix('`') {
            return DecodeFailure::MissingField {
                field: field.to_owned(),
                path,
            };
        }
    }
    if let Some(rest) = text.strip_prefix("invalid type: ") {
        if let Some((unexpected, expected)) = rest.rsplit_once(", expected ") {
            let expected = expected.to_owned();
            return if unexpected == "null" || unexpected == "unit value" {
                DecodeFailure::ValueNotFound { expected, path }
            } else {
                DecodeFailure::TypeMismatch { expected, path }
            };
        }
    }
    DecodeFailure::Other { message }
}

/// Drops the ` at line L column C` suffix serde_json appends.
fn strip_position(message: &str) -> &str {
    match message.rfind(" at line ") {
        Some(index) => &message[..index],
        None => message,
    }
}

// ---------------------------------------------------------------------------
// Payload decoder
// ---------------------------------------------------------------------------

/// Wraps a [`StructuredDecoder`], normalising its failures into
/// [`NetworkError::DecodingError`].
#[derive(Debug, Clone, Default)]
pub struct PayloadDecoder<D = JsonDecoder> {
    decoder: D,
}

impl<D> PayloadDecoder<D>
where
    D: StructuredDecoder,
{
    /// Wraps `decoder`.
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }

    /// Decodes `bytes` into `T`.
    ///
    /// # Errors
    ///
    /// [`NetworkError::DecodingError`] describing the failure, the target
    /// shape and where inside it decoding stopped.
    pub fn decode<T>(&self, bytes: &[u8]) -> Result<T, NetworkError>
    where
        T: DeserializeOwned,
    {
        self.decoder
            .decode::<T>(bytes)
            .map_err(|failure| NetworkError::DecodingError {
                description: describe(&failure, &shape_name::<T>()),
            })
    }
}

fn describe(failure: &DecodeFailure, shape: &str) -> String {
    match failure {
        DecodeFailure::MissingField { field, path } => {
            format!("Missing key '{field}' in {shape} at path: {path}")
        }
        DecodeFailure::TypeMismatch { expected, path } => {
            format!("Type mismatch for type {expected} in {shape} at path: {path}")
        }
        DecodeFailure::ValueNotFound { expected, path } => {
            format!("Value not found for type {expected} in {shape} at path: {path}")
        }
        DecodeFailure::Other { message } => format!("Failed to decode {shape}: {message}"),
    }
}

/// The type name of `T` with module paths stripped, generics kept
/// (`alloc::vec::Vec<app::User>` becomes `Vec<User>`).
pub(crate) fn shape_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut name = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            name.truncate(segment_start);
            continue;
        }
        name.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment_start = name.len();
        }
    }
    name
}
