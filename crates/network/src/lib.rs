//! Typed HTTP request/response pipeline.
//!
//! Given a [`ResourceDescriptor`] and an expected result shape `T`, the
//! [`NetworkClient`] builds a [`TransportRequest`], hands it to an
//! [`HttpTransport`], validates the response status and decodes the body into
//! `T`, or fails with a precisely classified [`NetworkError`].
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed (a transport, a structured decoder); the
//! `transport` crate defines *how* bytes move over the wire.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ResourceAddress`, `RequestId`) |
//! | [`descriptor`] | `HttpMethod` and the `ResourceDescriptor` contract |
//! | [`endpoint`] | `Endpoint`, a concrete descriptor resolved from host/path/query |
//! | [`request`] | `TransportRequest` and `RequestBuilder` |
//! | [`response`] | `TransportResponse` and `ResponseValidator` |
//! | [`decode`] | `StructuredDecoder` port, `JsonDecoder`, `PayloadDecoder` |
//! | [`transport`] | The `HttpTransport` port trait |
//! | [`client`] | `NetworkClient`, the orchestrator |
//! | [`errors`] | `NetworkError` and `RequestError` |
//!
//! ## Control Flow
//!
//! Every call is strictly linear: build, send, validate, decode. The transport
//! send is the only suspension point and no state is shared between calls.

pub mod client;
pub mod decode;
pub mod descriptor;
pub mod endpoint;
pub mod errors;
pub mod identifiers;
pub mod request;
pub mod response;
pub mod transport;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use client::NetworkClient;
pub use decode::{
    DecodeFailure, DecodePath, JsonDecoder, PathSegment, PayloadDecoder, StructuredDecoder,
};
pub use descriptor::{HttpMethod, ResourceDescriptor};
pub use endpoint::Endpoint;
pub use errors::{NetworkError, RequestError};
pub use identifiers::{RequestId, ResourceAddress};
pub use request::{RequestBuilder, TransportRequest};
pub use response::{ResponseValidator, TransportResponse};
pub use transport::HttpTransport;
