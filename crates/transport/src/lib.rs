//! Transport infrastructure adapter.
//!
//! Implements the [`network::HttpTransport`] trait over [`reqwest`]. The
//! [`network`] crate sees only [`network::HttpTransport`]; it never learns
//! which HTTP stack moved the bytes.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Connection management, TLS, redirects and timeouts all
//! live here (delegated to `reqwest`). Status classification and decoding do
//! not: every response is handed back as `(status, bytes)`.
//!
//! ## Configuration
//!
//! [`TransportConfig`] is plain serde data, so it can be embedded in whatever
//! configuration file the application already loads:
//!
//! ```json
//! { "timeout_secs": 30, "user_agent": "my-app/1.0", "default_headers": { "X-Team": "core" } }
//! ```

mod config;
mod error;
mod reqwest_transport;

pub use config::TransportConfig;
pub use error::TransportError;
pub use reqwest_transport::ReqwestTransport;
