use thiserror::Error;

/// Faults raised while moving a request over the wire.
///
/// These reach callers of `network::NetworkClient::request` inside
/// `RequestError::Transport`, unchanged.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The configuration could not be parsed or contains invalid values.
    #[error("Invalid transport configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration problem.
        message: String,
    },

    /// `reqwest` refused to build a client from the configuration.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request address is not a URL `reqwest` can send to.
    #[error("Invalid request address: {address}")]
    InvalidAddress { address: String },

    /// The method label is not a valid HTTP method.
    #[error("Invalid HTTP method: {method}")]
    InvalidMethod { method: String },

    /// The request could not be sent or no response arrived.
    #[error("Failed to send request: {0}")]
    Send(#[source] reqwest::Error),

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}
