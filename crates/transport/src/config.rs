use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::TransportError;

/// Settings for the `reqwest` client behind [`crate::ReqwestTransport`].
///
/// Every field is optional; the default leaves `reqwest`'s own defaults in
/// place (no overall timeout, its own user agent, no extra headers).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransportConfig {
    /// Overall per-request timeout, in seconds.
    pub timeout_secs: Option<u64>,

    /// Timeout for establishing a connection, in seconds.
    pub connect_timeout_secs: Option<u64>,

    /// `User-Agent` sent with every request.
    pub user_agent: Option<String>,

    /// Headers sent with every request. Per-request headers with the same
    /// name are appended after these.
    pub default_headers: BTreeMap<String, String>,
}

impl TransportConfig {
    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// [`TransportError::InvalidConfig`] if the JSON is malformed or has
    /// unknown fields.
    pub fn from_json_str(json: &str) -> Result<Self, TransportError> {
        serde_json::from_str(json).map_err(|e| TransportError::InvalidConfig {
            message: e.to_string(),
        })
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub(crate) fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub(crate) fn header_map(&self) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::with_capacity(self.default_headers.len());
        for (name, value) in &self.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                TransportError::InvalidConfig {
                    message: format!("invalid header name '{name}'"),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| TransportError::InvalidConfig {
                message: format!("invalid value for header '{name}'"),
            })?;
            headers.append(name, value);
        }
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(
            TransportConfig::from_json_str("{}").unwrap(),
            TransportConfig::default()
        );
    }

    #[test]
    fn parses_every_field() {
        let config = TransportConfig::from_json_str(
            r#"{
                "timeout_secs": 30,
                "connect_timeout_secs": 5,
                "user_agent": "netlayer/1.0",
                "default_headers": { "X-Team": "core" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.connect_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.user_agent.as_deref(), Some("netlayer/1.0"));
        assert_eq!(config.header_map().unwrap()["x-team"], "core");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = TransportConfig::from_json_str(r#"{"retries": 3}"#).unwrap_err();
        assert!(matches!(err, TransportError::InvalidConfig { .. }));
    }

    #[test]
    fn invalid_header_name_is_a_config_error() {
        let mut config = TransportConfig::default();
        config
            .default_headers
            .insert("bad header".into(), "x".into());
        let err = config.header_map().unwrap_err();
        assert!(err.to_string().contains("bad header"), "{err}");
    }
}
