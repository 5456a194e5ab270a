//! The transport's response and status validation.

use crate::NetworkError;

/// Raw bytes plus a numeric status, as produced by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    status: u16,
    body: Vec<u8>,
}

impl TransportResponse {
    /// Creates a response from its status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The numeric status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Decides whether a status code counts as success.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseValidator;

impl ResponseValidator {
    /// Returns `true` iff `200 <= code <= 300`.
    ///
    /// The upper bound is inclusive: `300` counts as success.
    pub fn is_success(code: u16) -> bool {
        (200..=300).contains(&code)
    }

    /// Fails with the exact offending status when it is not a success.
    pub fn validate(response: &TransportResponse) -> Result<(), NetworkError> {
        if Self::is_success(response.status()) {
            Ok(())
        } else {
            Err(NetworkError::InvalidStatusCode {
                code: response.status(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_interval_is_closed_at_both_ends() {
        assert!(!ResponseValidator::is_success(199));
        assert!(ResponseValidator::is_success(200));
        assert!(ResponseValidator::is_success(204));
        // 300 sits inside the interval.
        assert!(ResponseValidator::is_success(300));
        assert!(!ResponseValidator::is_success(301));
    }

    #[test]
    fn is_success_matches_the_interval_for_every_code() {
        for code in 0..=u16::MAX {
            assert_eq!(
                ResponseValidator::is_success(code),
                (200..=300).contains(&code),
                "code {code}"
            );
        }
    }

    #[test]
    fn validate_reports_the_exact_code() {
        let response = TransportResponse::new(404, Vec::new());
        assert_eq!(
            ResponseValidator::validate(&response),
            Err(NetworkError::InvalidStatusCode { code: 404 })
        );
        assert_eq!(
            ResponseValidator::validate(&TransportResponse::new(201, "{}")),
            Ok(())
        );
    }
}
