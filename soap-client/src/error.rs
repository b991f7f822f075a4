//! Error types for the SOAP client

use thiserror::Error;

/// Errors that can occur during SOAP communication
#[derive(Debug, Error)]
pub enum SoapError {
    /// Network or HTTP communication error
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// XML parsing error
    #[error("XML parsing error: {0}")]
    Parse(String),

    /// SOAP fault returned by the device
    #[error("SOAP fault: error code {0}")]
    Fault(u16),
}

impl SoapError {
    /// Whether the request may succeed if sent again.
    ///
    /// Only transport failures qualify. A fault or a malformed response will
    /// come back identical on a second attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SoapError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_errors_are_retryable() {
        assert!(SoapError::Network("timed out".to_string()).is_retryable());
        assert!(!SoapError::Parse("bad xml".to_string()).is_retryable());
        assert!(!SoapError::Fault(701).is_retryable());
    }
}
