use soap_client::SoapError;
use thiserror::Error;

use crate::operation::ValidationError;

/// Failures of a single action against a speaker
#[derive(Debug, Error)]
pub enum ApiError {
    /// The speaker could not be reached, or the connection dropped
    #[error("Network error: {0}")]
    Network(String),

    /// The speaker answered with something other than the expected response
    #[error("Parse error: {0}")]
    Parse(String),

    /// UPnP error code returned by the speaker
    #[error("SOAP fault: error code {0}")]
    Fault(u16),

    /// Rejected locally, never sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// The speaker's answers contradict each other or name an unknown value
    #[error("Device error: {0}")]
    Device(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl From<SoapError> for ApiError {
    fn from(error: SoapError) -> Self {
        match error {
            SoapError::Network(msg) => ApiError::Network(msg),
            SoapError::Parse(msg) => ApiError::Parse(msg),
            SoapError::Fault(code) => ApiError::Fault(code),
        }
    }
}
