//! Error types for snapshot capture and restore

use sonos_api::ApiError;
use thiserror::Error;

/// Result type for snapshot operations
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Errors raised while capturing or restoring a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A device command failed (network, protocol or device-reported fault)
    ///
    /// During restore this leaves the device partially updated; nothing is
    /// rolled back.
    #[error("Device communication failed: {0}")]
    DeviceCommunication(#[from] ApiError),

    /// The media URI reported by the device has no recognizable scheme
    #[error("Malformed device state: {0}")]
    MalformedState(String),
}

impl SnapshotError {
    /// True when the failure came from the device or the network
    pub fn is_device_error(&self) -> bool {
        matches!(self, SnapshotError::DeviceCommunication(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_conversion() {
        let error: SnapshotError = ApiError::Fault(701).into();
        assert!(error.is_device_error());
        assert!(error.to_string().contains("701"));
    }

    #[test]
    fn test_malformed_state_display() {
        let error = SnapshotError::MalformedState("no scheme in 'garbage'".to_string());
        assert!(!error.is_device_error());
        assert_eq!(error.to_string(), "Malformed device state: no scheme in 'garbage'");
    }
}
