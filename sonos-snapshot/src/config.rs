//! Snapshot configuration

use serde::{Deserialize, Serialize};

use crate::metadata::MetadataEncoding;

/// Options applied when capturing a snapshot
///
/// Deserializes from JSON or any other serde format; missing fields take
/// their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Encoding used for the DIDL-Lite fragment sent back on restore
    pub metadata_encoding: MetadataEncoding,
}

impl SnapshotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata_encoding(mut self, encoding: MetadataEncoding) -> Self {
        self.metadata_encoding = encoding;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = SnapshotConfig::new().with_metadata_encoding(MetadataEncoding::Verbatim);
        assert_eq!(config.metadata_encoding, MetadataEncoding::Verbatim);
        assert_eq!(SnapshotConfig::default().metadata_encoding, MetadataEncoding::Escaped);
    }

    #[test]
    fn test_deserialize_from_json() {
        let config: SnapshotConfig = serde_json::from_str(r#"{"metadata_encoding":"verbatim"}"#).unwrap();
        assert_eq!(config.metadata_encoding, MetadataEncoding::Verbatim);

        let config: SnapshotConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SnapshotConfig::default());
    }
}
