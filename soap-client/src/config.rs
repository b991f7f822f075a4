//! Transport configuration

use std::time::Duration;

/// Default UPnP control port exposed by Sonos speakers
pub const DEFAULT_PORT: u16 = 1400;

/// Configuration for the SOAP transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapConfig {
    /// Port the device listens on for control requests
    /// Default: 1400
    pub port: u16,

    /// Timeout for establishing the TCP connection
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Timeout for reading the response
    /// Default: 10 seconds
    pub read_timeout: Duration,
}

impl Default for SoapConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(10),
        }
    }
}

impl SoapConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the control port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override the connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override the read timeout
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }
}
