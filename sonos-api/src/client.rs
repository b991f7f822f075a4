use soap_client::{SoapClient, SoapConfig};
use std::time::Duration;
use tracing::{debug, warn};

use crate::operation::{Operation, UPnPOperation};
use crate::Result;

const DEFAULT_RETRIES: u32 = 2;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(200);

/// Executes typed actions against speakers
///
/// Calls are blocking; each one addresses a speaker by host name or IP.
/// Network failures are retried a fixed number of times with a fixed pause.
/// Faults, parse failures and rejected arguments are returned at once.
#[derive(Debug, Clone)]
pub struct SonosClient {
    soap: SoapClient,
    retries: u32,
    retry_delay: Duration,
}

impl SonosClient {
    pub fn new() -> Self {
        Self::with_soap_client(SoapClient::new())
    }

    pub fn with_config(config: SoapConfig) -> Self {
        Self::with_soap_client(SoapClient::with_config(config))
    }

    pub fn with_soap_client(soap: SoapClient) -> Self {
        Self {
            soap,
            retries: DEFAULT_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Retry network failures up to `retries` more times, `delay` apart
    pub fn with_retries(mut self, retries: u32, delay: Duration) -> Self {
        self.retries = retries;
        self.retry_delay = delay;
        self
    }

    /// Run one action on `host`
    ///
    /// ```rust,ignore
    /// let client = SonosClient::new();
    /// client.execute("192.168.1.100", rendering_control::set_volume("Master".to_string(), 25))?;
    /// ```
    pub fn execute<Op: UPnPOperation>(&self, host: &str, operation: Operation<Op>) -> Result<Op::Response> {
        let payload = operation.payload()?;
        let service = Op::SERVICE;

        let mut attempt = 0;
        loop {
            match self
                .soap
                .call(host, service.control_path(), service.urn(), Op::ACTION, &payload)
            {
                Ok(xml) => {
                    debug!(host, action = Op::ACTION, "action succeeded");
                    return Op::read_response(&xml);
                }
                Err(e) if e.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    warn!(host, action = Op::ACTION, attempt, error = %e, "retrying action");
                    if !self.retry_delay.is_zero() {
                        std::thread::sleep(self.retry_delay);
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl Default for SonosClient {
    fn default() -> Self {
        Self::new()
    }
}
