//! Private SOAP client for UPnP device communication
//!
//! This crate provides a minimal blocking SOAP client specifically designed for
//! communicating with UPnP devices like Sonos speakers.

mod config;
mod error;

pub use config::{SoapConfig, DEFAULT_PORT};
pub use error::SoapError;

use tracing::{debug, warn};
use xmltree::Element;

/// A minimal SOAP client for UPnP device communication
#[derive(Debug, Clone)]
pub struct SoapClient {
    agent: ureq::Agent,
    port: u16,
}

impl SoapClient {
    /// Create a new SOAP client with default configuration
    pub fn new() -> Self {
        Self::with_config(SoapConfig::default())
    }

    /// Create a SOAP client with a custom port and timeouts
    pub fn with_config(config: SoapConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(config.connect_timeout)
                .timeout_read(config.read_timeout)
                .build(),
            port: config.port,
        }
    }

    /// Port used for control requests
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Send a SOAP request and return the parsed response element
    pub fn call(
        &self,
        host: &str,
        endpoint: &str,
        service_uri: &str,
        action: &str,
        payload: &str,
    ) -> Result<Element, SoapError> {
        let body = format!(
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
                <s:Body>
                    <u:{action} xmlns:u="{service_uri}">
                        {payload}
                    </u:{action}>
                </s:Body>
            </s:Envelope>"#,
            action = action,
            service_uri = service_uri,
            payload = payload
        );

        let url = format!("http://{}:{}/{}", host, self.port, endpoint);
        let soap_action = format!("\"{}#{}\"", service_uri, action);
        debug!(%url, action, "sending SOAP request");

        let xml_text = match self
            .agent
            .post(&url)
            .set("Content-Type", "text/xml; charset=\"utf-8\"")
            .set("SOAPACTION", &soap_action)
            .send_string(&body)
        {
            Ok(response) => response
                .into_string()
                .map_err(|e| SoapError::Network(e.to_string()))?,
            // UPnP devices report faults with HTTP 500, so the body still matters
            Err(ureq::Error::Status(status, response)) => {
                let text = response.into_string().unwrap_or_default();
                if let Ok(xml) = Element::parse(text.as_bytes()) {
                    self.extract_response(&xml, action)?;
                }
                return Err(SoapError::Network(format!("HTTP {} for {}", status, action)));
            }
            Err(e) => return Err(SoapError::Network(e.to_string())),
        };

        let xml = Element::parse(xml_text.as_bytes())
            .map_err(|e| SoapError::Parse(e.to_string()))?;

        self.extract_response(&xml, action)
    }

    fn extract_response(&self, xml: &Element, action: &str) -> Result<Element, SoapError> {
        let body = xml
            .get_child("Body")
            .ok_or_else(|| SoapError::Parse("Missing SOAP Body".to_string()))?;

        // Check for SOAP fault first
        if let Some(fault) = body.get_child("Fault") {
            let error_code = fault
                .get_child("detail")
                .and_then(|d| d.get_child("UPnPError").or_else(|| d.get_child("UpnPError")))
                .and_then(|e| e.get_child("errorCode"))
                .and_then(|c| c.get_text())
                .and_then(|t| t.trim().parse::<u16>().ok())
                .unwrap_or(500);
            warn!(action, error_code, "device returned SOAP fault");
            return Err(SoapError::Fault(error_code));
        }

        let response_name = format!("{}Response", action);
        body.get_child(response_name.as_str())
            .cloned()
            .ok_or_else(|| SoapError::Parse(format!("Missing {} element", response_name)))
    }
}

impl Default for SoapClient {
    fn default() -> Self {
        Self::new()
    }
}
