//! Typed Sonos UPnP actions
//!
//! Each action in [`services`] is a function returning an [`Operation`];
//! [`SonosClient::execute`] validates it, sends it over the private
//! `soap-client` crate and decodes the reply.
//!
//! ```rust,ignore
//! use sonos_api::SonosClient;
//! use sonos_api::services::av_transport;
//!
//! let client = SonosClient::new();
//! client.execute("192.168.1.100", av_transport::pause())?;
//! ```

mod macros;

pub mod client;
pub mod error;
pub mod operation;
pub mod service;
pub mod services;

pub use client::SonosClient;
pub use error::{ApiError, Result};
pub use operation::{Operation, UPnPOperation, Validate, ValidationError};
pub use service::Service;

#[doc(hidden)]
pub use paste::paste as __paste;
