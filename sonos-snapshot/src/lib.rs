//! # sonos-snapshot
//!
//! Capture what a Sonos speaker is doing, change it, then put it back.
//!
//! A [`Snapshot`] records the playback source (local queue, cloud queue or a
//! direct stream), the sound settings, and for group coordinators the
//! transport state. [`Snapshot::restore`] replays that state through an
//! ordered [`RestorePlan`].
//!
//! ```rust,ignore
//! use sonos_snapshot::{Snapshot, SonosDevice};
//!
//! let speaker = SonosDevice::new("192.168.1.20");
//! let snapshot = Snapshot::capture(&speaker)?;
//! // ... interrupt playback ...
//! snapshot.restore(&speaker)?;
//! ```
//!
//! Anything implementing [`DeviceCommands`] can be captured and restored.

pub mod config;
pub mod device;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod restore;
pub mod snapshot;
pub mod source;
pub mod speaker;

pub use config::SnapshotConfig;
pub use device::{DeviceCommands, PlayMode, PlayState, TrackInfo};
pub use error::{Result, SnapshotError};
pub use metadata::{MetadataEncoding, TrackMetadata};
pub use restore::{RestoreAction, RestorePlan};
pub use snapshot::Snapshot;
pub use source::{classify, PlaybackSource, SourceKind};
pub use speaker::SonosDevice;

pub use soap_client::SoapConfig;
pub use sonos_api::ApiError;
