//! Playback source classification
//!
//! The transport URI tells which kind of source a speaker is playing:
//!
//! - `x-rincon-queue:RINCON_000E5859E49601400#0`: the speaker's local queue
//! - `x-rincon-queue:RINCON_000E5859E49601400#6`: a cloud queue, the suffix
//!   changes with each queue
//! - `x-rincon:RINCON_000E5859E49601400`: a group member following its coordinator
//! - anything else: a stream, a file, or nothing at all

use serde::{Deserialize, Serialize};

use crate::device::PlayMode;
use crate::error::{Result, SnapshotError};
use crate::metadata::TrackMetadata;

const QUEUE_SCHEME: &str = "x-rincon-queue";

/// Source kind derived from a transport URI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    LocalQueue,
    CloudQueue,
    DirectStream,
}

/// Classify a transport URI
///
/// An empty URI means nothing is loaded and classifies as
/// [`SourceKind::DirectStream`]. A non-empty URI must carry a scheme, and a
/// queue URI must carry a non-empty `#` suffix.
pub fn classify(uri: &str) -> Result<SourceKind> {
    if uri.is_empty() {
        return Ok(SourceKind::DirectStream);
    }

    let (scheme, rest) = uri
        .split_once(':')
        .filter(|(scheme, _)| !scheme.is_empty())
        .ok_or_else(|| SnapshotError::MalformedState(format!("media URI '{}' has no scheme", uri)))?;

    if scheme != QUEUE_SCHEME {
        return Ok(SourceKind::DirectStream);
    }

    match rest.rsplit_once('#') {
        Some((_, "0")) => Ok(SourceKind::LocalQueue),
        Some((_, suffix)) if !suffix.is_empty() => Ok(SourceKind::CloudQueue),
        _ => Err(SnapshotError::MalformedState(format!(
            "queue URI '{}' has no queue suffix",
            uri
        ))),
    }
}

/// What was playing at capture time, with the state needed to bring it back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaybackSource {
    /// The speaker's own queue
    LocalQueue {
        play_mode: PlayMode,
        /// 1-based queue position as reported by the device, 0 when unset
        position: u32,
        /// Elapsed time within the track, possibly empty
        offset: String,
    },
    /// A queue driven by a cloud integration; it cannot be restored
    CloudQueue,
    /// A stream, file or empty transport
    DirectStream { metadata: TrackMetadata },
}

impl PlaybackSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            PlaybackSource::LocalQueue { .. } => SourceKind::LocalQueue,
            PlaybackSource::CloudQueue => SourceKind::CloudQueue,
            PlaybackSource::DirectStream { .. } => SourceKind::DirectStream,
        }
    }
}
