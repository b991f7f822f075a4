//! Point-in-time capture of a speaker's state

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SnapshotConfig;
use crate::device::{DeviceCommands, PlayState};
use crate::error::Result;
use crate::metadata::{MetadataEncoding, TrackMetadata};
use crate::restore::{RestoreAction, RestorePlan};
use crate::source::{classify, PlaybackSource, SourceKind};

/// A speaker's playback source, sound settings and transport state
///
/// Built by [`Snapshot::capture`] and never modified afterwards. The core
/// does not persist snapshots; the serde derives let callers do so.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    media_url: String,
    is_coordinator: bool,
    source: PlaybackSource,
    volume: u8,
    mute: bool,
    bass: i8,
    treble: i8,
    loudness: bool,
    /// Only recorded for coordinators
    transport_state: Option<PlayState>,
    #[serde(default)]
    metadata_encoding: MetadataEncoding,
}

impl Snapshot {
    /// Capture the current state of `device` with the default configuration
    pub fn capture<D: DeviceCommands + ?Sized>(device: &D) -> Result<Self> {
        Self::capture_with_config(device, &SnapshotConfig::default())
    }

    /// Capture the current state of `device`
    ///
    /// Only queries are issued. Fails on the first failed query, or when the
    /// media URI cannot be classified; in that case no sound settings are read.
    pub fn capture_with_config<D: DeviceCommands + ?Sized>(
        device: &D,
        config: &SnapshotConfig,
    ) -> Result<Self> {
        let is_coordinator = device.is_coordinator()?;
        let track = device.current_track_info()?;
        let kind = classify(&track.uri)?;
        debug!(uri = %track.uri, ?kind, is_coordinator, "classified playback source");

        let volume = device.volume()?;
        let mute = device.is_muted()?;
        let bass = device.bass()?;
        let treble = device.treble()?;
        let loudness = device.is_loudness_enabled()?;

        let source = match kind {
            SourceKind::LocalQueue => PlaybackSource::LocalQueue {
                play_mode: device.play_mode()?,
                position: track.queue_index,
                offset: track.position,
            },
            SourceKind::CloudQueue => PlaybackSource::CloudQueue,
            SourceKind::DirectStream => PlaybackSource::DirectStream {
                metadata: TrackMetadata::parse(&track.metadata),
            },
        };

        let transport_state = if is_coordinator {
            Some(device.play_state()?)
        } else {
            None
        };

        let snapshot = Self {
            media_url: track.uri,
            is_coordinator,
            source,
            volume,
            mute,
            bass,
            treble,
            loudness,
            transport_state,
            metadata_encoding: config.metadata_encoding,
        };
        info!(
            source = ?snapshot.source.kind(),
            volume,
            transport_state = ?snapshot.transport_state,
            "captured snapshot"
        );
        Ok(snapshot)
    }

    /// The commands [`Snapshot::restore`] issues, in order
    pub fn restore_plan(&self) -> RestorePlan {
        let mut actions = vec![RestoreAction::PauseIfPlaying];

        match &self.source {
            PlaybackSource::LocalQueue {
                play_mode,
                position,
                offset,
            } => {
                if *position > 0 {
                    actions.push(RestoreAction::PlayFromQueue {
                        index: position - 1,
                    });
                    if !offset.is_empty() {
                        actions.push(RestoreAction::Seek {
                            position: offset.clone(),
                        });
                    }
                }
                actions.push(RestoreAction::SetPlayMode(*play_mode));
            }
            PlaybackSource::CloudQueue => {}
            PlaybackSource::DirectStream { metadata } => {
                if !self.media_url.is_empty() {
                    actions.push(RestoreAction::SetUri {
                        uri: self.media_url.clone(),
                        metadata: metadata.to_didl(self.metadata_encoding),
                    });
                }
            }
        }

        actions.push(RestoreAction::SetMute(self.mute));
        actions.push(RestoreAction::SetBass(self.bass));
        actions.push(RestoreAction::SetTreble(self.treble));
        actions.push(RestoreAction::SetLoudness(self.loudness));
        // TODO: skip when the speaker has fixed volume enabled, which rejects SetVolume
        actions.push(RestoreAction::SetVolume(self.volume));

        if self.is_coordinator {
            match self.transport_state {
                Some(PlayState::Playing) => actions.push(RestoreAction::Play),
                Some(PlayState::Stopped) => actions.push(RestoreAction::Stop),
                _ => {}
            }
        }

        RestorePlan::new(actions)
    }

    /// Bring `device` back to the captured state
    ///
    /// A cloud queue cannot be restarted; its source is left alone and the
    /// sound settings are still restored. A failed command aborts the restore
    /// with earlier commands already applied.
    pub fn restore<D: DeviceCommands + ?Sized>(&self, device: &D) -> Result<()> {
        if self.source.kind() == SourceKind::CloudQueue {
            warn!(uri = %self.media_url, "cloud queue cannot be restored, skipping source");
        }
        let plan = self.restore_plan();
        plan.execute(device)?;
        info!(steps = plan.len(), "restored snapshot");
        Ok(())
    }

    pub fn media_url(&self) -> &str {
        &self.media_url
    }

    pub fn is_coordinator(&self) -> bool {
        self.is_coordinator
    }

    pub fn source(&self) -> &PlaybackSource {
        &self.source
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.mute
    }

    pub fn bass(&self) -> i8 {
        self.bass
    }

    pub fn treble(&self) -> i8 {
        self.treble
    }

    pub fn is_loudness_enabled(&self) -> bool {
        self.loudness
    }

    pub fn transport_state(&self) -> Option<PlayState> {
        self.transport_state
    }

    pub fn metadata_encoding(&self) -> MetadataEncoding {
        self.metadata_encoding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::PlayMode;

    fn snapshot(source: PlaybackSource, media_url: &str) -> Snapshot {
        Snapshot {
            media_url: media_url.to_string(),
            is_coordinator: true,
            source,
            volume: 25,
            mute: false,
            bass: 2,
            treble: -1,
            loudness: true,
            transport_state: Some(PlayState::Playing),
            metadata_encoding: MetadataEncoding::Escaped,
        }
    }

    fn sound_settings() -> Vec<RestoreAction> {
        vec![
            RestoreAction::SetMute(false),
            RestoreAction::SetBass(2),
            RestoreAction::SetTreble(-1),
            RestoreAction::SetLoudness(true),
            RestoreAction::SetVolume(25),
        ]
    }

    #[test]
    fn test_local_queue_plan_order() {
        let plan = snapshot(
            PlaybackSource::LocalQueue {
                play_mode: PlayMode::RepeatAll,
                position: 5,
                offset: "0:01:30".to_string(),
            },
            "x-rincon-queue:RINCON_000E5859E49601400#0",
        )
        .restore_plan();

        let mut expected = vec![
            RestoreAction::PauseIfPlaying,
            RestoreAction::PlayFromQueue { index: 4 },
            RestoreAction::Seek { position: "0:01:30".to_string() },
            RestoreAction::SetPlayMode(PlayMode::RepeatAll),
        ];
        expected.extend(sound_settings());
        expected.push(RestoreAction::Play);
        assert_eq!(plan.actions(), expected.as_slice());
    }

    #[test]
    fn test_local_queue_without_offset_skips_seek() {
        let plan = snapshot(
            PlaybackSource::LocalQueue {
                play_mode: PlayMode::Normal,
                position: 1,
                offset: String::new(),
            },
            "x-rincon-queue:RINCON_000E5859E49601400#0",
        )
        .restore_plan();
        assert_eq!(plan.actions()[1], RestoreAction::PlayFromQueue { index: 0 });
        assert_eq!(plan.actions()[2], RestoreAction::SetPlayMode(PlayMode::Normal));
    }

    #[test]
    fn test_direct_stream_plan_carries_didl() {
        let metadata = TrackMetadata {
            title: Some("Radio One".to_string()),
            ..TrackMetadata::default()
        };
        let plan = snapshot(
            PlaybackSource::DirectStream { metadata: metadata.clone() },
            "x-rincon-mp3radio://stream.example.com/live",
        )
        .restore_plan();
        assert_eq!(
            plan.actions()[1],
            RestoreAction::SetUri {
                uri: "x-rincon-mp3radio://stream.example.com/live".to_string(),
                metadata: metadata.to_didl(MetadataEncoding::Escaped),
            }
        );
    }

    #[test]
    fn test_empty_direct_stream_sets_no_uri() {
        let plan = snapshot(
            PlaybackSource::DirectStream { metadata: TrackMetadata::default() },
            "",
        )
        .restore_plan();
        assert_eq!(plan.actions()[1], RestoreAction::SetMute(false));
    }

    #[test]
    fn test_member_never_touches_transport() {
        let mut member = snapshot(PlaybackSource::CloudQueue, "x-rincon-queue:RINCON_1#3");
        member.is_coordinator = false;
        member.transport_state = None;

        let mut expected = vec![RestoreAction::PauseIfPlaying];
        expected.extend(sound_settings());
        assert_eq!(member.restore_plan().actions(), expected.as_slice());
    }

    #[test]
    fn test_stopped_coordinator_ends_with_stop() {
        let mut stopped = snapshot(PlaybackSource::CloudQueue, "x-rincon-queue:RINCON_1#3");
        stopped.transport_state = Some(PlayState::Stopped);
        assert_eq!(stopped.restore_plan().actions().last(), Some(&RestoreAction::Stop));

        stopped.transport_state = Some(PlayState::Paused);
        assert_eq!(
            stopped.restore_plan().actions().last(),
            Some(&RestoreAction::SetVolume(25))
        );
    }
}
