//! The command surface a snapshot needs from a speaker
//!
//! [`DeviceCommands`] is implemented by [`crate::SonosDevice`] for real
//! speakers and by in-memory fakes in tests. Every call is synchronous and
//! blocks on one device round trip.

use serde::{Deserialize, Serialize};
use sonos_api::ApiError;

/// Transport state of a speaker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayState {
    /// Currently playing audio
    Playing,
    /// Playback is paused
    Paused,
    /// Playback is stopped
    Stopped,
    /// Transitioning between states
    Transitioning,
}

impl PlayState {
    /// Parse from a Sonos transport state string
    ///
    /// Sonos reports a paused transport as `PAUSED_PLAYBACK`.
    pub fn from_transport_state(state: &str) -> Option<Self> {
        match state.trim().to_uppercase().as_str() {
            "PLAYING" => Some(PlayState::Playing),
            "PAUSED_PLAYBACK" | "PAUSED" => Some(PlayState::Paused),
            "STOPPED" => Some(PlayState::Stopped),
            "TRANSITIONING" => Some(PlayState::Transitioning),
            _ => None,
        }
    }

    /// The wire value for this state
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayState::Playing => "PLAYING",
            PlayState::Paused => "PAUSED_PLAYBACK",
            PlayState::Stopped => "STOPPED",
            PlayState::Transitioning => "TRANSITIONING",
        }
    }
}

/// Repeat and shuffle mode of the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayMode {
    #[default]
    Normal,
    RepeatAll,
    RepeatOne,
    ShuffleNoRepeat,
    Shuffle,
    ShuffleRepeatOne,
}

impl PlayMode {
    pub const ALL: [PlayMode; 6] = [
        PlayMode::Normal,
        PlayMode::RepeatAll,
        PlayMode::RepeatOne,
        PlayMode::ShuffleNoRepeat,
        PlayMode::Shuffle,
        PlayMode::ShuffleRepeatOne,
    ];

    /// Parse from the `PlayMode` value of `GetTransportSettings`
    pub fn from_wire(mode: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(mode.trim()))
    }

    /// The wire value accepted by `SetPlayMode`
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayMode::Normal => "NORMAL",
            PlayMode::RepeatAll => "REPEAT_ALL",
            PlayMode::RepeatOne => "REPEAT_ONE",
            PlayMode::ShuffleNoRepeat => "SHUFFLE_NOREPEAT",
            PlayMode::Shuffle => "SHUFFLE",
            PlayMode::ShuffleRepeatOne => "SHUFFLE_REPEAT_ONE",
        }
    }
}

/// What the speaker is currently playing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackInfo {
    /// Source URI of the current track
    pub uri: String,
    /// 1-based position in the queue, 0 when not playing from a queue
    pub queue_index: u32,
    /// Elapsed time within the track, e.g. `0:01:42`; empty when unknown
    pub position: String,
    /// Raw DIDL-Lite fragment describing the track
    pub metadata: String,
}

/// Synchronous commands against a single speaker
///
/// Volume is 0..=100, bass and treble are -10..=10. `play_from_queue` takes a
/// 0-based queue index.
pub trait DeviceCommands {
    /// Whether this speaker coordinates its group's playback
    fn is_coordinator(&self) -> Result<bool, ApiError>;
    fn current_track_info(&self) -> Result<TrackInfo, ApiError>;

    fn volume(&self) -> Result<u8, ApiError>;
    fn set_volume(&self, volume: u8) -> Result<(), ApiError>;
    fn is_muted(&self) -> Result<bool, ApiError>;
    fn set_mute(&self, mute: bool) -> Result<(), ApiError>;
    fn bass(&self) -> Result<i8, ApiError>;
    fn set_bass(&self, bass: i8) -> Result<(), ApiError>;
    fn treble(&self) -> Result<i8, ApiError>;
    fn set_treble(&self, treble: i8) -> Result<(), ApiError>;
    fn is_loudness_enabled(&self) -> Result<bool, ApiError>;
    fn set_loudness(&self, loudness: bool) -> Result<(), ApiError>;

    fn play_mode(&self) -> Result<PlayMode, ApiError>;
    fn set_play_mode(&self, mode: PlayMode) -> Result<(), ApiError>;
    fn play_state(&self) -> Result<PlayState, ApiError>;

    fn play(&self) -> Result<(), ApiError>;
    fn pause(&self) -> Result<(), ApiError>;
    fn stop(&self) -> Result<(), ApiError>;
    /// Select the 0-based entry of the speaker's own queue without starting it
    fn play_from_queue(&self, index: u32) -> Result<(), ApiError>;
    /// Seek within the current track to a `H:MM:SS` offset
    fn seek(&self, position: &str) -> Result<(), ApiError>;
    /// Replace the transport source with `uri`, described by a DIDL-Lite fragment
    fn set_uri(&self, uri: &str, metadata: &str) -> Result<(), ApiError>;
}

impl<T: DeviceCommands + ?Sized> DeviceCommands for &T {
    fn is_coordinator(&self) -> Result<bool, ApiError> {
        (**self).is_coordinator()
    }
    fn current_track_info(&self) -> Result<TrackInfo, ApiError> {
        (**self).current_track_info()
    }
    fn volume(&self) -> Result<u8, ApiError> {
        (**self).volume()
    }
    fn set_volume(&self, volume: u8) -> Result<(), ApiError> {
        (**self).set_volume(volume)
    }
    fn is_muted(&self) -> Result<bool, ApiError> {
        (**self).is_muted()
    }
    fn set_mute(&self, mute: bool) -> Result<(), ApiError> {
        (**self).set_mute(mute)
    }
    fn bass(&self) -> Result<i8, ApiError> {
        (**self).bass()
    }
    fn set_bass(&self, bass: i8) -> Result<(), ApiError> {
        (**self).set_bass(bass)
    }
    fn treble(&self) -> Result<i8, ApiError> {
        (**self).treble()
    }
    fn set_treble(&self, treble: i8) -> Result<(), ApiError> {
        (**self).set_treble(treble)
    }
    fn is_loudness_enabled(&self) -> Result<bool, ApiError> {
        (**self).is_loudness_enabled()
    }
    fn set_loudness(&self, loudness: bool) -> Result<(), ApiError> {
        (**self).set_loudness(loudness)
    }
    fn play_mode(&self) -> Result<PlayMode, ApiError> {
        (**self).play_mode()
    }
    fn set_play_mode(&self, mode: PlayMode) -> Result<(), ApiError> {
        (**self).set_play_mode(mode)
    }
    fn play_state(&self) -> Result<PlayState, ApiError> {
        (**self).play_state()
    }
    fn play(&self) -> Result<(), ApiError> {
        (**self).play()
    }
    fn pause(&self) -> Result<(), ApiError> {
        (**self).pause()
    }
    fn stop(&self) -> Result<(), ApiError> {
        (**self).stop()
    }
    fn play_from_queue(&self, index: u32) -> Result<(), ApiError> {
        (**self).play_from_queue(index)
    }
    fn seek(&self, position: &str) -> Result<(), ApiError> {
        (**self).seek(position)
    }
    fn set_uri(&self, uri: &str, metadata: &str) -> Result<(), ApiError> {
        (**self).set_uri(uri, metadata)
    }
}
