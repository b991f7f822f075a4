//! In-memory speaker that records every command it receives

#![allow(dead_code)]

use std::cell::RefCell;

use sonos_snapshot::{ApiError, DeviceCommands, PlayMode, PlayState, TrackInfo};

/// One command issued against the fake speaker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    IsCoordinator,
    CurrentTrackInfo,
    Volume,
    SetVolume(u8),
    IsMuted,
    SetMute(bool),
    Bass,
    SetBass(i8),
    Treble,
    SetTreble(i8),
    IsLoudnessEnabled,
    SetLoudness(bool),
    PlayMode,
    SetPlayMode(PlayMode),
    PlayState,
    Play,
    Pause,
    Stop,
    PlayFromQueue(u32),
    Seek(String),
    SetUri(String, String),
}

impl Call {
    /// True for commands that change what is playing
    pub fn touches_source(&self) -> bool {
        matches!(self, Call::PlayFromQueue(_) | Call::Seek(_) | Call::SetUri(..))
    }

    pub fn is_query(&self) -> bool {
        matches!(
            self,
            Call::IsCoordinator
                | Call::CurrentTrackInfo
                | Call::Volume
                | Call::IsMuted
                | Call::Bass
                | Call::Treble
                | Call::IsLoudnessEnabled
                | Call::PlayMode
                | Call::PlayState
        )
    }
}

#[derive(Debug, Clone)]
pub struct SpeakerState {
    pub coordinator: bool,
    pub track: TrackInfo,
    pub volume: u8,
    pub mute: bool,
    pub bass: i8,
    pub treble: i8,
    pub loudness: bool,
    pub play_mode: PlayMode,
    pub play_state: PlayState,
}

impl Default for SpeakerState {
    fn default() -> Self {
        Self {
            coordinator: true,
            track: TrackInfo::default(),
            volume: 30,
            mute: false,
            bass: 0,
            treble: 0,
            loudness: true,
            play_mode: PlayMode::Normal,
            play_state: PlayState::Stopped,
        }
    }
}

pub const QUEUE_URI: &str = "x-rincon-queue:RINCON_000E5859E49601400#0";
pub const CLOUD_URI: &str = "x-rincon-queue:RINCON_000E5859E49601400#6";
pub const RADIO_URI: &str = "x-rincon-mp3radio://stream.example.com/live";

pub const RADIO_DIDL: &str = r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/" xmlns:r="urn:schemas-rinconnetworks-com:metadata-1-0/" xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/"><item id="-1" parentID="-1" restricted="true"><res protocolInfo="x-rincon-mp3radio:*:*:*">x-rincon-mp3radio://stream.example.com/live</res><r:streamContent>Artist - Song</r:streamContent><dc:title>Radio One</dc:title><upnp:class>object.item</upnp:class></item></DIDL-Lite>"#;

/// Fake speaker holding mutable state and a log of calls
#[derive(Default)]
pub struct RecordingDevice {
    pub state: RefCell<SpeakerState>,
    calls: RefCell<Vec<Call>>,
    fail_on: Option<fn(&Call) -> bool>,
}

impl RecordingDevice {
    pub fn new(state: SpeakerState) -> Self {
        Self {
            state: RefCell::new(state),
            ..Self::default()
        }
    }

    pub fn playing_queue(position: u32, offset: &str) -> Self {
        Self::new(SpeakerState {
            track: TrackInfo {
                uri: QUEUE_URI.to_string(),
                queue_index: position,
                position: offset.to_string(),
                metadata: String::new(),
            },
            play_mode: PlayMode::ShuffleNoRepeat,
            play_state: PlayState::Playing,
            ..SpeakerState::default()
        })
    }

    pub fn playing_radio() -> Self {
        Self::new(SpeakerState {
            track: TrackInfo {
                uri: RADIO_URI.to_string(),
                queue_index: 1,
                position: String::new(),
                metadata: RADIO_DIDL.to_string(),
            },
            play_state: PlayState::Playing,
            ..SpeakerState::default()
        })
    }

    pub fn playing_uri(uri: &str) -> Self {
        Self::new(SpeakerState {
            track: TrackInfo {
                uri: uri.to_string(),
                ..TrackInfo::default()
            },
            play_state: PlayState::Playing,
            ..SpeakerState::default()
        })
    }

    /// Fail every call matching `predicate` with a network error
    pub fn failing_on(mut self, predicate: fn(&Call) -> bool) -> Self {
        self.fail_on = Some(predicate);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Commands that changed something, in order
    pub fn commands(&self) -> Vec<Call> {
        self.calls().into_iter().filter(|c| !c.is_query()).collect()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        let fails = self.fail_on.map(|f| f(&call)).unwrap_or(false);
        self.calls.borrow_mut().push(call);
        if fails {
            Err(ApiError::Network("connection reset".to_string()))
        } else {
            Ok(())
        }
    }
}

impl DeviceCommands for RecordingDevice {
    fn is_coordinator(&self) -> Result<bool, ApiError> {
        self.record(Call::IsCoordinator)?;
        Ok(self.state.borrow().coordinator)
    }

    fn current_track_info(&self) -> Result<TrackInfo, ApiError> {
        self.record(Call::CurrentTrackInfo)?;
        Ok(self.state.borrow().track.clone())
    }

    fn volume(&self) -> Result<u8, ApiError> {
        self.record(Call::Volume)?;
        Ok(self.state.borrow().volume)
    }

    fn set_volume(&self, volume: u8) -> Result<(), ApiError> {
        self.record(Call::SetVolume(volume))?;
        self.state.borrow_mut().volume = volume;
        Ok(())
    }

    fn is_muted(&self) -> Result<bool, ApiError> {
        self.record(Call::IsMuted)?;
        Ok(self.state.borrow().mute)
    }

    fn set_mute(&self, mute: bool) -> Result<(), ApiError> {
        self.record(Call::SetMute(mute))?;
        self.state.borrow_mut().mute = mute;
        Ok(())
    }

    fn bass(&self) -> Result<i8, ApiError> {
        self.record(Call::Bass)?;
        Ok(self.state.borrow().bass)
    }

    fn set_bass(&self, bass: i8) -> Result<(), ApiError> {
        self.record(Call::SetBass(bass))?;
        self.state.borrow_mut().bass = bass;
        Ok(())
    }

    fn treble(&self) -> Result<i8, ApiError> {
        self.record(Call::Treble)?;
        Ok(self.state.borrow().treble)
    }

    fn set_treble(&self, treble: i8) -> Result<(), ApiError> {
        self.record(Call::SetTreble(treble))?;
        self.state.borrow_mut().treble = treble;
        Ok(())
    }

    fn is_loudness_enabled(&self) -> Result<bool, ApiError> {
        self.record(Call::IsLoudnessEnabled)?;
        Ok(self.state.borrow().loudness)
    }

    fn set_loudness(&self, loudness: bool) -> Result<(), ApiError> {
        self.record(Call::SetLoudness(loudness))?;
        self.state.borrow_mut().loudness = loudness;
        Ok(())
    }

    fn play_mode(&self) -> Result<PlayMode, ApiError> {
        self.record(Call::PlayMode)?;
        Ok(self.state.borrow().play_mode)
    }

    fn set_play_mode(&self, mode: PlayMode) -> Result<(), ApiError> {
        self.record(Call::SetPlayMode(mode))?;
        self.state.borrow_mut().play_mode = mode;
        Ok(())
    }

    fn play_state(&self) -> Result<PlayState, ApiError> {
        self.record(Call::PlayState)?;
        Ok(self.state.borrow().play_state)
    }

    fn play(&self) -> Result<(), ApiError> {
        self.record(Call::Play)?;
        self.state.borrow_mut().play_state = PlayState::Playing;
        Ok(())
    }

    fn pause(&self) -> Result<(), ApiError> {
        self.record(Call::Pause)?;
        self.state.borrow_mut().play_state = PlayState::Paused;
        Ok(())
    }

    fn stop(&self) -> Result<(), ApiError> {
        self.record(Call::Stop)?;
        self.state.borrow_mut().play_state = PlayState::Stopped;
        Ok(())
    }

    fn play_from_queue(&self, index: u32) -> Result<(), ApiError> {
        self.record(Call::PlayFromQueue(index))?;
        let mut state = self.state.borrow_mut();
        state.track.uri = QUEUE_URI.to_string();
        state.track.queue_index = index + 1;
        state.track.position = "0:00:00".to_string();
        Ok(())
    }

    fn seek(&self, position: &str) -> Result<(), ApiError> {
        self.record(Call::Seek(position.to_string()))?;
        self.state.borrow_mut().track.position = position.to_string();
        Ok(())
    }

    fn set_uri(&self, uri: &str, metadata: &str) -> Result<(), ApiError> {
        self.record(Call::SetUri(uri.to_string(), metadata.to_string()))?;
        let mut state = self.state.borrow_mut();
        state.track.uri = uri.to_string();
        state.track.metadata = metadata.to_string();
        Ok(())
    }
}
