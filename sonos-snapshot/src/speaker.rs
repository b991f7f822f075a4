//! [`DeviceCommands`] for a real speaker, backed by `sonos-api`

use std::sync::OnceLock;

use sonos_api::services::{av_transport, rendering_control, zone_group_topology};
use sonos_api::{ApiError, Operation, SonosClient, UPnPOperation};
use sonos_parser::ZoneGroupState;
use tracing::{debug, warn};

use crate::device::{DeviceCommands, PlayMode, PlayState, TrackInfo};

const MASTER: &str = "Master";
const NOT_IMPLEMENTED: &str = "NOT_IMPLEMENTED";

/// One speaker addressed by host name or IP
///
/// # Example
///
/// ```rust,ignore
/// use sonos_snapshot::{Snapshot, SonosDevice};
///
/// let kitchen = SonosDevice::new("192.168.1.21");
/// let snapshot = Snapshot::capture(&kitchen)?;
/// // ... play an announcement ...
/// snapshot.restore(&kitchen)?;
/// ```
#[derive(Debug)]
pub struct SonosDevice {
    host: String,
    client: SonosClient,
    uuid: OnceLock<String>,
}

impl SonosDevice {
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_client(host, SonosClient::new())
    }

    /// Use a preconfigured client, e.g. one with a non-default port
    pub fn with_client(host: impl Into<String>, client: SonosClient) -> Self {
        Self {
            host: host.into(),
            client,
            uuid: OnceLock::new(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// The speaker's UUID (`RINCON_...`), looked up once from the household topology
    pub fn uuid(&self) -> Result<String, ApiError> {
        if let Some(uuid) = self.uuid.get() {
            return Ok(uuid.clone());
        }
        let topology = self.zone_group_state()?;
        let uuid = topology
            .member_at_host(&self.host)
            .map(|member| member.uuid.clone())
            .ok_or_else(|| self.not_in_topology())?;
        let _ = self.uuid.set(uuid.clone());
        Ok(uuid)
    }

    fn zone_group_state(&self) -> Result<ZoneGroupState, ApiError> {
        let response = self.run(zone_group_topology::get_zone_group_state())?;
        ZoneGroupState::from_xml(&response.zone_group_state)
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    fn not_in_topology(&self) -> ApiError {
        ApiError::Device(format!(
            "no zone group member is located at {}",
            self.host
        ))
    }

    fn run<Op: UPnPOperation>(&self, operation: Operation<Op>) -> Result<Op::Response, ApiError> {
        debug!(host = %self.host, action = Op::ACTION, "issuing command");
        self.client.execute(&self.host, operation)
    }
}

impl DeviceCommands for SonosDevice {
    fn is_coordinator(&self) -> Result<bool, ApiError> {
        let topology = self.zone_group_state()?;
        let member = topology
            .member_at_host(&self.host)
            .ok_or_else(|| self.not_in_topology())?;
        let _ = self.uuid.set(member.uuid.clone());
        Ok(topology.is_coordinator(&member.uuid))
    }

    fn current_track_info(&self) -> Result<TrackInfo, ApiError> {
        let info = self.run(av_transport::get_position_info())?;
        let known = |value: String| if value == NOT_IMPLEMENTED { String::new() } else { value };
        Ok(TrackInfo {
            uri: info.track_uri,
            queue_index: info.track,
            position: known(info.rel_time),
            metadata: known(info.track_meta_data),
        })
    }

    fn volume(&self) -> Result<u8, ApiError> {
        Ok(self.run(rendering_control::get_volume(MASTER.to_string()))?.current_volume)
    }

    fn set_volume(&self, volume: u8) -> Result<(), ApiError> {
        self.run(rendering_control::set_volume(MASTER.to_string(), volume))
    }

    fn is_muted(&self) -> Result<bool, ApiError> {
        Ok(self.run(rendering_control::get_mute(MASTER.to_string()))?.current_mute)
    }

    fn set_mute(&self, mute: bool) -> Result<(), ApiError> {
        self.run(rendering_control::set_mute(MASTER.to_string(), mute))
    }

    fn bass(&self) -> Result<i8, ApiError> {
        Ok(self.run(rendering_control::get_bass())?.current_bass)
    }

    fn set_bass(&self, bass: i8) -> Result<(), ApiError> {
        self.run(rendering_control::set_bass(bass))
    }

    fn treble(&self) -> Result<i8, ApiError> {
        Ok(self.run(rendering_control::get_treble())?.current_treble)
    }

    fn set_treble(&self, treble: i8) -> Result<(), ApiError> {
        self.run(rendering_control::set_treble(treble))
    }

    fn is_loudness_enabled(&self) -> Result<bool, ApiError> {
        Ok(self.run(rendering_control::get_loudness(MASTER.to_string()))?.current_loudness)
    }

    fn set_loudness(&self, loudness: bool) -> Result<(), ApiError> {
        self.run(rendering_control::set_loudness(MASTER.to_string(), loudness))
    }

    fn play_mode(&self) -> Result<PlayMode, ApiError> {
        let settings = self.run(av_transport::get_transport_settings())?;
        PlayMode::from_wire(&settings.play_mode).ok_or_else(|| {
            ApiError::Device(format!("unknown play mode '{}'", settings.play_mode))
        })
    }

    fn set_play_mode(&self, mode: PlayMode) -> Result<(), ApiError> {
        self.run(av_transport::set_play_mode(mode.as_str().to_string()))
    }

    fn play_state(&self) -> Result<PlayState, ApiError> {
        let info = self.run(av_transport::get_transport_info())?;
        Ok(PlayState::from_transport_state(&info.current_transport_state).unwrap_or_else(|| {
            warn!(
                host = %self.host,
                state = %info.current_transport_state,
                "unrecognized transport state, treating as stopped"
            );
            PlayState::Stopped
        }))
    }

    fn play(&self) -> Result<(), ApiError> {
        self.run(av_transport::play("1".to_string()))
    }

    fn pause(&self) -> Result<(), ApiError> {
        self.run(av_transport::pause())
    }

    fn stop(&self) -> Result<(), ApiError> {
        self.run(av_transport::stop())
    }

    fn play_from_queue(&self, index: u32) -> Result<(), ApiError> {
        let queue = format!("x-rincon-queue:{}#0", self.uuid()?);
        self.set_uri(&queue, "")?;
        // Transport is left as is; the restore plan decides whether to resume
        self.run(av_transport::seek("TRACK_NR".to_string(), index.saturating_add(1).to_string()))
    }

    fn seek(&self, position: &str) -> Result<(), ApiError> {
        self.run(av_transport::seek("REL_TIME".to_string(), position.to_string()))
    }

    fn set_uri(&self, uri: &str, metadata: &str) -> Result<(), ApiError> {
        self.run(av_transport::set_av_transport_uri(
            uri.to_string(),
            metadata.to_string(),
        ))
    }
}
