//! AVTransport actions: playback, seeking, transport state and source URI

use crate::operation::ValidationError;
use crate::upnp_action;

/// Play modes accepted by `SetPlayMode`
pub const PLAY_MODES: [&str; 6] = [
    "NORMAL",
    "REPEAT_ALL",
    "REPEAT_ONE",
    "SHUFFLE_NOREPEAT",
    "SHUFFLE",
    "SHUFFLE_REPEAT_ONE",
];

/// Units accepted by `Seek`
pub const SEEK_UNITS: [&str; 3] = ["TRACK_NR", "REL_TIME", "TIME_DELTA"];

upnp_action! {
    /// Start or resume playback; speakers only accept speed `1`
    fn play => Play on AVTransport {
        speed: String => "Speed",
    } validate |request| {
        ValidationError::check_allowed("Speed", &request.speed, &["1"])
    }
}

upnp_action! {
    fn pause => Pause on AVTransport {}
}

upnp_action! {
    fn stop => Stop on AVTransport {}
}

upnp_action! {
    /// Jump to a 1-based queue track (`TRACK_NR`) or a time (`REL_TIME`, `H:MM:SS`)
    fn seek => Seek on AVTransport {
        unit: String => "Unit",
        target: String => "Target",
    } validate |request| {
        ValidationError::check_allowed("Unit", &request.unit, &SEEK_UNITS)?;
        ValidationError::check_not_empty("Target", &request.target)
    }
}

upnp_action! {
    fn get_position_info => GetPositionInfo on AVTransport {} -> PositionInfo {
        track: u32 => "Track",
        track_uri: String => "TrackURI",
        track_meta_data: String => "TrackMetaData",
        rel_time: String => "RelTime",
    }
}

upnp_action! {
    fn get_transport_info => GetTransportInfo on AVTransport {} -> TransportInfo {
        current_transport_state: String => "CurrentTransportState",
    }
}

upnp_action! {
    fn get_transport_settings => GetTransportSettings on AVTransport {} -> TransportSettings {
        play_mode: String => "PlayMode",
    }
}

upnp_action! {
    fn set_play_mode => SetPlayMode on AVTransport {
        new_play_mode: String => "NewPlayMode",
    } validate |request| {
        ValidationError::check_allowed("NewPlayMode", &request.new_play_mode, &PLAY_MODES)
    }
}

upnp_action! {
    /// Replace the transport source; metadata is DIDL-Lite, possibly empty
    fn set_av_transport_uri => SetAVTransportURI on AVTransport {
        current_uri: String => "CurrentURI",
        current_uri_meta_data: String => "CurrentURIMetaData",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{Element, UPnPOperation};
    use rstest::rstest;

    #[test]
    fn test_seek_payload() {
        let payload = seek("REL_TIME".to_string(), "0:01:12".to_string()).payload().unwrap();
        assert_eq!(
            payload,
            "<InstanceID>0</InstanceID><Unit>REL_TIME</Unit><Target>0:01:12</Target>"
        );
    }

    #[rstest]
    #[case("BEAT", "4")]
    #[case("TRACK_NR", "")]
    fn test_seek_rejects(#[case] unit: &str, #[case] target: &str) {
        assert!(seek(unit.to_string(), target.to_string()).payload().is_err());
    }

    #[test]
    fn test_play_accepts_only_normal_speed() {
        assert_eq!(
            play("1".to_string()).payload().unwrap(),
            "<InstanceID>0</InstanceID><Speed>1</Speed>"
        );
        assert!(play("2".to_string()).payload().is_err());
    }

    #[test]
    fn test_set_play_mode_checks_mode() {
        for mode in PLAY_MODES {
            assert!(set_play_mode(mode.to_string()).payload().is_ok(), "{}", mode);
        }
        assert!(matches!(
            set_play_mode("shuffle".to_string()).payload(),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_set_uri_escapes_metadata() {
        let op = set_av_transport_uri(
            "x-sonosapi-stream:s1?sid=254&flags=32".to_string(),
            "<DIDL-Lite/>".to_string(),
        );
        assert_eq!(SetAVTransportURI::ACTION, "SetAVTransportURI");
        assert_eq!(
            op.payload().unwrap(),
            "<InstanceID>0</InstanceID><CurrentURI>x-sonosapi-stream:s1?sid=254&amp;flags=32</CurrentURI><CurrentURIMetaData>&lt;DIDL-Lite/&gt;</CurrentURIMetaData>"
        );
    }

    #[test]
    fn test_position_info_response() {
        let xml = Element::parse(
            r#"<GetPositionInfoResponse><Track>3</Track><TrackDuration>0:03:58</TrackDuration><TrackMetaData>&lt;DIDL-Lite/&gt;</TrackMetaData><TrackURI>x-file-cifs://nas/a.mp3</TrackURI><RelTime>0:00:42</RelTime></GetPositionInfoResponse>"#
                .as_bytes(),
        )
        .unwrap();
        let info = GetPositionInfo::read_response(&xml).unwrap();
        assert_eq!(
            info,
            PositionInfo {
                track: 3,
                track_uri: "x-file-cifs://nas/a.mp3".to_string(),
                track_meta_data: "<DIDL-Lite/>".to_string(),
                rel_time: "0:00:42".to_string(),
            }
        );
    }

    #[test]
    fn test_transport_info_requires_state() {
        let xml = Element::parse("<GetTransportInfoResponse/>".as_bytes()).unwrap();
        assert!(GetTransportInfo::read_response(&xml).is_err());
    }
}
