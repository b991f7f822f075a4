//! RenderingControl actions: volume, mute, bass, treble and loudness
//!
//! Flags travel as `0`/`1`. Bass and treble apply to the whole speaker and
//! take no channel.

use std::ops::RangeInclusive;

use crate::operation::ValidationError;
use crate::upnp_action;

/// Channels accepted by the per-channel actions
pub const CHANNELS: [&str; 3] = ["Master", "LF", "RF"];

pub const VOLUME_RANGE: RangeInclusive<u8> = 0..=100;

/// Inclusive range for bass and treble
pub const EQ_RANGE: RangeInclusive<i8> = -10..=10;

fn check_channel(channel: &str) -> Result<(), ValidationError> {
    ValidationError::check_allowed("Channel", channel, &CHANNELS)
}

upnp_action! {
    fn get_volume => GetVolume on RenderingControl {
        channel: String => "Channel",
    } validate |request| {
        check_channel(&request.channel)
    } -> Volume {
        current_volume: u8 => "CurrentVolume",
    }
}

upnp_action! {
    fn set_volume => SetVolume on RenderingControl {
        channel: String => "Channel",
        desired_volume: u8 => "DesiredVolume",
    } validate |request| {
        check_channel(&request.channel)?;
        ValidationError::check_range("DesiredVolume", request.desired_volume, VOLUME_RANGE)
    }
}

upnp_action! {
    fn get_mute => GetMute on RenderingControl {
        channel: String => "Channel",
    } validate |request| {
        check_channel(&request.channel)
    } -> Mute {
        current_mute: bool => "CurrentMute",
    }
}

upnp_action! {
    fn set_mute => SetMute on RenderingControl {
        channel: String => "Channel",
        desired_mute: bool => "DesiredMute",
    } validate |request| {
        check_channel(&request.channel)
    }
}

upnp_action! {
    fn get_bass => GetBass on RenderingControl {} -> Bass {
        current_bass: i8 => "CurrentBass",
    }
}

upnp_action! {
    fn set_bass => SetBass on RenderingControl {
        desired_bass: i8 => "DesiredBass",
    } validate |request| {
        ValidationError::check_range("DesiredBass", request.desired_bass, EQ_RANGE)
    }
}

upnp_action! {
    fn get_treble => GetTreble on RenderingControl {} -> Treble {
        current_treble: i8 => "CurrentTreble",
    }
}

upnp_action! {
    fn set_treble => SetTreble on RenderingControl {
        desired_treble: i8 => "DesiredTreble",
    } validate |request| {
        ValidationError::check_range("DesiredTreble", request.desired_treble, EQ_RANGE)
    }
}

upnp_action! {
    fn get_loudness => GetLoudness on RenderingControl {
        channel: String => "Channel",
    } validate |request| {
        check_channel(&request.channel)
    } -> Loudness {
        current_loudness: bool => "CurrentLoudness",
    }
}

upnp_action! {
    fn set_loudness => SetLoudness on RenderingControl {
        channel: String => "Channel",
        desired_loudness: bool => "DesiredLoudness",
    } validate |request| {
        check_channel(&request.channel)
    }
}
