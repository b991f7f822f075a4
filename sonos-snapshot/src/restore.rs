//! Ordered restore plans
//!
//! A [`RestorePlan`] lists the commands a restore issues, in the order it
//! issues them. Building the plan touches no device, so the ordering can be
//! inspected or tested on its own.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::device::{DeviceCommands, PlayMode, PlayState};
use crate::error::Result;

/// One step of a restore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestoreAction {
    /// Query the transport state and pause when it reports playing
    PauseIfPlaying,
    /// Select a 0-based queue entry and start it
    PlayFromQueue { index: u32 },
    Seek { position: String },
    SetPlayMode(PlayMode),
    SetUri { uri: String, metadata: String },
    SetMute(bool),
    SetBass(i8),
    SetTreble(i8),
    SetLoudness(bool),
    SetVolume(u8),
    Play,
    Stop,
}

impl RestoreAction {
    /// Apply this step to `device`
    pub fn apply<D: DeviceCommands + ?Sized>(&self, device: &D) -> Result<()> {
        debug!(action = ?self, "applying restore action");
        match self {
            RestoreAction::PauseIfPlaying => {
                if device.play_state()? == PlayState::Playing {
                    device.pause()?;
                }
            }
            RestoreAction::PlayFromQueue { index } => device.play_from_queue(*index)?,
            RestoreAction::Seek { position } => device.seek(position)?,
            RestoreAction::SetPlayMode(mode) => device.set_play_mode(*mode)?,
            RestoreAction::SetUri { uri, metadata } => device.set_uri(uri, metadata)?,
            RestoreAction::SetMute(mute) => device.set_mute(*mute)?,
            RestoreAction::SetBass(bass) => device.set_bass(*bass)?,
            RestoreAction::SetTreble(treble) => device.set_treble(*treble)?,
            RestoreAction::SetLoudness(loudness) => device.set_loudness(*loudness)?,
            RestoreAction::SetVolume(volume) => device.set_volume(*volume)?,
            RestoreAction::Play => device.play()?,
            RestoreAction::Stop => device.stop()?,
        }
        Ok(())
    }
}

/// Ordered list of restore steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestorePlan {
    actions: Vec<RestoreAction>,
}

impl RestorePlan {
    pub fn new(actions: Vec<RestoreAction>) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &[RestoreAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Run every step in order, stopping at the first failure
    ///
    /// Steps already applied stay applied when a later one fails.
    pub fn execute<D: DeviceCommands + ?Sized>(&self, device: &D) -> Result<()> {
        for (step, action) in self.actions.iter().enumerate() {
            action.apply(device).map_err(|e| {
                tracing::warn!(step, action = ?action, error = %e, "restore stopped partway");
                e
            })?;
        }
        Ok(())
    }
}

impl IntoIterator for RestorePlan {
    type Item = RestoreAction;
    type IntoIter = std::vec::IntoIter<RestoreAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

impl<'a> IntoIterator for &'a RestorePlan {
    type Item = &'a RestoreAction;
    type IntoIter = std::slice::Iter<'a, RestoreAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
