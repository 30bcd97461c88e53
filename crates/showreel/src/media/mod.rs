//! Media playback primitives.
//!
//! Everything above this module talks to audio through [`MediaOutput`], an
//! opaque playback device: the background music player and every slide video
//! own one each. The real implementation lives in [`device`]; tests drive the
//! session with an in-memory output instead.

pub mod decode;
pub mod device;
pub mod fade;
pub mod rotation;
#[cfg(test)]
pub mod testing;

use thiserror::Error;

/// Failure raised by a playback attempt.
///
/// All variants are recoverable: callers log them and continue silently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    #[error("playback rejected: {0}")]
    Rejected(String),
    #[error("no audio output device available")]
    NoDevice,
    #[error("failed to load {uri}: {reason}")]
    Load { uri: String, reason: String },
    #[error("playlist is empty")]
    EmptyPlaylist,
}

/// Notifications an output raises asynchronously.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    Played,
    Paused,
    Ended,
    /// The last `load` could not be fetched or decoded.
    Failed(PlaybackError),
}

pub trait MediaOutput {
    /// Replace the current source. Loading is asynchronous; playback of the
    /// new source starts from the beginning.
    fn load(&mut self, uri: &str);

    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    fn volume(&self) -> f32;

    /// Values outside `[0, 1]` are clamped.
    fn set_volume(&mut self, volume: f32);

    fn is_muted(&self) -> bool;

    fn set_muted(&mut self, muted: bool);

    fn set_looping(&mut self, looping: bool);

    fn seek_to_start(&mut self);

    fn poll_event(&mut self) -> Option<MediaEvent>;
}

/// Snapshot of the background music state shown by the player controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub is_muted: bool,
    pub volume: f32,
}
