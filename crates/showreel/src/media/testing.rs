//! In-memory [`MediaOutput`] for tests.

use std::collections::VecDeque;

use super::{MediaEvent, MediaOutput, PlaybackError};

#[derive(Debug)]
pub struct FakeOutput {
    pub source: Option<String>,
    pub loads: Vec<String>,
    pub paused: bool,
    pub volume: f32,
    pub muted: bool,
    pub looping: bool,
    pub position_resets: usize,
    pub play_calls: usize,
    /// Reject every play attempt while unmuted.
    pub reject_unmuted: bool,
    /// Reject every play attempt.
    pub reject_all: bool,
    events: VecDeque<MediaEvent>,
}

impl FakeOutput {
    pub fn new() -> Self {
        Self {
            source: None,
            loads: Vec::new(),
            paused: true,
            volume: 1.0,
            muted: false,
            looping: false,
            position_resets: 0,
            play_calls: 0,
            reject_unmuted: false,
            reject_all: false,
            events: VecDeque::new(),
        }
    }

    /// An output that refuses to play with sound, like a browser that has
    /// not seen a user gesture yet.
    pub fn autoplay_blocked() -> Self {
        Self {
            reject_unmuted: true,
            ..Self::new()
        }
    }

    /// Simulate the current source failing to load.
    pub fn fail_load(&mut self) {
        let uri = self.source.clone().unwrap_or_default();
        self.events.push_back(MediaEvent::Failed(PlaybackError::Load {
            uri,
            reason: "unreachable".into(),
        }));
    }

    /// Simulate the source reaching its end.
    pub fn finish(&mut self) {
        self.paused = true;
        self.events.push_back(MediaEvent::Paused);
        self.events.push_back(MediaEvent::Ended);
    }
}

impl MediaOutput for FakeOutput {
    fn load(&mut self, uri: &str) {
        self.source = Some(uri.to_string());
        self.loads.push(uri.to_string());
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.play_calls += 1;
        if self.reject_all || (self.reject_unmuted && !self.muted) {
            return Err(PlaybackError::Rejected("user gesture required".into()));
        }
        if self.paused {
            self.paused = false;
            self.events.push_back(MediaEvent::Played);
        }
        Ok(())
    }

    fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.events.push_back(MediaEvent::Paused);
        }
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn seek_to_start(&mut self) {
        self.position_resets += 1;
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        self.events.pop_front()
    }
}
