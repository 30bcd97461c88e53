//! Background music: one output, one fade, one playlist position.

use std::time::Instant;

use rand::Rng;

use crate::constants::{
    DEFAULT_VOLUME, FADE_IN_DURATION, FADE_OUT_DURATION, TRACK_SWITCH_DELAY,
};
use crate::media::fade::{FadeController, FadeDirection};
use crate::media::rotation::TrackRotation;
use crate::media::{MediaEvent, MediaOutput, PlaybackError};

pub struct BackgroundMusic<O: MediaOutput> {
    output: O,
    fade: FadeController,
    rotation: TrackRotation,
    /// When the freshly loaded track may start.
    pending_start: Option<Instant>,
    playing: bool,
    /// Loads that failed in a row; stops skipping once every track failed.
    failed_loads: usize,
}

impl<O: MediaOutput> BackgroundMusic<O> {
    /// Wrap `output` and load the first track without starting it.
    pub fn new(mut output: O, rotation: TrackRotation) -> Self {
        output.load(rotation.current_source());
        Self {
            output,
            fade: FadeController::new(),
            rotation,
            pending_start: None,
            playing: false,
            failed_loads: 0,
        }
    }

    #[cfg(test)]
    pub fn output(&self) -> &O {
        &self.output
    }

    #[cfg(test)]
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn rotation(&self) -> &TrackRotation {
        &self.rotation
    }

    pub fn fade(&self) -> &FadeController {
        &self.fade
    }

    /// Mirrors the output's play/pause notifications.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_fading_out(&self) -> bool {
        self.fade.direction() == Some(FadeDirection::Out)
    }

    pub fn is_paused(&self) -> bool {
        self.output.is_paused()
    }

    pub fn volume(&self) -> f32 {
        self.output.volume()
    }

    pub fn pending_start(&self) -> Option<Instant> {
        self.pending_start
    }

    pub fn next_track(&mut self, now: Instant) {
        self.failed_loads = 0;
        self.rotation.next();
        self.switch_track(now);
    }

    pub fn previous_track(&mut self, now: Instant) {
        self.failed_loads = 0;
        self.rotation.previous();
        self.switch_track(now);
    }

    fn track_ended<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) {
        self.failed_loads = 0;
        let finished = self.rotation.current();
        self.rotation.on_track_ended(rng);
        tracing::debug!(finished, next = self.rotation.current(), "track ended");
        self.switch_track(now);
    }

    /// Skip a track that could not be loaded. Gives up after the whole
    /// playlist failed, leaving the output paused.
    fn load_failed(&mut self, err: PlaybackError, now: Instant) {
        self.failed_loads += 1;
        tracing::warn!(index = self.rotation.current(), "{err}");
        if self.failed_loads >= self.rotation.len() {
            tracing::warn!("no background track could be loaded");
            self.fade.cancel();
            self.output.pause();
            self.pending_start = None;
            return;
        }
        self.rotation.next();
        self.switch_track(now);
    }

    /// Stop the current track, load the selected one from the start and arm
    /// the delayed auto-start. A newer switch replaces a pending one.
    fn switch_track(&mut self, now: Instant) {
        self.fade.cancel();
        self.output.pause();
        self.output.seek_to_start();
        self.output.load(self.rotation.current_source());
        self.pending_start = Some(now + TRACK_SWITCH_DELAY);
        tracing::info!(
            index = self.rotation.current(),
            uri = self.rotation.current_source(),
            "background track"
        );
    }

    /// Returns true once when the pending start has come due.
    pub fn take_due_start(&mut self, now: Instant) -> bool {
        match self.pending_start {
            Some(at) if now >= at => {
                self.pending_start = None;
                true
            }
            _ => false,
        }
    }

    /// Start playback and ramp up to the default level.
    pub fn play_with_fade_in(&mut self, now: Instant) -> Result<(), PlaybackError> {
        self.output.play()?;
        self.fade
            .fade_in(&mut self.output, DEFAULT_VOLUME, FADE_IN_DURATION, now);
        Ok(())
    }

    pub fn fade_out(&mut self, now: Instant) {
        self.fade.fade_out(&mut self.output, FADE_OUT_DURATION, now);
    }

    /// Explicit user stop: no ramp.
    pub fn stop_now(&mut self) {
        self.fade.cancel();
        self.output.pause();
    }

    /// Explicit user start: no ramp. A silent output is restored to the
    /// default level so the resume is audible.
    pub fn resume_now(&mut self) -> Result<(), PlaybackError> {
        self.fade.cancel();
        if self.output.volume() <= f32::EPSILON {
            self.output.set_volume(DEFAULT_VOLUME);
        }
        self.output.play()
    }

    /// Advance the fade and drain output notifications. Track ends select a
    /// new random track.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) -> Option<FadeDirection> {
        let finished = self.fade.tick(&mut self.output, now);
        while let Some(event) = self.output.poll_event() {
            match event {
                MediaEvent::Played => self.playing = true,
                MediaEvent::Paused => self.playing = false,
                MediaEvent::Ended => self.track_ended(rng, now),
                MediaEvent::Failed(err) => self.load_failed(err, now),
            }
        }
        finished
    }

    pub fn shutdown(&mut self) {
        self.fade.cancel();
        self.pending_start = None;
        self.output.pause();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::media::testing::FakeOutput;

    fn music() -> BackgroundMusic<FakeOutput> {
        let rotation =
            TrackRotation::new(vec!["a.mp3".into(), "b.mp3".into(), "c.mp3".into()]).unwrap();
        BackgroundMusic::new(FakeOutput::new(), rotation)
    }

    #[test]
    fn first_track_is_loaded_but_not_started() {
        let m = music();
        assert_eq!(m.output().loads, vec!["a.mp3".to_string()]);
        assert!(m.is_paused());
        assert!(m.pending_start().is_none());
    }

    #[test]
    fn switching_restarts_and_arms_delayed_start() {
        let t0 = Instant::now();
        let mut m = music();
        m.play_with_fade_in(t0).unwrap();

        m.next_track(t0);
        assert!(m.is_paused());
        assert!(!m.fade().is_active());
        assert_eq!(m.output().source.as_deref(), Some("b.mp3"));
        assert_eq!(m.output().position_resets, 1);
        assert_eq!(m.pending_start(), Some(t0 + TRACK_SWITCH_DELAY));

        assert!(!m.take_due_start(t0 + Duration::from_millis(99)));
        assert!(m.take_due_start(t0 + TRACK_SWITCH_DELAY));
        assert!(!m.take_due_start(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn quick_successive_switches_keep_one_pending_start() {
        let t0 = Instant::now();
        let mut m = music();
        m.next_track(t0);
        m.previous_track(t0 + Duration::from_millis(50));
        assert_eq!(m.output().source.as_deref(), Some("a.mp3"));
        assert_eq!(
            m.pending_start(),
            Some(t0 + Duration::from_millis(50) + TRACK_SWITCH_DELAY)
        );
    }

    #[test]
    fn ended_track_moves_to_a_different_one() {
        let t0 = Instant::now();
        let mut rng = StdRng::seed_from_u64(3);
        let mut m = music();
        m.play_with_fade_in(t0).unwrap();
        m.tick(&mut rng, t0);
        assert!(m.is_playing());

        m.output_mut().finish();
        m.tick(&mut rng, t0 + Duration::from_secs(1));
        assert!(!m.is_playing());
        assert_ne!(m.rotation().current(), 0);
        assert_eq!(m.output().loads.len(), 2);
        assert!(m.pending_start().is_some());
    }

    #[test]
    fn failed_load_skips_to_the_next_track() {
        let t0 = Instant::now();
        let mut rng = StdRng::seed_from_u64(3);
        let mut m = music();
        m.output_mut().fail_load();
        m.tick(&mut rng, t0);
        assert_eq!(m.rotation().current(), 1);
        assert_eq!(m.output().source.as_deref(), Some("b.mp3"));
        assert_eq!(m.pending_start(), Some(t0 + TRACK_SWITCH_DELAY));
    }

    #[test]
    fn skipping_stops_once_every_track_failed() {
        let t0 = Instant::now();
        let mut rng = StdRng::seed_from_u64(3);
        let mut m = music();
        for _ in 0..3 {
            m.output_mut().fail_load();
            m.tick(&mut rng, t0);
        }
        assert_eq!(m.output().loads.len(), 3);
        assert!(m.pending_start().is_none());
        assert!(m.is_paused());
    }

    #[test]
    fn resume_restores_a_silent_output() {
        let mut m = music();
        m.output_mut().set_volume(0.0);
        m.resume_now().unwrap();
        assert_eq!(m.volume(), DEFAULT_VOLUME);
        assert!(!m.is_paused());
    }

    #[test]
    fn rejected_start_leaves_output_paused() {
        let t0 = Instant::now();
        let mut m = music();
        m.output_mut().reject_all = true;
        assert!(m.play_with_fade_in(t0).is_err());
        assert!(m.is_paused());
        assert!(!m.fade().is_active());
    }
}
