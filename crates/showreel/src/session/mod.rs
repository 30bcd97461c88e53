//! Application state and the playback orchestrator.
//!
//! [`Session`] owns everything that changes while the showreel runs: the
//! selected language, the slide index, the mute flag, the background music
//! and the slide videos. User input reaches it as [`Action`]s through
//! [`Session::apply`]; time moves forward through [`Session::tick`]. Keeping
//! every mutation behind those two calls is what guarantees a single fade and
//! a single pending track start at any time.
//!
//! Music rules, once a language is chosen:
//! - entering a video slide fades the music out
//! - entering a plain slide while unmuted and paused plays and fades in
//! - muting and unmuting are immediate, without a ramp

#[cfg(test)]
mod tests;

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::constants::{CONTROLS_HIDE_DELAY, INSTRUCTIONS_TIMEOUT};
use crate::deck::Deck;
use crate::language::Language;
use crate::media::rotation::TrackRotation;
use crate::media::{MediaOutput, PlaybackState};
use crate::music::BackgroundMusic;
use crate::navigation::{NavCommand, Navigator};
use crate::video::SlideVideo;
use crate::viewport::DeviceClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// First choice on the language screen; starts the presentation.
    SelectLanguage(Language),
    /// Language switcher in the controls.
    SwitchLanguage(Language),
    Navigate(NavCommand),
    /// The music mute button.
    ToggleMute,
    /// The player's play/pause button.
    PlayPause,
    NextTrack,
    PreviousTrack,
    /// Tap on the "enable audio" affordance of a video slide.
    UnmuteVideo,
    /// Pointer moved or touched: show the controls.
    PointerActivity,
    /// Pointer left the window.
    PointerLeft,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub start_slide: usize,
    pub start_muted: bool,
    pub device_class: DeviceClass,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            start_slide: 0,
            start_muted: false,
            device_class: DeviceClass::Desktop,
        }
    }
}

pub struct Session<O: MediaOutput> {
    deck: Deck,
    nav: Navigator,
    language: Option<Language>,
    music: BackgroundMusic<O>,
    /// One entry per slide; `Some` for slides with a video.
    videos: Vec<Option<SlideVideo<O>>>,
    music_muted: bool,
    device_class: DeviceClass,
    instructions_until: Option<Instant>,
    controls_visible: bool,
    controls_hide_at: Option<Instant>,
    rng: StdRng,
}

impl<O: MediaOutput> Session<O> {
    pub fn new<F>(
        deck: Deck,
        music_output: O,
        rotation: TrackRotation,
        mut make_video_output: F,
        options: SessionOptions,
    ) -> Self
    where
        F: FnMut(usize) -> O,
    {
        let videos = deck
            .slides()
            .iter()
            .enumerate()
            .map(|(i, slide)| {
                slide
                    .video
                    .as_ref()
                    .map(|v| SlideVideo::new(make_video_output(i), v.url(), v.volume))
            })
            .collect();

        let mut nav = Navigator::new(deck.len());
        nav.apply(NavCommand::GoTo(options.start_slide));

        Self {
            deck,
            nav,
            language: None,
            music: BackgroundMusic::new(music_output, rotation),
            videos,
            music_muted: options.start_muted,
            device_class: options.device_class,
            instructions_until: None,
            controls_visible: options.device_class.is_mobile(),
            controls_hide_at: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Use a deterministic track shuffle.
    #[cfg(test)]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn current_slide(&self) -> usize {
        self.nav.current()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn has_video(&self) -> bool {
        self.deck.has_video(self.nav.current())
    }

    pub fn is_music_muted(&self) -> bool {
        self.music_muted
    }

    pub fn music(&self) -> &BackgroundMusic<O> {
        &self.music
    }

    pub fn current_video(&self) -> Option<&SlideVideo<O>> {
        self.videos.get(self.nav.current())?.as_ref()
    }

    fn current_video_mut(&mut self) -> Option<&mut SlideVideo<O>> {
        self.videos.get_mut(self.nav.current())?.as_mut()
    }

    pub fn needs_video_interaction(&self) -> bool {
        self.current_video().is_some_and(|v| v.needs_interaction())
    }

    pub fn playback_state(&self) -> PlaybackState {
        PlaybackState {
            is_playing: self.music.is_playing(),
            is_muted: self.music_muted,
            volume: self.music.volume(),
        }
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn instructions_visible(&self) -> bool {
        self.instructions_until.is_some()
    }

    pub fn device_class(&self) -> DeviceClass {
        self.device_class
    }

    /// The window was resized across a breakpoint.
    pub fn set_device_class(&mut self, class: DeviceClass) {
        if class == self.device_class {
            return;
        }
        self.device_class = class;
        if class.is_mobile() {
            self.controls_visible = true;
            self.controls_hide_at = None;
        }
    }

    /// The single entry point for user-driven state changes.
    pub fn apply(&mut self, action: Action, now: Instant) {
        tracing::trace!(?action, "apply");
        match action {
            Action::SelectLanguage(lang) | Action::SwitchLanguage(lang) => {
                self.set_language(lang, now)
            }
            Action::Navigate(cmd) => self.navigate(cmd, now),
            Action::ToggleMute => {
                if self.music_muted {
                    self.unmute();
                } else {
                    self.mute();
                }
            }
            Action::PlayPause => {
                if self.music.is_paused() {
                    if let Err(e) = self.music.resume_now() {
                        tracing::warn!("playback error: {e}");
                    }
                    self.set_music_muted(false);
                } else {
                    self.mute();
                }
            }
            Action::NextTrack => {
                self.music.next_track(now);
                self.set_music_muted(false);
            }
            Action::PreviousTrack => {
                self.music.previous_track(now);
                self.set_music_muted(false);
            }
            Action::UnmuteVideo => {
                let muted = self.music_muted;
                if let Some(video) = self.current_video_mut() {
                    video.unmute_by_tap(muted);
                }
            }
            Action::PointerActivity => {
                self.controls_visible = true;
                self.controls_hide_at = if self.device_class.is_mobile() {
                    None
                } else {
                    Some(now + CONTROLS_HIDE_DELAY)
                };
            }
            Action::PointerLeft => {
                if !self.device_class.is_mobile() {
                    self.controls_visible = false;
                    self.controls_hide_at = None;
                }
            }
        }
    }

    /// Advance fades, fire the delayed track start, drain media
    /// notifications and expire overlay timers.
    pub fn tick(&mut self, now: Instant) {
        if let Some(direction) = self.music.tick(&mut self.rng, now) {
            tracing::trace!(?direction, "fade finished");
        }

        if self.music.take_due_start(now)
            && self.language.is_some()
            && !self.has_video()
            && !self.music_muted
            && self.music.is_paused()
        {
            self.start_music(now);
        }

        for video in self.videos.iter_mut().flatten() {
            video.drain_events();
        }

        if self.instructions_until.is_some_and(|at| now >= at) {
            self.instructions_until = None;
        }
        if self.controls_hide_at.is_some_and(|at| now >= at) {
            self.controls_hide_at = None;
            self.controls_visible = false;
        }
    }

    /// Cancel the fade, drop pending timers and silence every output.
    pub fn shutdown(&mut self) {
        self.music.shutdown();
        for video in self.videos.iter_mut().flatten() {
            video.shutdown();
        }
        self.instructions_until = None;
        self.controls_hide_at = None;
    }

    fn set_language(&mut self, lang: Language, now: Instant) {
        let first = self.language.is_none();
        self.language = Some(lang);
        if !first {
            return;
        }
        tracing::info!(language = lang.code(), "presentation started");
        self.instructions_until = Some(now + INSTRUCTIONS_TIMEOUT);
        let muted = self.music_muted;
        if let Some(video) = self.current_video_mut() {
            video.enter(muted);
        }
        self.sync_music(now);
    }

    fn navigate(&mut self, cmd: NavCommand, now: Instant) {
        if self.language.is_none() {
            return;
        }
        let previous = self.nav.current();
        if !self.nav.apply(cmd) {
            return;
        }
        tracing::debug!(from = previous, to = self.nav.current(), "slide");

        if let Some(video) = self.videos.get_mut(previous).and_then(Option::as_mut) {
            video.leave();
        }
        let muted = self.music_muted;
        if let Some(video) = self.current_video_mut() {
            video.enter(muted);
        }
        self.sync_music(now);
    }

    /// React to the active slide: step aside for videos, come back after.
    /// A fade-out still running when a plain slide is reached is replaced by
    /// a fade-in; a running fade-in is left alone.
    fn sync_music(&mut self, now: Instant) {
        if self.language.is_none() {
            return;
        }
        if self.has_video() {
            self.music.fade_out(now);
        } else if !self.music_muted && (self.music.is_paused() || self.music.is_fading_out()) {
            self.start_music(now);
        }
    }

    fn start_music(&mut self, now: Instant) {
        if let Err(e) = self.music.play_with_fade_in(now) {
            tracing::warn!("autoplay blocked: {e}");
        }
    }

    fn mute(&mut self) {
        self.music.stop_now();
        self.set_music_muted(true);
    }

    fn unmute(&mut self) {
        if !self.has_video() {
            if let Err(e) = self.music.resume_now() {
                tracing::warn!("playback error: {e}");
            }
        }
        self.set_music_muted(false);
    }

    fn set_music_muted(&mut self, muted: bool) {
        if self.music_muted == muted {
            return;
        }
        self.music_muted = muted;
        tracing::info!(muted, "music");
        if let Some(video) = self.current_video_mut() {
            video.apply_global_mute(muted);
        }
    }
}

impl<O: MediaOutput> Drop for Session<O> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
