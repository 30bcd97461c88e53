//! Audio of a video embedded in a slide.
//!
//! Each video slide owns its output. Entering the slide tries to play with
//! sound; when that is refused it keeps looping muted and waits for a tap.

use crate::media::{MediaEvent, MediaOutput};

pub struct SlideVideo<O: MediaOutput> {
    output: O,
    source: String,
    volume: f32,
    loaded: bool,
    needs_interaction: bool,
}

impl<O: MediaOutput> SlideVideo<O> {
    pub fn new(output: O, source: String, volume: f32) -> Self {
        Self {
            output,
            source,
            volume,
            loaded: false,
            needs_interaction: false,
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

    /// The unmuted autoplay attempt was refused; a tap is needed for sound.
    pub fn needs_interaction(&self) -> bool {
        self.needs_interaction
    }

    /// The slide became visible: restart the loop and try to play with sound.
    pub fn enter(&mut self, global_muted: bool) {
        if !self.loaded {
            self.output.load(&self.source);
            self.output.set_looping(true);
            self.loaded = true;
        }
        self.output.seek_to_start();
        self.needs_interaction = false;
        tracing::debug!(source = %self.source, was_muted = self.output.is_muted(), "video entered");

        if global_muted {
            self.output.set_muted(true);
            if let Err(e) = self.output.play() {
                tracing::warn!(source = %self.source, "muted video playback failed: {e}");
            }
            return;
        }

        self.output.set_muted(false);
        self.output.set_volume(self.volume);
        if let Err(e) = self.output.play() {
            tracing::info!(source = %self.source, "autoplay with sound refused: {e}");
            self.output.set_muted(true);
            if let Err(e) = self.output.play() {
                tracing::warn!(source = %self.source, "muted video playback failed: {e}");
            }
            self.needs_interaction = true;
        }
    }

    pub fn leave(&mut self) {
        self.output.pause();
    }

    /// Follow the global mute flag. Muting always wins; unmuting only restores
    /// sound if no tap is pending.
    pub fn apply_global_mute(&mut self, muted: bool) {
        if muted {
            self.output.set_muted(true);
        } else if !self.needs_interaction {
            self.output.set_muted(false);
            self.output.set_volume(self.volume);
        }
    }

    /// The user tapped the "enable audio" affordance. Returns whether sound is
    /// now on.
    pub fn unmute_by_tap(&mut self, global_muted: bool) -> bool {
        if global_muted || !self.needs_interaction {
            return false;
        }
        self.output.set_muted(false);
        self.output.set_volume(self.volume);
        match self.output.play() {
            Ok(()) => {
                self.needs_interaction = false;
                true
            }
            Err(e) => {
                tracing::warn!(source = %self.source, "unmuted playback failed: {e}");
                self.output.set_muted(true);
                false
            }
        }
    }

    /// Discard play/pause notifications; a looping video never ends. A failed
    /// load leaves the slide showing its poster in silence.
    pub fn drain_events(&mut self) {
        while let Some(event) = self.output.poll_event() {
            if let MediaEvent::Failed(e) = event {
                tracing::warn!(source = %self.source, "video audio unavailable: {e}");
            }
        }
    }

    pub fn shutdown(&mut self) {
        self.output.pause();
    }
}
