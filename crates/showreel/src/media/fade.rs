//! Volume ramps driven by the frame clock.
//!
//! A [`FadeController`] holds at most one [`FadeSession`]. Starting a new fade
//! replaces the running one; the caller advances it by calling
//! [`FadeController::tick`] once per frame with the current time.

use std::time::{Duration, Instant};

use super::MediaOutput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// `1 - (1 - p)^3`
    EaseOutCubic,
    /// `p^2`
    EaseInQuad,
}

impl Easing {
    pub fn apply(self, p: f32) -> f32 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Self::EaseOutCubic => 1.0 - (1.0 - p).powi(3),
            Self::EaseInQuad => p * p,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

impl FadeDirection {
    fn easing(self) -> Easing {
        match self {
            Self::In => Easing::EaseInQuad,
            Self::Out => Easing::EaseOutCubic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeSession {
    pub start: Instant,
    pub from: f32,
    pub to: f32,
    pub duration: Duration,
    pub direction: FadeDirection,
}

impl FadeSession {
    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    fn volume_at(&self, p: f32) -> f32 {
        let eased = self.direction.easing().apply(p);
        let v = match self.direction {
            FadeDirection::Out => self.from * (1.0 - eased),
            FadeDirection::In => self.to * eased,
        };
        v.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FadeState {
    #[default]
    Idle,
    Running(FadeSession),
}

#[derive(Debug, Default)]
pub struct FadeController {
    state: FadeState,
}

impl FadeController {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> FadeState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, FadeState::Running(_))
    }

    pub fn direction(&self) -> Option<FadeDirection> {
        match self.state {
            FadeState::Running(s) => Some(s.direction),
            FadeState::Idle => None,
        }
    }

    /// Stop the running ramp, leaving the volume where it is. Returns whether
    /// a ramp was running.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.is_active();
        self.state = FadeState::Idle;
        was_running
    }

    /// Ramp from silence up to `target`. The output must already be playing;
    /// this only drives its volume.
    pub fn fade_in<O: MediaOutput + ?Sized>(
        &mut self,
        output: &mut O,
        target: f32,
        duration: Duration,
        now: Instant,
    ) {
        self.cancel();
        output.set_volume(0.0);
        self.state = FadeState::Running(FadeSession {
            start: now,
            from: 0.0,
            to: target.clamp(0.0, 1.0),
            duration,
            direction: FadeDirection::In,
        });
        tracing::debug!(volume = target, ms = duration.as_millis() as u64, "fade in");
    }

    /// Ramp from the current volume down to silence, then pause.
    pub fn fade_out<O: MediaOutput + ?Sized>(
        &mut self,
        output: &mut O,
        duration: Duration,
        now: Instant,
    ) {
        self.cancel();
        let from = output.volume();
        self.state = FadeState::Running(FadeSession {
            start: now,
            from,
            to: 0.0,
            duration,
            direction: FadeDirection::Out,
        });
        tracing::debug!(from, ms = duration.as_millis() as u64, "fade out");
    }

    /// Advance the running ramp to `now`. Returns the direction of a ramp
    /// that finished on this tick.
    pub fn tick<O: MediaOutput + ?Sized>(
        &mut self,
        output: &mut O,
        now: Instant,
    ) -> Option<FadeDirection> {
        let FadeState::Running(session) = self.state else {
            return None;
        };

        let p = session.progress(now);
        if p < 1.0 {
            output.set_volume(session.volume_at(p));
            return None;
        }

        match session.direction {
            FadeDirection::In => output.set_volume(session.to),
            FadeDirection::Out => {
                output.set_volume(0.0);
                output.pause();
            }
        }
        self.state = FadeState::Idle;
        Some(session.direction)
    }
}
