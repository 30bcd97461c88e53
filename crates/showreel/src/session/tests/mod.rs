mod timers;
mod transitions;

use std::time::{Duration, Instant};

use super::{Action, Session, SessionOptions};
use crate::constants::FADE_IN_DURATION;
use crate::deck::Deck;
use crate::language::Language;
use crate::media::rotation::TrackRotation;
use crate::media::testing::FakeOutput;
use crate::navigation::NavCommand;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

fn rotation() -> TrackRotation {
    TrackRotation::new(vec![
        "one.mp3".into(),
        "two.mp3".into(),
        "three.mp3".into(),
        "four.mp3".into(),
    ])
    .unwrap()
}

/// Build a session whose slide videos come from `make_video`.
fn session_with<F>(options: SessionOptions, make_video: F) -> Session<FakeOutput>
where
    F: FnMut(usize) -> FakeOutput,
{
    Session::new(
        Deck::default(),
        FakeOutput::new(),
        rotation(),
        make_video,
        options,
    )
    .with_seed(7)
}

fn session() -> Session<FakeOutput> {
    session_with(SessionOptions::default(), |_| FakeOutput::new())
}

/// Language chosen at `t0` and the first fade-in completed.
fn started(t0: Instant) -> Session<FakeOutput> {
    let mut s = session();
    s.apply(Action::SelectLanguage(Language::EnUs), t0);
    s.tick(t0 + FADE_IN_DURATION);
    s
}

fn go(s: &mut Session<FakeOutput>, cmd: NavCommand, now: Instant) {
    s.apply(Action::Navigate(cmd), now);
}

fn music(s: &Session<FakeOutput>) -> &FakeOutput {
    s.music.output()
}

fn music_mut(s: &mut Session<FakeOutput>) -> &mut FakeOutput {
    s.music.output_mut()
}

fn video(s: &Session<FakeOutput>, slide: usize) -> &FakeOutput {
    s.videos[slide]
        .as_ref()
        .expect("slide has a video")
        .output()
}

fn video_mut(s: &mut Session<FakeOutput>, slide: usize) -> &mut FakeOutput {
    s.videos[slide]
        .as_mut()
        .expect("slide has a video")
        .output_mut()
}
