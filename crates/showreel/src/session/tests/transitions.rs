use super::*;
use crate::constants::{DEFAULT_VOLUME, FADE_OUT_DURATION};
use crate::media::fade::FadeDirection;

#[test]
fn selecting_a_language_fades_the_music_in() {
    let t0 = Instant::now();
    let mut s = session();
    s.apply(Action::SelectLanguage(Language::EnUs), t0);

    assert!(!music(&s).paused);
    assert_eq!(music(&s).volume, 0.0);
    assert_eq!(s.music.fade().direction(), Some(FadeDirection::In));

    // Quadratic ease-in: half the time gives a quarter of the level.
    s.tick(t0 + ms(600));
    assert_close(music(&s).volume, DEFAULT_VOLUME * 0.25);

    s.tick(t0 + ms(1200));
    assert_eq!(music(&s).volume, DEFAULT_VOLUME);
    assert!(!s.music.fade().is_active());
    assert!(s.playback_state().is_playing);
}

#[test]
fn entering_a_video_slide_fades_the_music_out() {
    let t0 = Instant::now();
    let mut s = started(t0);
    let t1 = t0 + ms(5000);
    go(&mut s, NavCommand::Next, t1);
    assert_eq!(s.current_slide(), 1);
    assert!(!s.music.fade().is_active());

    let t2 = t1 + ms(5000);
    go(&mut s, NavCommand::Next, t2);
    assert_eq!(s.current_slide(), 2);
    assert_eq!(s.music.fade().direction(), Some(FadeDirection::Out));

    // Cubic ease-out: half the time leaves an eighth of the level.
    s.tick(t2 + ms(400));
    assert_close(music(&s).volume, DEFAULT_VOLUME * 0.125);
    assert!(!music(&s).paused);

    s.tick(t2 + FADE_OUT_DURATION);
    assert_eq!(music(&s).volume, 0.0);
    assert!(music(&s).paused);
    assert!(!s.playback_state().is_playing);

    assert!(!video(&s, 2).paused);
    assert!(!video(&s, 2).muted);
    assert_eq!(video(&s, 2).volume, 0.4);
}

#[test]
fn leaving_a_video_slide_mid_fade_out_brings_the_music_back() {
    let t0 = Instant::now();
    let mut s = started(t0);
    let t1 = t0 + ms(5000);
    go(&mut s, NavCommand::GoTo(2), t1);
    s.tick(t1 + ms(200));
    assert_eq!(s.music.fade().direction(), Some(FadeDirection::Out));

    go(&mut s, NavCommand::GoTo(1), t1 + ms(200));
    assert_eq!(s.music.fade().direction(), Some(FadeDirection::In));
    assert!(!music(&s).paused);

    s.tick(t1 + ms(5000));
    s.tick(t1 + ms(10_000));
    assert_eq!(s.current_slide(), 1);
    assert!(!music(&s).paused);
    assert_eq!(music(&s).volume, DEFAULT_VOLUME);
    assert!(!s.music.fade().is_active());
    assert!(s.playback_state().is_playing);
}

#[test]
fn muted_exit_from_a_video_slide_keeps_the_music_down() {
    let t0 = Instant::now();
    let mut s = started(t0);
    let t1 = t0 + ms(5000);
    go(&mut s, NavCommand::GoTo(2), t1);
    s.apply(Action::ToggleMute, t1 + ms(100));
    go(&mut s, NavCommand::GoTo(1), t1 + ms(200));
    s.tick(t1 + ms(5000));
    assert!(music(&s).paused);
    assert!(!s.music.fade().is_active());
}

#[test]
fn leaving_a_video_slide_fades_the_music_back_in() {
    let t0 = Instant::now();
    let mut s = started(t0);
    let t1 = t0 + ms(5000);
    go(&mut s, NavCommand::GoTo(3), t1);
    s.tick(t1 + FADE_OUT_DURATION);
    assert!(music(&s).paused);

    let t2 = t1 + ms(5000);
    go(&mut s, NavCommand::Next, t2);
    assert_eq!(s.current_slide(), 4);
    assert!(!music(&s).paused);
    assert_eq!(music(&s).volume, 0.0);
    assert_eq!(s.music.fade().direction(), Some(FadeDirection::In));
    assert!(video(&s, 3).paused);

    s.tick(t2 + FADE_IN_DURATION);
    assert_eq!(music(&s).volume, DEFAULT_VOLUME);
}

#[test]
fn video_to_video_keeps_the_music_silent() {
    let t0 = Instant::now();
    let mut s = started(t0);
    let t1 = t0 + ms(5000);
    go(&mut s, NavCommand::GoTo(2), t1);
    s.tick(t1 + FADE_OUT_DURATION);

    let t2 = t1 + ms(2000);
    go(&mut s, NavCommand::Next, t2);
    s.tick(t2 + ms(100));
    assert_eq!(music(&s).volume, 0.0);
    s.tick(t2 + FADE_OUT_DURATION);
    assert!(music(&s).paused);

    assert!(video(&s, 2).paused);
    assert!(!video(&s, 3).paused);
}

#[test]
fn plain_transition_leaves_a_running_fade_alone() {
    let t0 = Instant::now();
    let mut s = session();
    s.apply(Action::SelectLanguage(Language::EnUs), t0);
    s.tick(t0 + ms(300));

    go(&mut s, NavCommand::Next, t0 + ms(300));
    assert_eq!(s.music.fade().direction(), Some(FadeDirection::In));

    s.tick(t0 + FADE_IN_DURATION);
    assert_eq!(music(&s).volume, DEFAULT_VOLUME);
}

#[test]
fn fade_out_supersedes_a_running_fade_in() {
    let t0 = Instant::now();
    let mut s = session();
    s.apply(Action::SelectLanguage(Language::EnUs), t0);
    s.tick(t0 + ms(300));
    let peak = music(&s).volume;
    assert!(peak > 0.0);

    go(&mut s, NavCommand::GoTo(2), t0 + ms(300));
    assert_eq!(s.music.fade().direction(), Some(FadeDirection::Out));

    let mut last = peak;
    for step in 1..=12 {
        s.tick(t0 + ms(300 + step * 100));
        let v = music(&s).volume;
        assert!(v <= last, "volume rose from {last} to {v}");
        last = v;
    }
    assert_eq!(music(&s).volume, 0.0);
    assert!(music(&s).paused);
    assert!(!s.music.fade().is_active());
}

#[test]
fn navigation_is_ignored_before_a_language_is_chosen() {
    let t0 = Instant::now();
    let mut s = session();
    go(&mut s, NavCommand::Next, t0);
    assert_eq!(s.current_slide(), 0);
    assert!(music(&s).paused);
    assert_eq!(music(&s).play_calls, 0);
}

#[test]
fn navigation_stays_in_bounds() {
    let t0 = Instant::now();
    let mut s = started(t0);
    go(&mut s, NavCommand::Previous, t0 + ms(2000));
    assert_eq!(s.current_slide(), 0);

    go(&mut s, NavCommand::Last, t0 + ms(2100));
    assert_eq!(s.current_slide(), 8);
    go(&mut s, NavCommand::Next, t0 + ms(2200));
    assert_eq!(s.current_slide(), 8);

    go(&mut s, NavCommand::First, t0 + ms(2300));
    assert_eq!(s.current_slide(), 0);
}

#[test]
fn starting_on_a_video_slide_keeps_the_music_down() {
    let t0 = Instant::now();
    let mut s = session_with(
        SessionOptions {
            start_slide: 5,
            ..SessionOptions::default()
        },
        |_| FakeOutput::new(),
    );
    assert_eq!(s.current_slide(), 5);
    s.apply(Action::SelectLanguage(Language::PtBr), t0);

    assert_eq!(music(&s).play_calls, 0);
    assert!(!video(&s, 5).paused);
    s.tick(t0 + FADE_OUT_DURATION);
    assert!(music(&s).paused);
}

#[test]
fn switching_language_keeps_playback_untouched() {
    let t0 = Instant::now();
    let mut s = started(t0);
    let plays = music(&s).play_calls;

    s.apply(Action::SwitchLanguage(Language::Es), t0 + ms(3000));
    assert_eq!(s.language(), Some(Language::Es));
    assert_eq!(s.current_slide(), 0);
    assert_eq!(music(&s).play_calls, plays);
    assert!(!s.music.fade().is_active());
}
