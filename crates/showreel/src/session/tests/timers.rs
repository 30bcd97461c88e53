use super::*;
use crate::constants::{CONTROLS_HIDE_DELAY, INSTRUCTIONS_TIMEOUT, TRACK_SWITCH_DELAY};
use crate::viewport::DeviceClass;

#[test]
fn instructions_hide_after_timeout() {
    let t0 = Instant::now();
    let mut s = session();
    assert!(!s.instructions_visible());

    s.apply(Action::SelectLanguage(Language::EnUs), t0);
    assert!(s.instructions_visible());
    s.tick(t0 + INSTRUCTIONS_TIMEOUT - ms(1));
    assert!(s.instructions_visible());
    s.tick(t0 + INSTRUCTIONS_TIMEOUT);
    assert!(!s.instructions_visible());
}

#[test]
fn switching_language_does_not_replay_instructions() {
    let t0 = Instant::now();
    let mut s = started(t0);
    s.tick(t0 + INSTRUCTIONS_TIMEOUT);
    s.apply(Action::SwitchLanguage(Language::PtBr), t0 + ms(3000));
    assert!(!s.instructions_visible());
}

#[test]
fn desktop_controls_hide_after_inactivity() {
    let t0 = Instant::now();
    let mut s = started(t0);
    assert!(!s.controls_visible());

    s.apply(Action::PointerActivity, t0);
    assert!(s.controls_visible());
    s.tick(t0 + ms(2000));

    // Activity restarts the countdown.
    s.apply(Action::PointerActivity, t0 + ms(2000));
    s.tick(t0 + CONTROLS_HIDE_DELAY);
    assert!(s.controls_visible());
    s.tick(t0 + ms(2000) + CONTROLS_HIDE_DELAY);
    assert!(!s.controls_visible());
}

#[test]
fn pointer_leaving_hides_desktop_controls() {
    let t0 = Instant::now();
    let mut s = started(t0);
    s.apply(Action::PointerActivity, t0);
    s.apply(Action::PointerLeft, t0 + ms(100));
    assert!(!s.controls_visible());
}

#[test]
fn mobile_controls_stay_visible() {
    let t0 = Instant::now();
    let mut s = session_with(
        SessionOptions {
            device_class: DeviceClass::Mobile,
            ..SessionOptions::default()
        },
        |_| FakeOutput::new(),
    );
    assert!(s.controls_visible());

    s.apply(Action::SelectLanguage(Language::EnUs), t0);
    s.apply(Action::PointerActivity, t0);
    s.apply(Action::PointerLeft, t0 + ms(10));
    s.tick(t0 + ms(60_000));
    assert!(s.controls_visible());
}

#[test]
fn shrinking_to_mobile_pins_the_controls() {
    let t0 = Instant::now();
    let mut s = started(t0);
    s.apply(Action::PointerActivity, t0);
    s.set_device_class(DeviceClass::Mobile);
    s.tick(t0 + ms(10_000));
    assert!(s.controls_visible());
}

#[test]
fn shutdown_stops_everything() {
    let t0 = Instant::now();
    let mut s = session();
    s.apply(Action::SelectLanguage(Language::EnUs), t0);
    s.apply(Action::NextTrack, t0 + ms(100));
    s.apply(Action::PointerActivity, t0 + ms(100));

    s.shutdown();
    assert!(music(&s).paused);
    assert!(!s.music.fade().is_active());
    assert!(s.music.pending_start().is_none());
    assert!(!s.instructions_visible());

    let plays = music(&s).play_calls;
    s.tick(t0 + ms(100) + TRACK_SWITCH_DELAY);
    assert_eq!(music(&s).play_calls, plays);
}

#[test]
fn shutdown_pauses_the_active_video() {
    let t0 = Instant::now();
    let mut s = started(t0);
    go(&mut s, NavCommand::GoTo(2), t0 + ms(2000));
    s.shutdown();
    assert!(video(&s, 2).paused);
}
