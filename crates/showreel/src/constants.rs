use std::time::Duration;

/// Background music level after a fade-in.
pub const DEFAULT_VOLUME: f32 = 0.3;
pub const FADE_OUT_DURATION: Duration = Duration::from_millis(800);
pub const FADE_IN_DURATION: Duration = Duration::from_millis(1200);
/// Delay between loading a new track and starting it.
pub const TRACK_SWITCH_DELAY: Duration = Duration::from_millis(100);

pub const SLIDE_TRANSITION_DURATION: f32 = 0.6;
pub const CONTROLS_ANIMATION_DURATION: f32 = 0.3;
pub const INSTRUCTIONS_TIMEOUT: Duration = Duration::from_millis(2000);
pub const CONTROLS_HIDE_DELAY: Duration = Duration::from_millis(3000);

/// Minimum horizontal drag, in pixels, that counts as a swipe.
pub const SWIPE_THRESHOLD: f32 = 50.0;

const MEDIA_BASE: &str = "https://pub-af28e085dd0b492cbfd160d5cbfa0cdf.r2.dev";

pub const BACKGROUND_MUSIC_TRACKS: [&str; 4] = [
    "https://pub-af28e085dd0b492cbfd160d5cbfa0cdf.r2.dev/Gratitude%20-%20Johnny%20Brazilian%20LIve%20Sessions.mp3",
    "https://pub-af28e085dd0b492cbfd160d5cbfa0cdf.r2.dev/Cover%20Move%20(Adam%20Port)%20Johnny%20Rebouc%CC%A7as%20Audio%20Wave.mp3",
    "https://pub-af28e085dd0b492cbfd160d5cbfa0cdf.r2.dev/Baiana%20System%20Track%20Final%20Sincronizado%20Wave.mp3",
    "https://pub-af28e085dd0b492cbfd160d5cbfa0cdf.r2.dev/Johnny%20GT%2001-2.mp4",
];

pub fn background_tracks() -> Vec<String> {
    BACKGROUND_MUSIC_TRACKS
        .iter()
        .map(|t| t.to_string())
        .collect()
}

pub fn media_url(file: &str) -> String {
    format!("{MEDIA_BASE}/{file}")
}

/// Human-readable name for a track URI: the last path segment, percent-decoded
/// for the few escapes the playlist uses.
pub fn track_title(uri: &str) -> String {
    let file = uri.rsplit('/').next().unwrap_or(uri);
    let stem = file.rsplit_once('.').map(|(s, _)| s).unwrap_or(file);
    stem.replace("%20", " ")
        .replace("%CC%A7", "\u{0327}")
        .replace("%C3%A7", "ç")
        .replace("%28", "(")
        .replace("%29", ")")
}
