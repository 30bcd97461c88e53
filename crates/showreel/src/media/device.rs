//! [`MediaOutput`] backed by a CPAL output stream.
//!
//! Sources are fetched and decoded on a background thread (see
//! [`super::decode`]) and handed to the real-time callback through a shared
//! slot. The callback:
//! - outputs silence while paused, muted or still loading, without advancing
//! - applies volume, channel mapping (mono↔stereo) and rate conversion
//! - flags the end of the source so the UI thread can raise [`MediaEvent::Ended`]
//!
//! The stream is opened lazily on the first `play()`; failing to open it is
//! reported as a [`PlaybackError`] and playback degrades to silence.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Context, Result, anyhow};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use super::decode::{self, DecodedTrack};
use super::{MediaEvent, MediaOutput, PlaybackError};

/// State shared between the UI thread, the loader thread and the callback.
struct Shared {
    track: Mutex<Option<Arc<DecodedTrack>>>,
    /// Fractional read position in source frames, as `f64` bits.
    position: AtomicU64,
    /// Volume as `f32` bits.
    volume: AtomicU32,
    paused: AtomicBool,
    muted: AtomicBool,
    looping: AtomicBool,
    ended: AtomicBool,
    /// Bumped on every `load` while holding `track`; loader threads only
    /// publish if it still matches.
    generation: AtomicU64,
    load_error: Mutex<Option<PlaybackError>>,
}

impl Shared {
    fn new() -> Self {
        Self {
            track: Mutex::new(None),
            position: AtomicU64::new(0f64.to_bits()),
            volume: AtomicU32::new(1f32.to_bits()),
            paused: AtomicBool::new(true),
            muted: AtomicBool::new(false),
            looping: AtomicBool::new(false),
            ended: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            load_error: Mutex::new(None),
        }
    }

    /// Start a new load: clear the slot and return its generation.
    fn begin_load(&self) -> u64 {
        if let Ok(mut err) = self.load_error.lock() {
            *err = None;
        }
        match self.track.lock() {
            Ok(mut slot) => {
                *slot = None;
                self.generation.fetch_add(1, Ordering::SeqCst) + 1
            }
            Err(_) => self.generation.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Store the outcome of load `generation` unless a newer load has
    /// started. The check runs under the `track` lock, so it cannot
    /// interleave with `begin_load`.
    fn publish(&self, generation: u64, result: Result<DecodedTrack, PlaybackError>) -> bool {
        let Ok(mut slot) = self.track.lock() else {
            return false;
        };
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        match result {
            Ok(track) => *slot = Some(Arc::new(track)),
            Err(e) => {
                if let Ok(mut err) = self.load_error.lock() {
                    *err = Some(e);
                }
            }
        }
        true
    }

    fn take_load_error(&self) -> Option<PlaybackError> {
        self.load_error.lock().ok().and_then(|mut err| err.take())
    }

    fn volume(&self) -> f32 {
        f32::from_bits(self.volume.load(Ordering::Relaxed))
    }

    fn position(&self) -> f64 {
        f64::from_bits(self.position.load(Ordering::Relaxed))
    }

    fn set_position(&self, frames: f64) {
        self.position.store(frames.to_bits(), Ordering::Relaxed);
    }
}

pub struct CpalOutput {
    label: &'static str,
    device_hint: Option<String>,
    shared: Arc<Shared>,
    stream: Option<cpal::Stream>,
    events: VecDeque<MediaEvent>,
}

impl CpalOutput {
    pub fn new(label: &'static str, device_hint: Option<String>) -> Self {
        Self {
            label,
            device_hint,
            shared: Arc::new(Shared::new()),
            stream: None,
            events: VecDeque::new(),
        }
    }

    fn open_stream(&mut self) -> Result<(), PlaybackError> {
        if self.stream.is_some() {
            return Ok(());
        }
        let host = cpal::default_host();
        let device = pick_device(&host, self.device_hint.as_deref()).map_err(|e| {
            tracing::warn!(output = self.label, "output device: {e:#}");
            PlaybackError::NoDevice
        })?;
        let supported = device
            .default_output_config()
            .map_err(|e| PlaybackError::Rejected(e.to_string()))?;
        let config = supported.config();
        let stream = build_output_stream(
            &device,
            &config,
            supported.sample_format(),
            self.shared.clone(),
        )
        .map_err(|e| PlaybackError::Rejected(format!("{e:#}")))?;
        stream
            .play()
            .map_err(|e| PlaybackError::Rejected(e.to_string()))?;
        tracing::debug!(
            output = self.label,
            rate = config.sample_rate,
            channels = config.channels,
            "output stream opened"
        );
        self.stream = Some(stream);
        Ok(())
    }
}

impl MediaOutput for CpalOutput {
    fn load(&mut self, uri: &str) {
        let generation = self.shared.begin_load();
        self.shared.set_position(0.0);
        self.shared.ended.store(false, Ordering::Relaxed);

        let shared = self.shared.clone();
        let uri = uri.to_string();
        let label = self.label;
        thread::spawn(move || {
            let result = decode::load(&uri).map_err(|e| PlaybackError::Load {
                uri: uri.clone(),
                reason: format!("{e:#}"),
            });
            let summary = match &result {
                Ok(track) => Ok(track.frames()),
                Err(e) => Err(e.to_string()),
            };
            if !shared.publish(generation, result) {
                tracing::debug!(output = label, uri = %uri, "stale load discarded");
                return;
            }
            match summary {
                Ok(frames) => tracing::info!(output = label, uri = %uri, frames, "source ready"),
                Err(e) => tracing::warn!(output = label, "{e}"),
            }
        });
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.open_stream()?;
        if self.shared.paused.swap(false, Ordering::Relaxed) {
            self.events.push_back(MediaEvent::Played);
        }
        Ok(())
    }

    fn pause(&mut self) {
        if !self.shared.paused.swap(true, Ordering::Relaxed) {
            self.events.push_back(MediaEvent::Paused);
        }
    }

    fn is_paused(&self) -> bool {
        self.shared.paused.load(Ordering::Relaxed)
    }

    fn volume(&self) -> f32 {
        self.shared.volume()
    }

    fn set_volume(&mut self, volume: f32) {
        self.shared
            .volume
            .store(volume.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }

    fn is_muted(&self) -> bool {
        self.shared.muted.load(Ordering::Relaxed)
    }

    fn set_muted(&mut self, muted: bool) {
        self.shared.muted.store(muted, Ordering::Relaxed);
    }

    fn set_looping(&mut self, looping: bool) {
        self.shared.looping.store(looping, Ordering::Relaxed);
    }

    fn seek_to_start(&mut self) {
        self.shared.set_position(0.0);
        self.shared.ended.store(false, Ordering::Relaxed);
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        if let Some(err) = self.shared.take_load_error() {
            self.events.push_back(MediaEvent::Failed(err));
        }
        if self.shared.ended.swap(false, Ordering::Relaxed) {
            // The callback pauses itself at the end of a non-looping source.
            self.events.push_back(MediaEvent::Paused);
            self.events.push_back(MediaEvent::Ended);
        }
        self.events.pop_front()
    }
}

/// Pick a CPAL output device.
///
/// - If `needle` is `Some`, chooses the first output device whose name contains the substring
///   (case-insensitive).
/// - Otherwise, returns the host default output device.
pub fn pick_device(host: &cpal::Host, needle: Option<&str>) -> Result<cpal::Device> {
    if let Some(needle) = needle {
        let needle_lc = needle.to_lowercase();
        let mut devices = host.output_devices().context("No output devices")?;
        return devices
            .find(|d| {
                d.description()
                    .ok()
                    .map(|n| n.name().to_lowercase().contains(&needle_lc))
                    .unwrap_or(false)
            })
            .ok_or_else(|| anyhow!("No output device matched: {needle}"));
    }

    host.default_output_device()
        .ok_or_else(|| anyhow!("No default output device"))
}

/// Return available output device names.
pub fn list_device_names() -> Result<Vec<String>> {
    let host = cpal::default_host();
    let devices = host.output_devices().context("No output devices")?;
    let mut out = Vec::new();
    for d in devices {
        out.push(d.description()?.to_string());
    }
    Ok(out)
}

pub fn default_device_name() -> Option<String> {
    cpal::default_host()
        .default_output_device()
        .and_then(|d| d.description().ok().map(|desc| desc.to_string()))
}

fn build_output_stream(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    sample_format: cpal::SampleFormat,
    shared: Arc<Shared>,
) -> Result<cpal::Stream> {
    match sample_format {
        cpal::SampleFormat::F32 => build_stream::<f32>(device, config, shared),
        cpal::SampleFormat::I16 => build_stream::<i16>(device, config, shared),
        cpal::SampleFormat::I32 => build_stream::<i32>(device, config, shared),
        cpal::SampleFormat::U16 => build_stream::<u16>(device, config, shared),
        other => Err(anyhow!("Unsupported sample format: {other:?}")),
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    shared: Arc<Shared>,
) -> Result<cpal::Stream>
where
    T: cpal::Sample + cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels_out = config.channels as usize;
    let rate_out = config.sample_rate as f64;
    let err_fn = |err| tracing::warn!("stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _| {
            let silence = <T as cpal::Sample>::from_sample::<f32>(0.0);
            if shared.paused.load(Ordering::Relaxed) {
                data.fill(silence);
                return;
            }
            // Never block the audio thread on the loader.
            let track = match shared.track.try_lock() {
                Ok(slot) => slot.clone(),
                Err(_) => None,
            };
            let Some(track) = track else {
                data.fill(silence);
                return;
            };

            let gain = if shared.muted.load(Ordering::Relaxed) {
                0.0
            } else {
                shared.volume()
            };
            let step = track.sample_rate as f64 / rate_out;
            let looping = shared.looping.load(Ordering::Relaxed);
            let total = track.frames() as f64;
            let mut pos = shared.position();

            for frame in data.chunks_mut(channels_out) {
                if pos >= total {
                    if looping && total > 0.0 {
                        pos = 0.0;
                    } else {
                        for s in frame.iter_mut() {
                            *s = silence;
                        }
                        continue;
                    }
                }
                for (ch, s) in frame.iter_mut().enumerate() {
                    let v = sample_at(&track, pos, ch, channels_out) * gain;
                    *s = <T as cpal::Sample>::from_sample::<f32>(v);
                }
                pos += step;
            }

            if pos >= total && !looping {
                shared.paused.store(true, Ordering::Relaxed);
                shared.ended.store(true, Ordering::Relaxed);
                pos = 0.0;
            }
            shared.set_position(pos);
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

/// Linearly interpolated sample for output channel `dst_ch` at fractional
/// source frame `pos`.
///
/// Mapping rules:
/// - mono → any: duplicate channel 0
/// - stereo → mono: average L/R
/// - other layouts: clamp to the available channels
fn sample_at(track: &DecodedTrack, pos: f64, dst_ch: usize, dst_channels: usize) -> f32 {
    let frames = track.frames();
    if frames == 0 {
        return 0.0;
    }
    let i = (pos.floor() as usize).min(frames - 1);
    let j = (i + 1).min(frames - 1);
    let frac = (pos - i as f64) as f32;

    let read = |frame: usize| -> f32 {
        let base = frame * track.channels;
        match (track.channels, dst_channels) {
            (1, _) => track.samples[base],
            (2, 1) => 0.5 * (track.samples[base] + track.samples[base + 1]),
            (src, _) => track.samples[base + dst_ch.min(src - 1)],
        }
    };

    let a = read(i);
    let b = read(j);
    a + (b - a) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(channels: usize, samples: Vec<f32>) -> DecodedTrack {
        DecodedTrack {
            samples,
            channels,
            sample_rate: 48_000,
        }
    }

    #[test]
    fn mono_is_duplicated_to_stereo() {
        let t = track(1, vec![0.5, -0.5]);
        assert_eq!(sample_at(&t, 0.0, 0, 2), 0.5);
        assert_eq!(sample_at(&t, 0.0, 1, 2), 0.5);
    }

    #[test]
    fn stereo_is_averaged_to_mono() {
        let t = track(2, vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(sample_at(&t, 0.0, 0, 1), 0.5);
    }

    #[test]
    fn fractional_positions_interpolate() {
        let t = track(1, vec![0.0, 1.0]);
        assert!((sample_at(&t, 0.25, 0, 1) - 0.25).abs() < 1e-6);
        // Past the last frame holds the last sample.
        assert_eq!(sample_at(&t, 5.0, 0, 1), 1.0);
    }

    #[test]
    fn empty_track_is_silent() {
        let t = track(2, Vec::new());
        assert_eq!(sample_at(&t, 0.0, 0, 2), 0.0);
    }

    #[test]
    fn output_state_round_trips_without_a_device() {
        let mut out = CpalOutput::new("test", None);
        assert!(out.is_paused());
        out.set_volume(1.5);
        assert_eq!(out.volume(), 1.0);
        out.set_volume(-1.0);
        assert_eq!(out.volume(), 0.0);
        out.set_muted(true);
        assert!(out.is_muted());
        out.pause();
        assert_eq!(out.poll_event(), None);
    }

    #[test]
    fn stale_load_does_not_overwrite_a_newer_one() {
        let shared = Shared::new();
        let first = shared.begin_load();
        let second = shared.begin_load();
        assert!(!shared.publish(first, Ok(track(2, vec![0.1; 4]))));
        assert!(shared.track.lock().unwrap().is_none());

        assert!(shared.publish(second, Ok(track(1, vec![0.2; 3]))));
        assert_eq!(shared.track.lock().unwrap().as_ref().unwrap().channels, 1);

        shared.begin_load();
        assert!(shared.track.lock().unwrap().is_none());
    }

    #[test]
    fn failed_load_is_reported_once() {
        let mut out = CpalOutput::new("test", None);
        let generation = out.shared.begin_load();
        let err = PlaybackError::Load {
            uri: "missing.mp3".into(),
            reason: "not found".into(),
        };
        assert!(out.shared.publish(generation, Err(err.clone())));
        assert_eq!(out.poll_event(), Some(MediaEvent::Failed(err)));
        assert_eq!(out.poll_event(), None);
    }

    #[test]
    fn failure_of_a_superseded_load_is_dropped() {
        let mut out = CpalOutput::new("test", None);
        let old = out.shared.begin_load();
        out.shared.begin_load();
        let err = PlaybackError::Load {
            uri: "old.mp3".into(),
            reason: "timeout".into(),
        };
        assert!(!out.shared.publish(old, Err(err)));
        assert_eq!(out.poll_event(), None);
    }
}
