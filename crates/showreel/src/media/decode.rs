//! Fetch and decode a media source into memory.
//!
//! Uses Symphonia to probe the container, pick the default audio track and
//! decode every packet into interleaved `f32` samples. Slide videos go
//! through the same path: only their soundtrack is decoded.

use std::io::{Cursor, Read};

use anyhow::{Context, Result, anyhow};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// A fully decoded source.
#[derive(Debug, Clone)]
pub struct DecodedTrack {
    /// Interleaved samples.
    pub samples: Vec<f32>,
    pub channels: usize,
    pub sample_rate: u32,
}

impl DecodedTrack {
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels
        }
    }
}

/// Read the raw bytes behind `uri`: `http(s)` URLs are downloaded, anything
/// else is treated as a local path.
pub fn fetch(uri: &str) -> Result<Vec<u8>> {
    if uri.starts_with("http://") || uri.starts_with("https://") {
        let response = ureq::get(uri)
            .call()
            .with_context(|| format!("request {uri}"))?;
        let mut bytes = Vec::new();
        response
            .into_body()
            .into_reader()
            .read_to_end(&mut bytes)
            .with_context(|| format!("download {uri}"))?;
        Ok(bytes)
    } else {
        std::fs::read(uri).with_context(|| format!("open {uri}"))
    }
}

/// Container hint from the extension of the last path segment, ignoring any
/// query string.
pub fn extension_hint(uri: &str) -> Option<String> {
    let path = uri.split(['?', '#']).next().unwrap_or(uri);
    let file = path.rsplit('/').next()?;
    let (_, ext) = file.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}

pub fn load(uri: &str) -> Result<DecodedTrack> {
    let bytes = fetch(uri)?;
    decode(bytes, extension_hint(uri).as_deref())
}

pub fn decode(bytes: Vec<u8>, extension: Option<&str>) -> Result<DecodedTrack> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| anyhow!("No default audio track"))?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let channels = codec_params
        .channels
        .ok_or_else(|| anyhow!("Unknown channels"))?
        .count();
    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| anyhow!("Unknown sample rate"))?;

    let mut decoder =
        symphonia::default::get_codecs().make(&codec_params, &DecoderOptions::default())?;

    let mut samples = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(_) => break, // EOF
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(_) => continue,
        };

        let mut sample_buf = SampleBuffer::<f32>::new(decoded.frames() as u64, *decoded.spec());
        sample_buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(sample_buf.samples());
    }

    if samples.is_empty() {
        return Err(anyhow!("No audio decoded"));
    }

    Ok(DecodedTrack {
        samples,
        channels,
        sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 16-bit PCM mono WAV containing `frames` samples of silence.
    fn silent_wav(frames: u32, rate: u32) -> Vec<u8> {
        let data_len = frames * 2;
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&1u16.to_le_bytes()); // mono
        out.extend_from_slice(&rate.to_le_bytes());
        out.extend_from_slice(&(rate * 2).to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        out.resize(out.len() + data_len as usize, 0);
        out
    }

    #[test]
    fn extension_hint_ignores_query_and_case() {
        assert_eq!(extension_hint("https://x/a/Track.MP3?v=2").as_deref(), Some("mp3"));
        assert_eq!(extension_hint("clip.mp4").as_deref(), Some("mp4"));
        assert_eq!(extension_hint("https://x/noext"), None);
        assert_eq!(extension_hint("trailing."), None);
    }

    #[test]
    fn decodes_pcm_wav() {
        let track = decode(silent_wav(4410, 44_100), Some("wav")).unwrap();
        assert_eq!(track.channels, 1);
        assert_eq!(track.sample_rate, 44_100);
        assert_eq!(track.frames(), 4410);
        assert!(track.samples.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn garbage_input_is_an_error() {
        assert!(decode(vec![1, 2, 3, 4, 5], Some("mp3")).is_err());
    }

    #[test]
    fn missing_local_file_is_an_error() {
        assert!(load("/definitely/not/here.mp3").is_err());
    }
}
