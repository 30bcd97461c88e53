use rand::Rng;

use super::PlaybackError;

/// Position in a fixed background playlist.
#[derive(Debug, Clone)]
pub struct TrackRotation {
    tracks: Vec<String>,
    current: usize,
}

impl TrackRotation {
    pub fn new(tracks: Vec<String>) -> Result<Self, PlaybackError> {
        if tracks.is_empty() {
            return Err(PlaybackError::EmptyPlaylist);
        }
        Ok(Self { tracks, current: 0 })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_source(&self) -> &str {
        &self.tracks[self.current]
    }

    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1) % self.len();
        self.current
    }

    pub fn previous(&mut self) -> usize {
        let n = self.len();
        self.current = (self.current + n - 1) % n;
        self.current
    }

    /// Pick the track that follows a naturally finished one: uniformly random
    /// among all tracks except the one that just ended.
    pub fn on_track_ended<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let n = self.len();
        if n > 1 {
            // Draw from the n - 1 other slots and skip over the current one.
            let pick = rng.random_range(0..n - 1);
            self.current = if pick >= self.current { pick + 1 } else { pick };
        }
        self.current
    }
}
