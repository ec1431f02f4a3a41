//! Playback state owned by the controller.

use super::ticker::Ticker;

/// Coarse transport state derived from `PlaybackState`'s flags.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// What the progress display last rendered.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Progress {
    pub elapsed: u64,
    /// Zero means the length is unknown.
    pub duration: u64,
    /// 0.0..=100.0
    pub percent: f64,
}

impl Progress {
    pub fn new(elapsed: u64, duration: u64) -> Self {
        let percent = if duration == 0 {
            0.0
        } else {
            (elapsed.min(duration) as f64 / duration as f64) * 100.0
        };
        Self {
            elapsed,
            duration,
            percent,
        }
    }

    /// `MM:SS / MM:SS`, with `--:--` for an unknown length.
    pub fn label(&self) -> String {
        let total = if self.duration == 0 {
            "--:--".to_string()
        } else {
            format_mmss(self.duration)
        };
        format!("{} / {}", format_mmss(self.elapsed), total)
    }
}

/// Format whole seconds as `MM:SS`.
pub fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// The player's single mutable state.
#[derive(Debug, Default)]
pub struct PlaybackState {
    /// Playlist index of the loaded track.
    pub current: Option<usize>,
    pub playing: bool,
    pub paused: bool,
    pub elapsed: u64,
    pub duration: u64,
    /// Navigation anchor for next/previous.
    pub cursor: usize,
    pub ticker: Ticker,
    pub progress: Progress,
}

impl PlaybackState {
    pub fn status(&self) -> Status {
        match (self.playing, self.paused) {
            (false, _) => Status::Stopped,
            (true, false) => Status::Playing,
            (true, true) => Status::Paused,
        }
    }

    /// Refresh the rendered progress from the live counters.
    pub fn render(&mut self) -> Progress {
        self.progress = Progress::new(self.elapsed, self.duration);
        self.progress
    }
}
