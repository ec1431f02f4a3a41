use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::audio::{AudioBackend, FormatInspector};
use crate::library::{Playlist, Track};

use super::notice::{Notice, Outcome, PlayerError};
use super::state::{PlaybackState, Progress, Status};

/// What a fired tick did.
#[derive(Debug)]
pub enum TickOutcome {
    /// Nothing was due, or playback is not running.
    Idle,
    /// Progress was rendered and the next tick armed.
    Progress(Progress),
    /// The track ended and the next one was started.
    Advanced(Outcome),
    /// The track ended and playback stopped.
    Finished,
}

/// Owns the playlist and playback state and drives the audio backend.
///
/// Every transport operation, whether it comes from a key press or a voice
/// command, goes through here on the event-loop thread.
pub struct Controller {
    playlist: Playlist,
    state: PlaybackState,
    backend: Box<dyn AudioBackend>,
    inspector: Box<dyn FormatInspector>,
}

impl Controller {
    pub fn new(backend: Box<dyn AudioBackend>, inspector: Box<dyn FormatInspector>) -> Self {
        Self {
            playlist: Playlist::new(),
            state: PlaybackState::default(),
            backend,
            inspector,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.current.and_then(|i| self.playlist.get(i))
    }

    /// When the pending tick wants to run, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.ticker.deadline()
    }

    /// Load and start the track at `index`, replacing whatever is playing.
    pub fn play(&mut self, index: usize) -> Outcome {
        let Some(track) = self.playlist.get(index) else {
            return Err(PlayerError::NoSongFound);
        };
        let name = track.name.clone();
        let path = track.path.clone();

        if self.state.playing {
            self.halt();
        }
        self.state.ticker.cancel();

        self.backend.load(&path)?;
        let duration = self.probe_duration(&path);
        self.backend.play(0)?;

        self.state.current = Some(index);
        self.state.cursor = index;
        self.state.playing = true;
        self.state.paused = false;
        self.state.elapsed = 0;
        self.state.duration = duration;
        info!(track = %name, duration, "playing");

        self.advance_clock(Instant::now());
        Ok(Notice::Playing(name))
    }

    /// Halt playback and reset the position. Harmless when already stopped.
    pub fn stop(&mut self) -> Outcome {
        self.halt();
        Ok(Notice::Stopped)
    }

    /// Pause, resume, or start the track under the cursor when stopped.
    pub fn toggle_pause_resume(&mut self) -> Outcome {
        match self.state.status() {
            Status::Stopped => {
                if self.playlist.is_empty() {
                    return Err(PlayerError::NothingToPlay);
                }
                let cursor = self.state.cursor.min(self.playlist.len() - 1);
                self.play(cursor)
            }
            Status::Playing => {
                self.backend.pause();
                self.state.paused = true;
                self.state.ticker.cancel();
                self.state.render();
                debug!(elapsed = self.state.elapsed, "paused");
                Ok(Notice::Paused)
            }
            Status::Paused => {
                self.backend.unpause();
                self.state.paused = false;
                self.state.render();
                self.state.ticker.arm(Instant::now());
                let name = self.current_name();
                debug!(elapsed = self.state.elapsed, "resumed");
                Ok(Notice::Resumed(name))
            }
        }
    }

    /// Jump to `percent` (0..=100) of the current track.
    ///
    /// While stopped this only moves the counter; the next `play` still
    /// starts from the beginning.
    pub fn seek(&mut self, percent: f64) -> Outcome {
        if self.state.duration == 0 {
            return Err(PlayerError::DurationUnknown);
        }
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };
        let duration = self.state.duration;
        let target = (((percent / 100.0) * duration as f64).floor() as u64).min(duration);

        self.state.ticker.cancel();
        self.state.elapsed = target;

        if self.state.playing {
            if let Err(e) = self.backend.play(target) {
                self.halt();
                return Err(e.into());
            }
            if self.state.paused {
                self.backend.pause();
            } else {
                self.state.ticker.arm(Instant::now());
            }
        }
        self.state.render();
        debug!(target, duration, "seeked");
        Ok(Notice::Seeked(target))
    }

    /// Seek relative to the current position, in percent of the track.
    pub fn seek_by(&mut self, delta_percent: f64) -> Outcome {
        if self.state.duration == 0 {
            return Err(PlayerError::DurationUnknown);
        }
        let now = self.state.elapsed as f64 / self.state.duration as f64 * 100.0;
        self.seek(now + delta_percent)
    }

    pub fn next(&mut self) -> Outcome {
        let len = self.playlist.len();
        if len == 0 {
            return Err(PlayerError::EmptyPlaylist);
        }
        self.state.cursor = (self.state.cursor + 1) % len;
        self.play(self.state.cursor)
    }

    pub fn previous(&mut self) -> Outcome {
        let len = self.playlist.len();
        if len == 0 {
            return Err(PlayerError::EmptyPlaylist);
        }
        self.state.cursor = (self.state.cursor + len - 1) % len;

        let name = self
            .playlist
            .get(self.state.cursor)
            .map(|t| t.name.clone())
            .ok_or(PlayerError::NoSongFound)?;
        let index = self
            .playlist
            .position(&name)
            .ok_or(PlayerError::NoSongFound)?;
        self.play(index)
    }

    /// Play the first track whose name contains `query` (case-insensitive).
    pub fn play_by_name(&mut self, query: &str) -> Outcome {
        let Some((index, _)) = self.playlist.find_by_substring(query) else {
            return Err(PlayerError::NotFound(query.to_string()));
        };
        self.state.cursor = index;
        self.play(index)
    }

    /// Randomize the playlist order. The track under the cursor (and the one
    /// playing) keep their roles at their new positions.
    pub fn shuffle(&mut self) -> Outcome {
        if self.playlist.is_empty() {
            return Err(PlayerError::NothingToShuffle);
        }
        let current = self.current_track().map(|t| t.name.clone());
        let under_cursor = self.playlist.get(self.state.cursor).map(|t| t.name.clone());

        self.playlist.shuffle(&mut rand::rng());

        self.state.current = current.and_then(|n| self.playlist.position(&n));
        self.state.cursor = under_cursor
            .and_then(|n| self.playlist.position(&n))
            .unwrap_or(0);
        debug!(len = self.playlist.len(), "shuffled");
        Ok(Notice::Shuffled)
    }

    /// Add the selected files to the end of the playlist.
    pub fn add_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Outcome {
        if paths.is_empty() {
            return Ok(Notice::NoFilesSelected);
        }
        let added = self.playlist.add_all(paths);
        debug!(offered = paths.len(), added, "added files");
        if added == 0 {
            Ok(Notice::AlreadyInPlaylist)
        } else {
            Ok(Notice::Added(added))
        }
    }

    /// Point the cursor at `index` without playing it.
    pub fn select(&mut self, index: usize) -> Result<(), PlayerError> {
        if index >= self.playlist.len() {
            return Err(PlayerError::NoSongFound);
        }
        self.state.cursor = index;
        Ok(())
    }

    /// Run the pending tick if it is due at `now`.
    pub fn on_tick(&mut self, now: Instant) -> TickOutcome {
        let Some(due) = self.state.ticker.take_due(now) else {
            return TickOutcome::Idle;
        };
        if self.state.status() != Status::Playing {
            self.state.render();
            return TickOutcome::Idle;
        }

        let ended = if self.state.duration > 0 {
            self.state.elapsed >= self.state.duration
        } else {
            // Unknown length: count up until the backend runs dry.
            self.backend.is_finished()
        };

        if ended {
            self.finish_track()
        } else {
            TickOutcome::Progress(self.advance_clock(due))
        }
    }

    fn finish_track(&mut self) -> TickOutcome {
        let name = self.current_name();
        let more = self.playlist.len() > 1;
        self.halt();
        debug!(track = %name, "track finished");

        if more {
            TickOutcome::Advanced(self.next())
        } else {
            TickOutcome::Finished
        }
    }

    /// Render, count one second and schedule the next tick one period
    /// after `from`.
    fn advance_clock(&mut self, from: Instant) -> Progress {
        let rendered = self.state.render();
        self.state.elapsed += 1;
        self.state.ticker.arm(from);
        rendered
    }

    fn halt(&mut self) {
        self.backend.stop();
        self.state.ticker.cancel();
        self.state.elapsed = 0;
        self.state.playing = false;
        self.state.paused = false;
        self.state.current = None;
        self.state.render();
    }

    fn probe_duration(&self, path: &Path) -> u64 {
        match self.inspector.duration_secs(path) {
            Ok(secs) => secs,
            Err(e) => {
                warn!(error = %e, "duration unknown");
                0
            }
        }
    }

    fn current_name(&self) -> String {
        self.current_track()
            .map(|t| t.name.clone())
            .unwrap_or_default()
    }
}
