use std::fmt;

use thiserror::Error;

use crate::audio::LoadError;

use super::state::format_mmss;

/// User-visible outcome of a successful player operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Playing(String),
    Paused,
    Resumed(String),
    Stopped,
    Seeked(u64),
    Shuffled,
    Added(usize),
    AlreadyInPlaylist,
    NoFilesSelected,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Playing(name) => write!(f, "Playing: {name}"),
            Notice::Paused => f.write_str("Music paused."),
            Notice::Resumed(name) => write!(f, "Resumed: {name}"),
            Notice::Stopped => f.write_str("Music stopped."),
            Notice::Seeked(secs) => write!(f, "Jumped to {}.", format_mmss(*secs)),
            Notice::Shuffled => f.write_str("Playlist shuffled."),
            Notice::Added(1) => f.write_str("Added 1 track."),
            Notice::Added(n) => write!(f, "Added {n} tracks."),
            Notice::AlreadyInPlaylist => f.write_str("Selected music already in playlist."),
            Notice::NoFilesSelected => f.write_str("No files selected."),
        }
    }
}

/// Recoverable failures of player operations. The message is shown as-is.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Selected song not found.")]
    NoSongFound,
    #[error("Please select a song to play.")]
    NothingToPlay,
    #[error("Playlist is empty.")]
    EmptyPlaylist,
    #[error("No songs to shuffle.")]
    NothingToShuffle,
    #[error("Song '{0}' not found.")]
    NotFound(String),
    #[error("Error playing the selected song: {0}")]
    Load(#[from] LoadError),
    #[error("Track length unknown; cannot seek.")]
    DurationUnknown,
}

/// Result type returned by every transport operation.
pub type Outcome = Result<Notice, PlayerError>;
