//! Contracts for the playback engine and the duration probe.
//!
//! The controller only talks to these traits; `RodioBackend` and
//! `LoftyInspector` are the real implementations.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A file could not be turned into a playable stream.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("no track loaded")]
    NothingLoaded,
}

/// The audio output could not be opened.
#[derive(Debug, Error)]
#[error("no audio output device: {0}")]
pub struct DeviceError(pub String);

/// The duration of a file could not be determined.
#[derive(Debug, Error)]
#[error("cannot read length of {}: {reason}", path.display())]
pub struct InspectError {
    pub path: PathBuf,
    pub reason: String,
}

/// Plays one stream at a time.
///
/// Every call is synchronous and happens on the event-loop thread.
pub trait AudioBackend {
    /// Open and validate `path`, replacing whatever was loaded before.
    fn load(&mut self, path: &Path) -> Result<(), LoadError>;
    /// Start the loaded stream `start_secs` seconds in.
    fn play(&mut self, start_secs: u64) -> Result<(), LoadError>;
    fn pause(&mut self);
    fn unpause(&mut self);
    /// Halt playback. Safe to call when nothing is playing.
    fn stop(&mut self);
    /// Whether the current stream has played out.
    fn is_finished(&self) -> bool;
}

/// Reads container metadata to learn a file's length.
pub trait FormatInspector {
    fn duration_secs(&self, path: &Path) -> Result<u64, InspectError>;
}
