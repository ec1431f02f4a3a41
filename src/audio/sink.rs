//! Utilities for creating `rodio` sinks from file paths.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::backend::LoadError;

/// Open and decode `path` without attaching it to any output.
pub(super) fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Decoder::new(BufReader::new(file)).map_err(|e| LoadError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<Sink, LoadError> {
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = open_decoder(path)?.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
