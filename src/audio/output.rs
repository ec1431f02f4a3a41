use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::backend::{AudioBackend, DeviceError, LoadError};
use super::sink::{create_sink_at, open_decoder};

/// `AudioBackend` backed by the default `rodio` output device.
pub struct RodioBackend {
    stream: OutputStream,
    loaded: Option<PathBuf>,
    sink: Option<Sink>,
}

impl RodioBackend {
    /// Open the default output device.
    pub fn open() -> Result<Self, DeviceError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| DeviceError(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the terminal UI on exit.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            loaded: None,
            sink: None,
        })
    }
}

impl AudioBackend for RodioBackend {
    fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        self.stop();
        // Decode once up front so a corrupt file fails here and not mid-play.
        open_decoder(path)?;
        self.loaded = Some(path.to_path_buf());
        Ok(())
    }

    fn play(&mut self, start_secs: u64) -> Result<(), LoadError> {
        let path = self.loaded.as_deref().ok_or(LoadError::NothingLoaded)?;
        let sink = create_sink_at(&self.stream, path, Duration::from_secs(start_secs))?;

        if let Some(old) = self.sink.take() {
            old.stop();
        }
        sink.play();
        self.sink = Some(sink);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(s) = &self.sink {
            s.pause();
        }
    }

    fn unpause(&mut self) {
        if let Some(s) = &self.sink {
            s.play();
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    fn is_finished(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.is_paused() && s.empty())
    }
}
