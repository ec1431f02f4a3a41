//! Contracts for the speech services used by the voice command cycle.
//!
//! Capture and recognition run on the voice worker thread, so every engine
//! must be `Send + Sync`.

use std::time::Duration;

use thiserror::Error;

/// Why an utterance did not produce a transcript. Each variant has its own
/// spoken message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Listening timed out while waiting for input.")]
    Timeout,
    #[error("I didn't hear anything.")]
    NoSpeech,
    #[error("Sorry, I could not understand you.")]
    Unintelligible,
    #[error("There was an error with the speech recognition service.")]
    ServiceUnavailable(String),
}

/// Records a single utterance.
pub trait SpeechCapture: Send + Sync {
    /// Wait up to `timeout` for speech and record at most `phrase_limit` of it.
    fn listen(&self, timeout: Duration, phrase_limit: Duration) -> Result<Vec<u8>, CaptureError>;
}

/// Turns recorded audio into text.
pub trait SpeechToText: Send + Sync {
    /// Whether `recognize` can succeed at all. Checked before recording so
    /// nobody talks into the microphone for nothing.
    fn ready(&self) -> Result<(), CaptureError> {
        Ok(())
    }

    fn recognize(&self, audio: &[u8]) -> Result<String, CaptureError>;
}

/// Reads text aloud. Blocks until done; failures are the engine's to log.
pub trait SpeechSynth: Send + Sync {
    fn speak(&self, text: &str);
}
