use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::VoiceSettings;

use super::engine::{CaptureError, SpeechCapture, SpeechSynth, SpeechToText};

/// The three speech services a session needs.
#[derive(Clone)]
pub struct Engines {
    pub capture: Arc<dyn SpeechCapture>,
    pub recognizer: Arc<dyn SpeechToText>,
    pub synth: Arc<dyn SpeechSynth>,
}

pub type Heard = Result<String, CaptureError>;

/// Runs one capture-and-recognize cycle per trigger on a worker thread and
/// hands the transcript back to the event loop through a channel.
pub struct VoiceSession {
    engines: Engines,
    listen_timeout: Duration,
    phrase_limit: Duration,
    speak_feedback: bool,
    tx: Sender<Heard>,
    rx: Receiver<Heard>,
    in_flight: Arc<AtomicBool>,
}

impl VoiceSession {
    pub fn new(engines: Engines, settings: &VoiceSettings) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            engines,
            listen_timeout: Duration::from_secs(settings.listen_timeout_secs),
            phrase_limit: Duration::from_secs(settings.phrase_limit_secs),
            speak_feedback: settings.speak_feedback,
            tx,
            rx,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start listening. Returns `false` if a capture is already running.
    pub fn trigger(&self) -> bool {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("voice trigger ignored, already listening");
            return false;
        }

        if let Err(e) = self.engines.recognizer.ready() {
            warn!(error = ?e, "speech recognition unavailable, not recording");
            // Delivered through the channel like any other result so the
            // in-flight flag clears on the next poll.
            let _ = self.tx.send(Err(e));
            return true;
        }

        let engines = self.engines.clone();
        let tx = self.tx.clone();
        let (timeout, phrase_limit) = (self.listen_timeout, self.phrase_limit);
        let announce = self.speak_feedback;

        thread::spawn(move || {
            let heard = panic::catch_unwind(AssertUnwindSafe(|| {
                if announce {
                    engines.synth.speak("Listening for your command.");
                }
                engines
                    .capture
                    .listen(timeout, phrase_limit)
                    .and_then(|audio| engines.recognizer.recognize(&audio))
            }))
            .unwrap_or_else(|_| {
                error!("speech engine panicked");
                Err(CaptureError::ServiceUnavailable(
                    "speech engine crashed".to_string(),
                ))
            });
            info!(?heard, "voice capture finished");
            // The event loop may already be gone on shutdown.
            let _ = tx.send(heard);
        });
        true
    }

    /// Take the finished capture, if any. Clears the in-flight flag.
    pub fn poll(&self) -> Option<Heard> {
        match self.rx.try_recv() {
            Ok(heard) => {
                self.in_flight.store(false, Ordering::SeqCst);
                Some(heard)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Read `text` aloud without blocking the caller.
    pub fn say(&self, text: &str) {
        if !self.speak_feedback {
            return;
        }
        let synth = self.engines.synth.clone();
        let text = text.to_string();
        thread::spawn(move || synth.speak(&text));
    }
}
