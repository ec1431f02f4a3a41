//! Voice commands: capture an utterance off-thread, classify it, and route it
//! to the same controller operations the keyboard uses.

mod command;
mod engine;
mod process;
mod router;
mod session;

pub use command::{VoiceCommand, classify};
pub use engine::{CaptureError, SpeechCapture, SpeechSynth, SpeechToText};
pub use process::{CommandCapture, CommandRecognizer, CommandSynth};
pub use router::{Dispatch, VoiceError, dispatch};
pub use session::{Engines, Heard, VoiceSession};

use crate::config::VoiceSettings;

/// Build the process-backed engines described by `settings`.
pub fn engines_from_settings(settings: &VoiceSettings) -> Engines {
    use std::sync::Arc;

    Engines {
        capture: Arc::new(CommandCapture::new(settings.capture_command.clone())),
        recognizer: Arc::new(CommandRecognizer::new(settings.recognize_command.clone())),
        synth: Arc::new(CommandSynth::new(settings.speak_command.clone())),
    }
}
