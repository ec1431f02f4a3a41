use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/murmur/config.toml` or `~/.config/murmur/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MURMUR__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub voice: VoiceSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions picked up when a directory is added (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks while expanding directories.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Percentage of the track to jump when pressing `H` / `L`.
    pub seek_step_percent: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            seek_step_percent: 5.0,
        }
    }
}

/// External programs used for the voice command cycle.
///
/// Each command is an argv vector. Placeholders are substituted before spawning:
/// `{timeout}` and `{phrase_limit}` (whole seconds) for capture, `{text}` for speech.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    /// How long to wait for speech to begin (seconds).
    pub listen_timeout_secs: u64,
    /// Maximum length of a single phrase (seconds).
    pub phrase_limit_secs: u64,
    /// Recorder writing one utterance to stdout. `{timeout}` and
    /// `{phrase_limit}` are substituted with the two limits in seconds.
    ///
    /// The recorder is killed after `listen_timeout_secs + phrase_limit_secs`
    /// plus one second, which is reported as a timeout; a recorder that exits
    /// cleanly without output means no speech. A fixed-length recorder such
    /// as `arecord -d` always produces audio, so it can report neither.
    pub capture_command: Vec<String>,
    /// Recognizer reading audio on stdin and printing the transcript on stdout.
    /// Voice capture is refused while this is empty.
    pub recognize_command: Vec<String>,
    /// Speech synthesizer used for spoken feedback.
    pub speak_command: Vec<String>,
    /// Whether voice-originated results are read back aloud.
    pub speak_feedback: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            listen_timeout_secs: 5,
            phrase_limit_secs: 5,
            // sox: wait for sound above 3%, stop after 1.5s of silence or
            // `{phrase_limit}` seconds of speech.
            capture_command: [
                "rec",
                "-q",
                "-c",
                "1",
                "-r",
                "16000",
                "-b",
                "16",
                "-t",
                "wav",
                "-",
                "silence",
                "1",
                "0.1",
                "3%",
                "1",
                "1.5",
                "3%",
                "trim",
                "0",
                "{phrase_limit}",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            recognize_command: Vec::new(),
            speak_command: vec!["espeak".to_string(), "{text}".to_string()],
            speak_feedback: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ say the word ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Directory for `murmur.log`. Defaults to the XDG state directory.
    pub directory: Option<PathBuf>,
    /// `EnvFilter` directives used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            directory: None,
            filter: "info".to_string(),
        }
    }
}
