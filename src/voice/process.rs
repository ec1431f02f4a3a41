//! Speech engines backed by external programs.
//!
//! Each engine runs a configured argv, feeding audio on stdin and reading
//! audio or text from stdout. Processes that overrun their time limit are
//! killed.

use std::io::{self, Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, warn};

use super::engine::{CaptureError, SpeechCapture, SpeechSynth, SpeechToText};

const POLL: Duration = Duration::from_millis(20);
/// Slack on top of the listen window before a recorder is considered hung.
const CAPTURE_GRACE: Duration = Duration::from_secs(1);
const RECOGNIZE_LIMIT: Duration = Duration::from_secs(30);
const SPEAK_LIMIT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("no command configured")]
    NotConfigured,
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} timed out")]
    TimedOut { program: String },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("lost track of {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Substitute `{name}` placeholders in every argument.
fn expand(argv: &[String], vars: &[(&str, String)]) -> Vec<String> {
    argv.iter()
        .map(|arg| {
            vars.iter().fold(arg.clone(), |acc, (name, value)| {
                acc.replace(&format!("{{{name}}}"), value)
            })
        })
        .collect()
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        buf
    })
}

/// Run `argv` to completion within `limit`, returning its stdout.
fn run_with_deadline(
    argv: &[String],
    input: Option<&[u8]>,
    limit: Duration,
) -> Result<Vec<u8>, ProcessError> {
    let (program, args) = argv.split_first().ok_or(ProcessError::NotConfigured)?;
    let program = program.clone();

    let mut child = Command::new(&program)
        .args(args)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ProcessError::Spawn {
            program: program.clone(),
            source,
        })?;

    let writer = match (input, child.stdin.take()) {
        (Some(bytes), Some(mut stdin)) => {
            let bytes = bytes.to_vec();
            // A program that stops reading early just closes the pipe on us.
            Some(thread::spawn(move || {
                let _ = stdin.write_all(&bytes);
            }))
        }
        _ => None,
    };
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let deadline = Instant::now() + limit;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ProcessError::TimedOut { program });
            }
            Ok(None) => thread::sleep(POLL),
            Err(source) => return Err(ProcessError::Wait { program, source }),
        }
    };

    if let Some(w) = writer {
        let _ = w.join();
    }
    let out = stdout.and_then(|h| h.join().ok()).unwrap_or_default();
    let err = stderr.and_then(|h| h.join().ok()).unwrap_or_default();

    if !status.success() {
        return Err(ProcessError::Failed {
            program,
            status,
            stderr: String::from_utf8_lossy(&err).trim().to_string(),
        });
    }
    Ok(out)
}

/// Records an utterance by running a recorder that writes audio to stdout.
#[derive(Debug, Clone)]
pub struct CommandCapture {
    argv: Vec<String>,
}

impl CommandCapture {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

impl SpeechCapture for CommandCapture {
    fn listen(&self, timeout: Duration, phrase_limit: Duration) -> Result<Vec<u8>, CaptureError> {
        let argv = expand(
            &self.argv,
            &[
                ("timeout", timeout.as_secs().to_string()),
                ("phrase_limit", phrase_limit.as_secs().to_string()),
            ],
        );
        match run_with_deadline(&argv, None, timeout + phrase_limit + CAPTURE_GRACE) {
            Ok(audio) if audio.is_empty() => Err(CaptureError::NoSpeech),
            Ok(audio) => {
                debug!(bytes = audio.len(), "captured utterance");
                Ok(audio)
            }
            Err(ProcessError::TimedOut { .. }) => Err(CaptureError::Timeout),
            Err(e) => Err(CaptureError::ServiceUnavailable(e.to_string())),
        }
    }
}

/// Transcribes audio by piping it through a recognizer program.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    argv: Vec<String>,
}

impl CommandRecognizer {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

impl SpeechToText for CommandRecognizer {
    fn ready(&self) -> Result<(), CaptureError> {
        if self.argv.is_empty() {
            return Err(CaptureError::ServiceUnavailable(
                "voice.recognize_command is not configured".to_string(),
            ));
        }
        Ok(())
    }

    fn recognize(&self, audio: &[u8]) -> Result<String, CaptureError> {
        let out = run_with_deadline(&self.argv, Some(audio), RECOGNIZE_LIMIT)
            .map_err(|e| CaptureError::ServiceUnavailable(e.to_string()))?;
        let text = String::from_utf8_lossy(&out).trim().to_string();
        if text.is_empty() {
            return Err(CaptureError::Unintelligible);
        }
        debug!(%text, "recognized");
        Ok(text)
    }
}

/// Speaks by running a text-to-speech program with `{text}` substituted.
#[derive(Debug, Clone)]
pub struct CommandSynth {
    argv: Vec<String>,
}

impl CommandSynth {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

impl SpeechSynth for CommandSynth {
    fn speak(&self, text: &str) {
        if self.argv.is_empty() {
            return;
        }
        let argv = expand(&self.argv, &[("text", text.to_string())]);
        if let Err(e) = run_with_deadline(&argv, None, SPEAK_LIMIT) {
            warn!(error = %e, "speech synthesis failed");
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn expand_substitutes_every_placeholder() {
        let got = expand(
            &argv(&["rec", "-d", "{phrase_limit}", "--wait={timeout}", "{nope}"]),
            &[("timeout", "5".into()), ("phrase_limit", "7".into())],
        );
        assert_eq!(got, argv(&["rec", "-d", "7", "--wait=5", "{nope}"]));
    }

    #[test]
    fn capture_returns_recorder_stdout() {
        let cap = CommandCapture::new(argv(&["sh", "-c", "printf RIFF"]));
        let audio = cap
            .listen(Duration::from_secs(1), Duration::from_secs(1))
            .unwrap();
        assert_eq!(audio, b"RIFF");
    }

    #[test]
    fn capture_with_no_output_is_no_speech() {
        let cap = CommandCapture::new(argv(&["true"]));
        assert_eq!(
            cap.listen(Duration::from_secs(1), Duration::from_secs(1)),
            Err(CaptureError::NoSpeech)
        );
    }

    #[test]
    fn capture_that_overruns_times_out() {
        let cap = CommandCapture::new(argv(&["sleep", "10"]));
        assert_eq!(
            cap.listen(Duration::ZERO, Duration::ZERO),
            Err(CaptureError::Timeout)
        );
    }

    #[test]
    fn capture_with_missing_program_is_unavailable() {
        let cap = CommandCapture::new(argv(&["/nonexistent/recorder-binary"]));
        assert!(matches!(
            cap.listen(Duration::from_secs(1), Duration::from_secs(1)),
            Err(CaptureError::ServiceUnavailable(_))
        ));
    }

    #[test]
    fn recognizer_reads_transcript_from_stdout() {
        let rec = CommandRecognizer::new(argv(&["cat"]));
        assert_eq!(rec.recognize(b"  Play Blue\n").unwrap(), "Play Blue");
    }

    #[test]
    fn recognizer_errors_map_to_distinct_capture_errors() {
        let silent = CommandRecognizer::new(argv(&["sh", "-c", "cat >/dev/null"]));
        assert_eq!(silent.recognize(b"audio"), Err(CaptureError::Unintelligible));

        let failing = CommandRecognizer::new(argv(&["sh", "-c", "cat >/dev/null; exit 3"]));
        assert!(matches!(
            failing.recognize(b"audio"),
            Err(CaptureError::ServiceUnavailable(_))
        ));

        let unset = CommandRecognizer::new(Vec::new());
        assert!(matches!(
            unset.recognize(b"audio"),
            Err(CaptureError::ServiceUnavailable(_))
        ));
    }

    #[test]
    fn recognizer_is_ready_only_when_configured() {
        assert!(matches!(
            CommandRecognizer::new(Vec::new()).ready(),
            Err(CaptureError::ServiceUnavailable(_))
        ));
        assert_eq!(CommandRecognizer::new(argv(&["cat"])).ready(), Ok(()));
    }

    #[test]
    fn synth_failures_are_swallowed() {
        CommandSynth::new(argv(&["/nonexistent/tts", "{text}"])).speak("hello");
        CommandSynth::new(Vec::new()).speak("hello");
    }
}
