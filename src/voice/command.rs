/// A recognized utterance, mapped onto a player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceCommand {
    PlayByName(String),
    MissingSongName,
    TogglePause,
    Stop,
    Next,
    Previous,
    Shuffle,
    AddFiles,
    Unrecognized,
}

/// Classify a transcript. Rules are tried in order and the first match wins,
/// so "stop and play next" is a `Stop`.
pub fn classify(text: &str) -> VoiceCommand {
    let text = text.trim().to_lowercase();

    if let Some(rest) = text.strip_prefix("play") {
        let name = rest.trim();
        return if name.is_empty() {
            VoiceCommand::MissingSongName
        } else {
            VoiceCommand::PlayByName(name.to_string())
        };
    }

    let has = |words: &[&str]| words.iter().any(|w| text.contains(w));
    if has(&["pause", "resume"]) {
        VoiceCommand::TogglePause
    } else if has(&["stop"]) {
        VoiceCommand::Stop
    } else if has(&["next"]) {
        VoiceCommand::Next
    } else if has(&["previous", "back"]) {
        VoiceCommand::Previous
    } else if has(&["shuffle"]) {
        VoiceCommand::Shuffle
    } else if has(&["add", "load"]) {
        VoiceCommand::AddFiles
    } else {
        VoiceCommand::Unrecognized
    }
}
