use thiserror::Error;

use crate::player::{Controller, Outcome};

use super::command::VoiceCommand;

/// Utterances that were heard but cannot be acted on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoiceError {
    #[error("No song name provided.")]
    MissingSongName,
    #[error("Command not recognized.")]
    Unrecognized,
}

/// What the shell should do after a command was routed.
#[derive(Debug)]
pub enum Dispatch {
    /// A player operation ran.
    Done(Outcome),
    /// Ask the user which files to add.
    OpenFileSelection,
    Rejected(VoiceError),
}

/// Run `command` against the controller. Must be called on the event-loop thread.
pub fn dispatch(command: VoiceCommand, controller: &mut Controller) -> Dispatch {
    tracing::debug!(?command, "dispatching voice command");
    match command {
        VoiceCommand::PlayByName(name) => Dispatch::Done(controller.play_by_name(&name)),
        VoiceCommand::TogglePause => Dispatch::Done(controller.toggle_pause_resume()),
        VoiceCommand::Stop => Dispatch::Done(controller.stop()),
        VoiceCommand::Next => Dispatch::Done(controller.next()),
        VoiceCommand::Previous => Dispatch::Done(controller.previous()),
        VoiceCommand::Shuffle => Dispatch::Done(controller.shuffle()),
        VoiceCommand::AddFiles => Dispatch::OpenFileSelection,
        VoiceCommand::MissingSongName => Dispatch::Rejected(VoiceError::MissingSongName),
        VoiceCommand::Unrecognized => Dispatch::Rejected(VoiceError::Unrecognized),
    }
}
