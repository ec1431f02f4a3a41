//! Application module: the view model behind the terminal UI.
//!
//! `App` holds what only the shell cares about: the highlighted row, the
//! last message shown in the status line and an open prompt, if any.
//! Playback state itself lives in the player controller.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
