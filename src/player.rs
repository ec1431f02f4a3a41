//! Playback state machine: the controller, its state and the progress ticker.
//!
//! `Controller` is the only thing that touches the audio backend. The event
//! loop asks it for `next_deadline()` and calls `on_tick` when that passes.

mod controller;
mod notice;
mod state;
mod ticker;

pub use controller::{Controller, TickOutcome};
pub use notice::{Notice, Outcome, PlayerError};
pub use state::{Progress, Status};

#[cfg(test)]
pub(crate) mod fakes;
