//! Playlist model and helpers that turn a user's file selection into tracks.
//!
//! `Playlist` is the ordered, name-deduplicated store the player navigates;
//! `expand_selection` resolves typed paths (files or folders) into candidates.

mod model;
mod playlist;
mod scan;

pub use model::Track;
pub use playlist::Playlist;
pub use scan::expand_selection;
