//! Audio output and file inspection.
//!
//! `AudioBackend` and `FormatInspector` are the seams the player drives;
//! this module also provides their `rodio` and `lofty` implementations.

mod backend;
mod inspect;
mod output;
mod sink;

pub use backend::{AudioBackend, DeviceError, FormatInspector, InspectError, LoadError};
pub use inspect::LoftyInspector;
pub use output::RodioBackend;
