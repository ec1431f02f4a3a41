use std::path::{Path, PathBuf};

/// One playable audio file, keyed by its base name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub path: PathBuf,
}

impl Track {
    /// Build a track from `path`, naming it after the file's base name.
    ///
    /// Returns `None` when the path has no usable file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        if name.trim().is_empty() {
            return None;
        }
        Some(Self {
            name,
            path: path.to_path_buf(),
        })
    }
}
