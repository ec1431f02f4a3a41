use std::path::Path;

use lofty::file::AudioFile;

use super::backend::{FormatInspector, InspectError};

/// Reads track length from container properties via `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyInspector;

impl FormatInspector for LoftyInspector {
    fn duration_secs(&self, path: &Path) -> Result<u64, InspectError> {
        let tagged = lofty::read_from_path(path).map_err(|e| InspectError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(tagged.properties().duration().as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_file_is_an_inspect_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("broken.mp3");
        std::fs::write(&p, b"definitely not an mp3").unwrap();

        let err = LoftyInspector.duration_secs(&p).unwrap_err();
        assert_eq!(err.path, p);
    }

    #[test]
    fn missing_file_is_an_inspect_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LoftyInspector.duration_secs(&dir.path().join("nope.mp3")).is_err());
    }
}
