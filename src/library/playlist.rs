use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;

use super::model::Track;

/// Outcome of a single `Playlist::add`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AddResult {
    pub added: bool,
}

/// Ordered collection of tracks with unique names.
///
/// Insertion order is both display order and playback order.
#[derive(Debug, Default, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the file at `path` unless its name is taken or it is not a regular file.
    pub fn add(&mut self, path: &Path) -> AddResult {
        if !path.is_file() {
            return AddResult { added: false };
        }
        let Some(track) = Track::from_path(path) else {
            return AddResult { added: false };
        };
        if self.position(&track.name).is_some() {
            return AddResult { added: false };
        }

        self.tracks.push(track);
        AddResult { added: true }
    }

    /// Add every path in order; returns how many were accepted.
    pub fn add_all<P: AsRef<Path>>(&mut self, paths: &[P]) -> usize {
        paths
            .iter()
            .filter(|p| self.add(p.as_ref()).added)
            .count()
    }

    /// Remove a track by exact name.
    #[allow(dead_code)] // no key binding removes tracks
    pub fn remove(&mut self, name: &str) -> Option<Track> {
        let pos = self.position(name)?;
        Some(self.tracks.remove(pos))
    }

    /// Put the tracks into a uniformly random order.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tracks.shuffle(rng);
    }

    /// First track (in current order) whose name contains `query`, ignoring case.
    pub fn find_by_substring(&self, query: &str) -> Option<(usize, &Track)> {
        let needle = query.to_lowercase();
        self.tracks
            .iter()
            .enumerate()
            .find(|(_, t)| t.name.to_lowercase().contains(&needle))
    }

    /// Index of the track named exactly `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.name == name)
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }
}
