//! In-memory backend and inspector for exercising the controller.

use super::*;
use super::ticker::TICK_PERIOD;
use crate::audio::{AudioBackend, FormatInspector, InspectError, LoadError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Load(String),
    Play(u64),
    Pause,
    Unpause,
    Stop,
}

#[derive(Default)]
pub(crate) struct Log {
    pub(crate) calls: Vec<Call>,
    pub(crate) broken: Vec<String>,
    pub(crate) finished: bool,
}

pub(crate) struct FakeBackend(pub(crate) Rc<RefCell<Log>>);

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

impl AudioBackend for FakeBackend {
    fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        let name = file_name(path);
        let mut log = self.0.borrow_mut();
        if log.broken.contains(&name) {
            return Err(LoadError::Decode {
                path: path.to_path_buf(),
                reason: "corrupt".into(),
            });
        }
        log.finished = false;
        log.calls.push(Call::Load(name));
        Ok(())
    }

    fn play(&mut self, start_secs: u64) -> Result<(), LoadError> {
        self.0.borrow_mut().calls.push(Call::Play(start_secs));
        Ok(())
    }

    fn pause(&mut self) {
        self.0.borrow_mut().calls.push(Call::Pause);
    }

    fn unpause(&mut self) {
        self.0.borrow_mut().calls.push(Call::Unpause);
    }

    fn stop(&mut self) {
        self.0.borrow_mut().calls.push(Call::Stop);
    }

    fn is_finished(&self) -> bool {
        self.0.borrow().finished
    }
}

pub(crate) struct FakeInspector(pub(crate) HashMap<String, u64>);

impl FormatInspector for FakeInspector {
    fn duration_secs(&self, path: &Path) -> Result<u64, InspectError> {
        self.0
            .get(&file_name(path))
            .copied()
            .ok_or_else(|| InspectError {
                path: path.to_path_buf(),
                reason: "no header".into(),
            })
    }
}

pub(crate) struct Rig {
    pub(crate) ctl: Controller,
    pub(crate) log: Rc<RefCell<Log>>,
    pub(crate) clock: Instant,
    pub(crate) dir: TempDir,
}

/// Build a controller over real (empty) files; `None` means unknown length.
pub(crate) fn rig(tracks: &[(&str, Option<u64>)]) -> Rig {
    let dir = tempfile::tempdir().unwrap();
    let log = Rc::new(RefCell::new(Log::default()));
    let mut durations = HashMap::new();
    let mut paths: Vec<PathBuf> = Vec::new();
    for (name, secs) in tracks {
        let p = dir.path().join(name);
        std::fs::write(&p, b"").unwrap();
        if let Some(s) = secs {
            durations.insert(name.to_string(), *s);
        }
        paths.push(p);
    }

    let mut ctl = Controller::new(
        Box::new(FakeBackend(log.clone())),
        Box::new(FakeInspector(durations)),
    );
    ctl.add_files(&paths).unwrap();

    Rig {
        ctl,
        log,
        // Comfortably past any deadline armed from the real clock.
        clock: Instant::now() + std::time::Duration::from_secs(3600),
        dir,
    }
}

impl Rig {
    pub(crate) fn tick(&mut self) -> TickOutcome {
        self.clock += TICK_PERIOD;
        self.ctl.on_tick(self.clock)
    }

    pub(crate) fn current(&self) -> Option<String> {
        self.ctl.current_track().map(|t| t.name.clone())
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.log.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.log.borrow_mut().calls.clear();
    }

    pub(crate) fn outstanding(&self) -> usize {
        self.ctl.state().ticker.outstanding()
    }
}
