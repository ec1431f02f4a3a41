//! Application model types: `App` and `Prompt`.

use std::path::PathBuf;

/// What an open prompt's input will be used for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PromptKind {
    /// Paths to add, separated by `;`.
    AddFiles,
    /// A command phrase, classified like a spoken one.
    Command,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::AddFiles => " add files (paths separated by ';') ",
            Self::Command => " command ",
        }
    }
}

/// A single-line text prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

impl Prompt {
    /// Split the input into non-empty, trimmed paths.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.input
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect()
    }
}

/// The main application model.
#[derive(Debug, Default)]
pub struct App {
    pub selected: usize,
    /// Last notice or error, shown in the status line.
    pub message: Option<String>,
    pub prompt: Option<Prompt>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move selection down, wrapping to the top.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % len;
    }

    /// Move selection up, wrapping to the bottom.
    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected.min(len - 1) + len - 1) % len;
    }

    /// Keep the selection inside a playlist of `len` tracks.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Highlight the track that is now playing.
    pub fn follow(&mut self, current: Option<usize>) {
        if let Some(i) = current {
            self.selected = i;
        }
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn open_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some(Prompt {
            kind,
            input: String::new(),
        });
    }

    pub fn is_prompting(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn push_prompt_char(&mut self, c: char) {
        if let Some(p) = self.prompt.as_mut() {
            p.input.push(c);
        }
    }

    pub fn pop_prompt_char(&mut self) {
        if let Some(p) = self.prompt.as_mut() {
            p.input.pop();
        }
    }

    /// Close the prompt and hand back what was typed.
    pub fn submit_prompt(&mut self) -> Option<Prompt> {
        self.prompt.take()
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }
}
