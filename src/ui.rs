//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::config::{PlaybackSettings, UiSettings};
use crate::player::{Controller, Status};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("enter", "play selected song");
    map.insert("space/p", "play/pause");
    map.insert("x", "stop");
    map.insert("h/l", "prev/next song");
    // H/L is filled dynamically from config.
    map.insert("s", "shuffle");
    map.insert("a", "add files");
    map.insert("v", "voice command");
    map.insert(":", "type command");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating the seek step.
fn controls_text(seek_step_percent: f64) -> String {
    let order = [
        "j/k", "h/l", "H/L", "enter", "space/p", "x", "s", "a", "v", ":", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] seek -/+{seek_step_percent}%"))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Now-playing, transport state and the last message, joined for the status box.
fn status_text(ctl: &Controller, app: &App, listening: bool) -> String {
    let mut parts: Vec<String> = Vec::new();

    match (ctl.status(), ctl.current_track()) {
        (Status::Stopped, _) | (_, None) => parts.push("Stopped".to_string()),
        (Status::Playing, Some(t)) => parts.push(format!("Playing: {}", t.name)),
        (Status::Paused, Some(t)) => parts.push(format!("Paused: {}", t.name)),
    }
    parts.push(format!("Tracks: {}", ctl.playlist().len()));
    if listening {
        parts.push("Listening...".to_string());
    }
    if let Some(msg) = &app.message {
        parts.push(msg.clone());
    }

    parts.join(" • ")
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ctl: &Controller,
    listening: bool,
    ui_settings: &UiSettings,
    playback_settings: &PlaybackSettings,
) {
    let prompt_height = if app.prompt.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(prompt_height),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" murmur ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(ctl, app, listening))
        .block(bordered(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Playlist, centered on the selection when it does not fit.
    {
        let playlist = ctl.playlist();
        let current = ctl.state().current;
        let total = playlist.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let sel = app.selected.min(total.saturating_sub(1));
        let (start, end) = if total <= list_height || list_height == 0 {
            (0, total)
        } else {
            let half = list_height / 2;
            let start = sel.saturating_sub(half).min(total - list_height);
            (start, start + list_height)
        };

        let items: Vec<ListItem> = playlist
            .iter()
            .enumerate()
            .skip(start)
            .take(end - start)
            .map(|(i, t)| {
                if Some(i) == current {
                    ListItem::new(format!("♪ {}", t.name)).bold()
                } else {
                    ListItem::new(format!("  {}", t.name))
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" playlist "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(sel - start));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    let progress = ctl.state().progress;
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .gauge_style(Style::default().add_modifier(Modifier::BOLD))
        .ratio((progress.percent / 100.0).clamp(0.0, 1.0))
        .label(progress.label());
    frame.render_widget(gauge, chunks[3]);

    let footer = Paragraph::new(controls_text(playback_settings.seek_step_percent))
        .block(bordered(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    if let Some(prompt) = &app.prompt {
        let line = Paragraph::new(format!("{}█", prompt.input)).block(bordered(prompt.kind.title()));
        frame.render_widget(line, chunks[5]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::PromptKind;
    use crate::player::fakes::rig;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen(app: &App, ctl: &Controller, listening: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|f| {
                draw(
                    f,
                    app,
                    ctl,
                    listening,
                    &UiSettings::default(),
                    &PlaybackSettings::default(),
                )
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn controls_text_mentions_seek_step() {
        let text = controls_text(5.0);
        assert!(text.starts_with("[j/k] up/down | [h/l] prev/next song | [H/L] seek -/+5%"));
        assert!(text.ends_with("[q] quit"));
    }

    #[test]
    fn status_reports_transport_and_message() {
        let mut r = rig(&[("A.mp3", Some(30))]);
        let mut app = App::new();
        assert_eq!(status_text(&r.ctl, &app, false), "Stopped • Tracks: 1");

        r.ctl.play(0).unwrap();
        app.set_message("Playing: A.mp3");
        assert_eq!(
            status_text(&r.ctl, &app, true),
            "Playing: A.mp3 • Tracks: 1 • Listening... • Playing: A.mp3"
        );

        r.ctl.toggle_pause_resume().unwrap();
        assert!(status_text(&r.ctl, &app, false).starts_with("Paused: A.mp3"));
    }

    #[test]
    fn draw_shows_playlist_progress_and_prompt() {
        let mut r = rig(&[("A.mp3", Some(70)), ("B.mp3", None)]);
        r.ctl.play(0).unwrap();
        let mut app = App::new();
        app.open_prompt(PromptKind::Command);
        app.push_prompt_char('n');

        let text = screen(&app, &r.ctl, false);
        assert!(text.contains("murmur"));
        assert!(text.contains("A.mp3"));
        assert!(text.contains("B.mp3"));
        assert!(text.contains("00:00 / 01:10"));
        assert!(text.contains("command"));
    }

    #[test]
    fn draw_copes_with_empty_playlist() {
        let r = rig(&[]);
        let text = screen(&App::new(), &r.ctl, false);
        assert!(text.contains("00:00 / --:--"));
    }
}
