use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info, warn};

use crate::app::{App, PromptKind};
use crate::config;
use crate::library::expand_selection;
use crate::player::{Controller, Outcome, Status, TickOutcome};
use crate::voice::{Dispatch, Heard, VoiceSession, classify, dispatch};
use crate::ui;

/// Upper bound on how long a key poll may block, so voice results are
/// picked up even when no tick is pending.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Playing index seen on the previous iteration; the selection follows
    /// it whenever it changes.
    last_current: Option<usize>,
}

/// Where a command phrase came from. Spoken ones get a spoken reply.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Origin {
    Voice,
    Typed,
}

/// Main terminal event loop: drains voice results, fires ticks, draws, and
/// handles keys. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    ctl: &mut Controller,
    voice: &VoiceSession,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState::default();

    loop {
        while let Some(heard) = voice.poll() {
            handle_heard(heard, app, ctl, voice);
        }

        handle_tick(ctl.on_tick(Instant::now()), app);
        follow_playback(&mut state, app, ctl);

        terminal.draw(|f| {
            ui::draw(
                f,
                app,
                ctl,
                voice.is_listening(),
                &settings.ui,
                &settings.playback,
            )
        })?;

        let timeout = ctl
            .next_deadline()
            .map(|due| due.saturating_duration_since(Instant::now()))
            .map_or(IDLE_POLL, |left| left.min(IDLE_POLL));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, ctl, voice) {
                    let _ = ctl.stop();
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Render an operation's result as a status-line message.
fn describe(outcome: Outcome) -> String {
    match outcome {
        Ok(notice) => notice.to_string(),
        Err(e) => {
            warn!(error = %e, "player operation failed");
            e.to_string()
        }
    }
}

fn handle_tick(outcome: TickOutcome, app: &mut App) {
    match outcome {
        TickOutcome::Idle | TickOutcome::Progress(_) => {}
        TickOutcome::Advanced(outcome) => app.set_message(describe(outcome)),
        TickOutcome::Finished => app.set_message("Music stopped."),
    }
}

fn follow_playback(state: &mut EventLoopState, app: &mut App, ctl: &Controller) {
    let current = ctl.state().current;
    if current != state.last_current {
        app.follow(current);
        state.last_current = current;
    }
    app.clamp(ctl.playlist().len());
}

fn handle_heard(heard: Heard, app: &mut App, ctl: &mut Controller, voice: &VoiceSession) {
    match heard {
        Ok(text) => {
            info!(%text, "heard");
            run_command(&text, Origin::Voice, app, ctl, voice);
        }
        Err(e) => {
            warn!(error = %e, "voice capture failed");
            let msg = e.to_string();
            voice.say(&msg);
            app.set_message(msg);
        }
    }
}

/// Classify a phrase and route it to the controller.
fn run_command(
    text: &str,
    origin: Origin,
    app: &mut App,
    ctl: &mut Controller,
    voice: &VoiceSession,
) {
    let msg = match dispatch(classify(text), ctl) {
        Dispatch::Done(outcome) => describe(outcome),
        Dispatch::OpenFileSelection => {
            app.open_prompt(PromptKind::AddFiles);
            "Select files to add.".to_string()
        }
        Dispatch::Rejected(e) => {
            debug!(%text, error = %e, "command rejected");
            e.to_string()
        }
    };
    if origin == Origin::Voice {
        voice.say(&msg);
    }
    app.set_message(msg);
}

fn submit_prompt(
    settings: &config::Settings,
    app: &mut App,
    ctl: &mut Controller,
    voice: &VoiceSession,
) {
    let Some(prompt) = app.submit_prompt() else {
        return;
    };
    match prompt.kind {
        PromptKind::AddFiles => {
            let files = expand_selection(&prompt.paths(), &settings.library);
            let msg = describe(ctl.add_files(&files));
            app.set_message(msg);
        }
        PromptKind::Command => run_command(&prompt.input, Origin::Typed, app, ctl, voice),
    }
}

fn handle_prompt_key(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    ctl: &mut Controller,
    voice: &VoiceSession,
) {
    match key.code {
        KeyCode::Esc => app.cancel_prompt(),
        KeyCode::Enter => submit_prompt(settings, app, ctl, voice),
        KeyCode::Backspace => app.pop_prompt_char(),
        KeyCode::Char(c) if !c.is_control() => app.push_prompt_char(c),
        _ => {}
    }
}

/// Handle one key press. Returns `true` when the user asked to quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    ctl: &mut Controller,
    voice: &VoiceSession,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }
    if app.is_prompting() {
        handle_prompt_key(key, settings, app, ctl, voice);
        return false;
    }

    let len = ctl.playlist().len();
    let step = settings.playback.seek_step_percent;

    let outcome = match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => {
            app.next(len);
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.prev(len);
            None
        }
        KeyCode::Enter => (len > 0).then(|| ctl.play(app.selected)),
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            if ctl.status() == Status::Stopped && len > 0 {
                // Play what is highlighted, not wherever the cursor was left.
                let _ = ctl.select(app.selected);
            }
            Some(ctl.toggle_pause_resume())
        }
        KeyCode::Char('x') => Some(ctl.stop()),
        KeyCode::Char('l') => Some(ctl.next()),
        KeyCode::Char('h') => Some(ctl.previous()),
        KeyCode::Char('L') => Some(ctl.seek_by(step)),
        KeyCode::Char('H') => Some(ctl.seek_by(-step)),
        KeyCode::Char('s') => {
            let outcome = ctl.shuffle();
            app.selected = ctl.state().cursor;
            Some(outcome)
        }
        KeyCode::Char('a') => {
            app.open_prompt(PromptKind::AddFiles);
            None
        }
        KeyCode::Char(':') => {
            app.open_prompt(PromptKind::Command);
            None
        }
        KeyCode::Char('v') => {
            if voice.trigger() {
                app.set_message("Listening...");
            } else {
                app.set_message("Already listening.");
            }
            None
        }
        _ => None,
    };

    if let Some(outcome) = outcome {
        app.set_message(describe(outcome));
    }
    false
}
