use std::env;
use std::io;
use std::path::PathBuf;
use std::thread;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};

use crate::app::App;
use crate::audio::{LoftyInspector, RodioBackend};
use crate::library::expand_selection;
use crate::player::Controller;
use crate::voice::{self, VoiceSession};

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    let _log_guard = logging::init(&settings.log);
    info!("starting murmur");

    let backend = RodioBackend::open().inspect_err(|e| error!(error = %e, "audio output unavailable"))?;
    let mut controller = Controller::new(Box::new(backend), Box::new(LoftyInspector));
    let mut app = App::new();

    let args: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    if !args.is_empty() {
        let files = expand_selection(&args, &settings.library);
        let msg = match controller.add_files(&files) {
            Ok(notice) => notice.to_string(),
            Err(e) => e.to_string(),
        };
        app.set_message(msg);
    }

    let voice = VoiceSession::new(voice::engines_from_settings(&settings.voice), &settings.voice);

    set_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut controller, &voice);

    restore_terminal()?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        error!(error = %e, "event loop failed");
    }
    info!("exiting");
    run_result
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

/// Put the terminal back before the default hook prints the panic message.
///
/// Panics on other threads leave the UI running, so they only go to the log.
fn set_panic_hook() {
    let main = thread::current().id();
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if thread::current().id() == main {
            let _ = restore_terminal();
            hook(panic_info);
        } else {
            error!(%panic_info, "background thread panicked");
        }
    }));
}
