mod app;
mod audio;
mod config;
mod library;
mod player;
mod runtime;
mod ui;
mod voice;

fn main() {
    if let Err(e) = runtime::run() {
        eprintln!("murmur: {e}");
        std::process::exit(1);
    }
}
