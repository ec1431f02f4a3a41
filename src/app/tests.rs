use super::*;
use std::path::PathBuf;

#[test]
fn selection_wraps_both_ways() {
    let mut app = App::new();
    app.prev(3);
    assert_eq!(app.selected, 2);
    app.next(3);
    assert_eq!(app.selected, 0);
    app.next(3);
    app.next(3);
    assert_eq!(app.selected, 2);
}

#[test]
fn selection_on_empty_playlist_stays_at_zero() {
    let mut app = App::new();
    app.next(0);
    assert_eq!(app.selected, 0);
    app.prev(0);
    assert_eq!(app.selected, 0);
}

#[test]
fn prev_recovers_from_out_of_range_selection() {
    let mut app = App::new();
    app.selected = 10;
    app.prev(3);
    assert_eq!(app.selected, 1);

    app.selected = 7;
    app.clamp(2);
    assert_eq!(app.selected, 1);
    app.clamp(0);
    assert_eq!(app.selected, 0);
}

#[test]
fn follow_only_moves_when_something_plays() {
    let mut app = App::new();
    app.selected = 2;
    app.follow(None);
    assert_eq!(app.selected, 2);
    app.follow(Some(0));
    assert_eq!(app.selected, 0);
}

#[test]
fn prompt_editing_and_submit() {
    let mut app = App::new();
    app.push_prompt_char('x');
    assert!(!app.is_prompting());

    app.open_prompt(PromptKind::Command);
    for c in "plax".chars() {
        app.push_prompt_char(c);
    }
    app.pop_prompt_char();
    app.push_prompt_char('y');

    let p = app.submit_prompt().unwrap();
    assert_eq!(p.kind, PromptKind::Command);
    assert_eq!(p.input, "play");
    assert!(!app.is_prompting());
}

#[test]
fn cancel_discards_input() {
    let mut app = App::new();
    app.open_prompt(PromptKind::AddFiles);
    app.push_prompt_char('a');
    app.cancel_prompt();
    assert!(app.submit_prompt().is_none());
}

#[test]
fn add_prompt_splits_paths_on_semicolons() {
    let p = Prompt {
        kind: PromptKind::AddFiles,
        input: " ~/Music/a.mp3 ;; /tmp/dir ; ".into(),
    };
    assert_eq!(
        p.paths(),
        vec![PathBuf::from("~/Music/a.mp3"), PathBuf::from("/tmp/dir")]
    );
    let empty = Prompt {
        kind: PromptKind::AddFiles,
        input: "  ".into(),
    };
    assert!(empty.paths().is_empty());
}
