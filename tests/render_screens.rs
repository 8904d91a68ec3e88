//! Rendering through ratatui's `TestBackend`.

mod common;

use common::{key, type_text, wait_for_screen, TestEnv, THREE_SEGMENTS};
use crossterm::event::KeyCode;
use podclip::app::App;
use podclip::components::NEW_UPLOAD_LABEL;
use podclip::ScreenId;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn render(app: &mut App) -> String {
    render_sized(app, 120, 32)
}

fn render_sized(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| app.render(frame).unwrap()).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_upload_screen_has_no_reset_control() {
    let env = TestEnv::new();
    let mut app = env.app();

    let screen = render(&mut app);
    assert!(screen.contains("podclip - Upload"));
    assert!(screen.contains("Video file"));
    assert!(!screen.contains(NEW_UPLOAD_LABEL));
}

#[test]
fn test_upload_error_is_rendered() {
    let env = TestEnv::new();
    let mut app = env.app();

    type_text(&mut app, "nope.mp4");
    app.handle_event(key(KeyCode::Enter));

    let screen = render(&mut app);
    assert!(screen.contains("File not found"));
}

#[test]
fn test_processing_and_editor_show_reset_control() {
    let env = TestEnv::new();
    let video = env.write_video("show.mp4");
    let mut app = env.app();

    // No transcript yet: processing stays up with the failure hint
    app.upload_path(&video);
    let screen = render(&mut app);
    assert!(screen.contains("podclip - Processing"));
    assert!(screen.contains(NEW_UPLOAD_LABEL));
    assert!(screen.contains("show.mp4"));

    app.handle_event(key(KeyCode::Char('n')));
    env.write_transcript("show.mp4", THREE_SEGMENTS);
    app.upload_path(&video);
    assert!(wait_for_screen(&mut app, ScreenId::Editor));

    let screen = render(&mut app);
    assert!(screen.contains("podclip - Editor"));
    assert!(screen.contains(NEW_UPLOAD_LABEL));
    assert!(screen.contains("Welcome to the show."));
    assert!(screen.contains("00:03.200"));
    assert!(screen.contains("No clips yet"));
}

#[test]
fn test_help_overlay_lists_bindings() {
    let env = TestEnv::new();
    let mut app = env.app();

    app.handle_event(key(KeyCode::F(1)));
    let screen = render_sized(&mut app, 120, 50);
    assert!(screen.contains("Keyboard Shortcuts"));
    assert!(screen.contains("Mark clip start"));
}
