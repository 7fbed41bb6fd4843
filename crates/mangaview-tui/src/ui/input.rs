//! Keyboard and mouse input handling for the TUI.
//!
//! Keys play the role of the previous/next buttons; a left-button mouse
//! drag plays the role of a touch swipe.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;

/// Handle a key press. Returns true if the app should quit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit();
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::PageUp => app.prev_slide(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::PageDown | KeyCode::Char(' ') => {
            app.next_slide()
        }
        KeyCode::Char('f') => app.toggle_fullscreen(),
        KeyCode::Char('o') | KeyCode::Enter => app.open_link(),
        _ => {}
    }
    app.should_quit
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.drag_start(mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.drag_move(mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.drag_end(mouse.row),
        MouseEventKind::ScrollDown => app.next_slide(),
        MouseEventKind::ScrollUp => app.prev_slide(),
        _ => {}
    }
}
