//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Maps a key event to an editor action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Char('+' | '=') => app.adjust_quantity(1),
        KeyCode::Char('-') => app.adjust_quantity(-1),
        KeyCode::Char(']') => app.adjust_hours(1),
        KeyCode::Char('[') => app.adjust_hours(-1),
        KeyCode::Char('p') => app.cycle_priority(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Char('n') | KeyCode::Tab => app.next_catalog(),
        KeyCode::Char('a') => app.add_candidate(),
        KeyCode::Char('c') => app.cycle_city(),
        KeyCode::Right => app.adjust_autonomy(1),
        KeyCode::Left => app.adjust_autonomy(-1),
        _ => {}
    }
}
