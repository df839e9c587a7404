//! Key bindings: normal and vim-style.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
    FastDrop,
    Confirm,
    Pause,
    Quit,
    None,
}

/// Map key event to game action. Supports both normal (arrows, z/x) and vim (hjkl, etc.).
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return Action::None;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('p') => Action::Pause,
        KeyCode::Left | KeyCode::Char('h') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::MoveRight,
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('k') => Action::RotateCw,
        KeyCode::Char('z') | KeyCode::Char('u') => Action::RotateCcw,
        KeyCode::Down | KeyCode::Char('j') => Action::FastDrop,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Confirm,
        _ => Action::None,
    }
}
