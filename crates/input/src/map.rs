//! Key mapping from terminal events to garden actions.

use crate::types::GardenAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which layer receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Garden,
    Menu,
}

impl InputMode {
    pub fn from_menu_open(menu_open: bool) -> Self {
        if menu_open {
            InputMode::Menu
        } else {
            InputMode::Garden
        }
    }
}

/// Map keyboard input to garden actions.
pub fn handle_key_event(key: KeyEvent, mode: InputMode) -> Option<GardenAction> {
    match mode {
        InputMode::Garden => garden_key(key.code),
        InputMode::Menu => menu_key(key.code),
    }
}

fn garden_key(code: KeyCode) -> Option<GardenAction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GardenAction::CursorLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GardenAction::CursorRight),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(GardenAction::CursorUp),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GardenAction::CursorDown),

        KeyCode::Char('f') | KeyCode::Char('F') => Some(GardenAction::FollowCursor),
        KeyCode::Enter => Some(GardenAction::OpenMenu),

        _ => None,
    }
}

fn menu_key(code: KeyCode) -> Option<GardenAction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(GardenAction::MenuUp),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GardenAction::MenuDown),
        KeyCode::Enter => Some(GardenAction::MenuConfirm),
        KeyCode::Esc => Some(GardenAction::MenuCancel),
        _ => None,
    }
}

/// Check if key should quit the game.
///
/// Esc only quits outside a menu; inside one it cancels the menu instead.
pub fn should_quit(key: KeyEvent, mode: InputMode) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        || (key.code == KeyCode::Esc && mode == InputMode::Garden)
}
