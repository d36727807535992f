//! Key mapping from terminal events to game commands.

use blockfall_types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a game command.
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(Command::MoveRight),

        // Rotation
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(Command::RotateCw),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('z') => Some(Command::RotateCcw),

        // Hard drop
        KeyCode::Char(' ') => Some(Command::HardDrop),

        _ => None,
    }
}

/// Check if key starts (or restarts) a session.
pub fn is_start_key(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter
    )
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
