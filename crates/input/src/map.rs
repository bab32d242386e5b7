//! Key mapping from terminal events to discrete input events.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A discrete player input. Each one maps to exactly one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    Left,
    Right,
    Down,
    Rotate,
    HardDrop,
    PauseToggle,
    Start,
}

impl InputEvent {
    pub fn command(self) -> Command {
        match self {
            InputEvent::Left => Command::MoveLeft,
            InputEvent::Right => Command::MoveRight,
            InputEvent::Down => Command::SoftDrop,
            InputEvent::Rotate => Command::Rotate,
            InputEvent::HardDrop => Command::HardDrop,
            InputEvent::PauseToggle => Command::TogglePause,
            InputEvent::Start => Command::Start,
        }
    }
}

/// Map keyboard input to input events.
///
/// Key releases map to nothing; presses and terminal auto-repeats both count.
pub fn handle_key_event(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(InputEvent::Left),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(InputEvent::Right),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(InputEvent::Down),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(InputEvent::Rotate),

        // Actions
        KeyCode::Char(' ') => Some(InputEvent::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(InputEvent::PauseToggle),
        KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => Some(InputEvent::Start),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
