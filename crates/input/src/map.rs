//! Key mapping from terminal keys to per-player buttons.
//!
//! Both players share one keyboard:
//!
//! | button  | player one | player two |
//! |---------|------------|------------|
//! | d-pad   | arrows     | w a s d    |
//! | confirm | z          | j          |
//! | cancel  | x          | k          |
//! | hold    | c          | l          |
//! | start   | enter      | space      |
//!
//! The shoulder buttons are aliases for hold and are not bound separately.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{Button, PlayerId};

/// Map a key to the player and button it stands for.
pub fn map_key(code: KeyCode) -> Option<(PlayerId, Button)> {
    use Button::*;
    use PlayerId::*;

    let code = match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    let binding = match code {
        KeyCode::Up => (One, Up),
        KeyCode::Down => (One, Down),
        KeyCode::Left => (One, Left),
        KeyCode::Right => (One, Right),
        KeyCode::Char('z') => (One, Confirm),
        KeyCode::Char('x') => (One, Cancel),
        KeyCode::Char('c') => (One, Hold),
        KeyCode::Enter => (One, Start),

        KeyCode::Char('w') => (Two, Up),
        KeyCode::Char('s') => (Two, Down),
        KeyCode::Char('a') => (Two, Left),
        KeyCode::Char('d') => (Two, Right),
        KeyCode::Char('j') => (Two, Confirm),
        KeyCode::Char('k') => (Two, Cancel),
        KeyCode::Char('l') => (Two, Hold),
        KeyCode::Char(' ') => (Two, Start),

        _ => return None,
    };
    Some(binding)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
