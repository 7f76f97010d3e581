//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
pub fn map_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::Quit),
            _ => None,
        };
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameAction::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameAction::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameAction::SoftDrop)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(GameAction::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char('y') | KeyCode::Char('Y') => {
            Some(GameAction::RotateCcw)
        }

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::Hold),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),

        // Session
        KeyCode::Enter => Some(GameAction::Confirm),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Retry),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(GameAction::Quit),

        _ => None,
    }
}

/// Whether a key event of this kind should be fed to the game.
///
/// Terminal auto-repeat is welcome for movement and drops; releases are not.
pub fn accepts_kind(kind: KeyEventKind, action: GameAction) -> bool {
    match kind {
        KeyEventKind::Press => true,
        KeyEventKind::Repeat => matches!(
            action,
            GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDrop
        ),
        KeyEventKind::Release => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Left)),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Right)),
            Some(GameAction::MoveRight)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Down)),
            Some(GameAction::SoftDrop)
        );

        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('a'))),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('D'))),
            Some(GameAction::MoveRight)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('s'))),
            Some(GameAction::SoftDrop)
        );
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Up)),
            Some(GameAction::RotateCw)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('w'))),
            Some(GameAction::RotateCw)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('z'))),
            Some(GameAction::RotateCcw)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('Y'))),
            Some(GameAction::RotateCcw)
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameAction::HardDrop)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('c'))),
            Some(GameAction::Hold)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('p'))),
            Some(GameAction::Pause)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(GameAction::Confirm)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(GameAction::Retry)
        );
    }

    #[test]
    fn test_quit_keys() {
        for key in [
            KeyEvent::from(KeyCode::Char('q')),
            KeyEvent::from(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert_eq!(map_key_event(key), Some(GameAction::Quit));
        }
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Char('x'))), Some(GameAction::RotateCw));
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Char('m'))), None);
    }

    #[test]
    fn test_control_chords_do_not_play() {
        assert_eq!(
            map_key_event(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_repeat_only_for_held_movement() {
        assert!(accepts_kind(KeyEventKind::Press, GameAction::HardDrop));
        assert!(accepts_kind(KeyEventKind::Repeat, GameAction::MoveLeft));
        assert!(accepts_kind(KeyEventKind::Repeat, GameAction::SoftDrop));
        assert!(!accepts_kind(KeyEventKind::Repeat, GameAction::RotateCw));
        assert!(!accepts_kind(KeyEventKind::Repeat, GameAction::Hold));
        assert!(!accepts_kind(KeyEventKind::Release, GameAction::MoveLeft));
    }
}
