//! Key bindings for the folding list view.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// An invokable fold or navigation operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CursorUp,
    CursorDown,
    ThreadRoot,
    PrevThreadRoot,
    NextThreadRoot,
    Fold,
    Unfold,
    Toggle,
    ToggleAndAdvance,
    FoldAll,
    UnfoldAll,
    ToggleAll,
    Mark,
    Quit,
}

/// Maps a key event to its action, if bound.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorDown),
        KeyCode::Char('^') => Some(Action::ThreadRoot),
        KeyCode::Char('p') => Some(Action::PrevThreadRoot),
        KeyCode::Char('n') => Some(Action::NextThreadRoot),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Fold),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Unfold),
        KeyCode::Tab => Some(Action::Toggle),
        KeyCode::Char(' ') => Some(Action::ToggleAndAdvance),
        KeyCode::Char('F') => Some(Action::FoldAll),
        KeyCode::Char('U') => Some(Action::UnfoldAll),
        KeyCode::BackTab => Some(Action::ToggleAll),
        KeyCode::Char('m') => Some(Action::Mark),
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_fold_bindings() {
        assert_eq!(action_for(key(KeyCode::Tab)), Some(Action::Toggle));
        assert_eq!(
            action_for(key(KeyCode::Char(' '))),
            Some(Action::ToggleAndAdvance)
        );
        assert_eq!(action_for(key(KeyCode::Char('F'))), Some(Action::FoldAll));
        assert_eq!(action_for(key(KeyCode::BackTab)), Some(Action::ToggleAll));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(event), Some(Action::Quit));
        // Plain 'c' is unbound.
        assert_eq!(action_for(key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_unbound_keys_map_to_nothing() {
        assert_eq!(action_for(key(KeyCode::Char('z'))), None);
        assert_eq!(action_for(key(KeyCode::Esc)), None);
    }
}
