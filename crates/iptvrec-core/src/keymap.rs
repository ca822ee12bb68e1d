use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::actions::Action;
use crate::form::Focus;

/// What a key press means for the form window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Action(Action),
    StartClock,
    StopClock,
    FocusNext,
    FocusPrev,
    Insert(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ScrollUp,
    ScrollDown,
}

/// Lines moved per PageUp/PageDown in the output pane.
pub const SCROLL_STEP: usize = 5;

/// Translate a key press given the current focus. Releases and repeats of
/// non-press kinds are ignored.
pub fn translate(key: &KeyEvent, focus: Focus) -> Option<KeyCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('r') => Some(KeyCommand::Action(Action::Submit)),
            KeyCode::Char('l') => Some(KeyCommand::Action(Action::Clear)),
            KeyCode::Char('q') | KeyCode::Char('c') => Some(KeyCommand::Action(Action::Exit)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(KeyCommand::Action(Action::Exit)),
        KeyCode::F(5) => Some(KeyCommand::StartClock),
        KeyCode::F(6) => Some(KeyCommand::StopClock),
        KeyCode::Tab | KeyCode::Down => Some(KeyCommand::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(KeyCommand::FocusPrev),
        KeyCode::PageUp => Some(KeyCommand::ScrollUp),
        KeyCode::PageDown => Some(KeyCommand::ScrollDown),
        KeyCode::Enter => match Action::for_focus(focus) {
            Some(action) => Some(KeyCommand::Action(action)),
            None => Some(KeyCommand::FocusNext),
        },
        code if focus.is_field() => match code {
            KeyCode::Char(c) => Some(KeyCommand::Insert(c)),
            KeyCode::Backspace => Some(KeyCommand::Backspace),
            KeyCode::Delete => Some(KeyCommand::Delete),
            KeyCode::Left => Some(KeyCommand::CursorLeft),
            KeyCode::Right => Some(KeyCommand::CursorRight),
            KeyCode::Home => Some(KeyCommand::CursorHome),
            KeyCode::End => Some(KeyCommand::CursorEnd),
            _ => None,
        },
        // On a button
        KeyCode::Char(' ') => Action::for_focus(focus).map(KeyCommand::Action),
        KeyCode::Left => Some(KeyCommand::FocusPrev),
        KeyCode::Right => Some(KeyCommand::FocusNext),
        _ => None,
    }
}
