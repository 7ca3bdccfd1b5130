//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::contact::Field;
use crate::navigation::PageId;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Page navigation
    GoTo(PageId),
    NextPage,
    PrevPage,
    ScrollUp,
    ScrollDown,

    // Contact form
    NextField,
    PrevField,
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    CycleChoice,
    SubmitContact,
    ResetContact,

    // Data
    Revalidate,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    page: PageId,
    focused_field: Field,
    input_mode: InputMode,
    show_help: bool,
    nav_pending: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if input_mode == InputMode::Editing {
        return handle_editing_keys(key);
    }

    // Section ribbon: direct jumps stay available during a transition
    if let KeyCode::Char(c @ '1'..='6') = key.code {
        let index = c as usize - '1' as usize;
        return PageId::from_index(index).map(UiEvent::GoTo);
    }

    // Page turner: disabled while a transition is pending
    match key.code {
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') | KeyCode::Char('l') => {
            return if nav_pending { None } else { Some(UiEvent::NextPage) };
        }
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') | KeyCode::Char('h') => {
            return if nav_pending { None } else { Some(UiEvent::PrevPage) };
        }
        KeyCode::Char('q') => return Some(UiEvent::Quit),
        KeyCode::Char('?') => return Some(UiEvent::ToggleHelp),
        KeyCode::Char('r') => return Some(UiEvent::Revalidate),
        _ => {}
    }

    if page == PageId::Contact {
        handle_contact_keys(key, focused_field)
    } else {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::ScrollDown),
            _ => None,
        }
    }
}

/// Handle keys for the contact form in normal mode
fn handle_contact_keys(key: KeyEvent, focused_field: Field) -> Option<UiEvent> {
    match key.code {
        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::NextField),
        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::PrevField),
        KeyCode::Char('e') | KeyCode::Enter => {
            if focused_field.is_choice() {
                Some(UiEvent::CycleChoice)
            } else {
                Some(UiEvent::StartEditing)
            }
        }
        KeyCode::Char(' ') if focused_field.is_choice() => Some(UiEvent::CycleChoice),
        KeyCode::Char('s') => Some(UiEvent::SubmitContact),
        KeyCode::Char('a') => Some(UiEvent::ResetContact),
        _ => None,
    }
}

/// Handle keys while a text field is being edited
fn handle_editing_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn map(code: KeyCode, page: PageId, mode: InputMode, pending: bool) -> Option<UiEvent> {
        key_to_ui_event(press(code), page, Field::Name, mode, false, pending)
    }

    #[test]
    fn test_digits_jump_to_sections() {
        assert_eq!(
            map(KeyCode::Char('3'), PageId::Front, InputMode::Normal, false),
            Some(UiEvent::GoTo(PageId::Projects))
        );
        assert_eq!(
            map(KeyCode::Char('6'), PageId::Front, InputMode::Normal, true),
            Some(UiEvent::GoTo(PageId::Contact))
        );
        assert_eq!(map(KeyCode::Char('7'), PageId::Front, InputMode::Normal, false), None);
    }

    #[test]
    fn test_turner_keys_blocked_while_pending() {
        assert_eq!(
            map(KeyCode::Right, PageId::About, InputMode::Normal, false),
            Some(UiEvent::NextPage)
        );
        assert_eq!(map(KeyCode::Right, PageId::About, InputMode::Normal, true), None);
        assert_eq!(map(KeyCode::Left, PageId::About, InputMode::Normal, true), None);
    }

    #[test]
    fn test_editing_captures_letters() {
        assert_eq!(
            map(KeyCode::Char('q'), PageId::Contact, InputMode::Editing, false),
            Some(UiEvent::CharInput('q'))
        );
        assert_eq!(
            map(KeyCode::Char('2'), PageId::Contact, InputMode::Editing, false),
            Some(UiEvent::CharInput('2'))
        );
    }

    #[test]
    fn test_enter_on_choice_field_cycles() {
        let event = key_to_ui_event(
            press(KeyCode::Enter),
            PageId::Contact,
            Field::Budget,
            InputMode::Normal,
            false,
            false,
        );
        assert_eq!(event, Some(UiEvent::CycleChoice));
    }

    #[test]
    fn test_help_swallows_keys() {
        let event = key_to_ui_event(
            press(KeyCode::Char('q')),
            PageId::Front,
            Field::Name,
            InputMode::Normal,
            true,
            false,
        );
        assert_eq!(event, Some(UiEvent::CloseHelp));
    }

    #[test]
    fn test_ctrl_c_quits_even_when_editing() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let event = key_to_ui_event(key, PageId::Contact, Field::Message, InputMode::Editing, false, false);
        assert_eq!(event, Some(UiEvent::Quit));
    }
}
