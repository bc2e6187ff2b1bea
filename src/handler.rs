use crate::{
    app::{App, PopupState},
    event::Action,
};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

/// Handles a crossterm event and returns an optional Action.
pub fn handle_event(app: &mut App, event: Event) -> Option<Action> {
    if let Event::Key(key) = event {
        if key.kind == KeyEventKind::Press {
            return handle_key_press(key, app);
        }
    }
    None
}

/// Handles key press events.
fn handle_key_press(key_event: KeyEvent, app: &mut App) -> Option<Action> {
    if app.popup_state != PopupState::None {
        return handle_popup_keys(key_event, app);
    }

    match key_event.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('r') => Some(Action::RefreshData),
        KeyCode::Char('g') => Some(Action::OpenBlockInput),
        KeyCode::Char('L') | KeyCode::Char('l') => Some(Action::JumpToLatest),
        KeyCode::Left => Some(Action::PrevBlock),
        KeyCode::Right => Some(Action::NextBlock),
        _ => None,
    }
}

/// Handles key events while a popup is active.
fn handle_popup_keys(key_event: KeyEvent, app: &mut App) -> Option<Action> {
    match &app.popup_state {
        PopupState::BlockInput(_) => match key_event.code {
            KeyCode::Esc => Some(Action::ClearPopup),
            KeyCode::Enter => Some(Action::SubmitBlockInput),
            KeyCode::Backspace => Some(Action::BlockInputBackspace),
            KeyCode::Char(c) if c.is_ascii_digit() => Some(Action::BlockInputChar(c)),
            _ => None,
        },
        PopupState::Message(_) => {
            if key_event.code == KeyCode::Esc || key_event.code == KeyCode::Enter {
                Some(Action::ClearPopup)
            } else {
                None
            }
        }
        PopupState::None => None,
    }
}
