use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Message, Model};

use super::model::{Focus, Screen};

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Resize(..) => Some(Message::Redraw),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c' | 'q') => Some(Message::Quit),
                KeyCode::Char('s') => Some(Message::SaveFile),
                KeyCode::Char('g') => Some(Message::SyncRepo),
                KeyCode::Char('n') => Some(Message::AddRecord),
                KeyCode::Char('r') => Some(Message::ReloadFile),
                _ => None,
            };
        }

        if key.code == KeyCode::F(1) {
            return Some(Message::ToggleHelp);
        }

        match model.screen {
            Screen::Launcher { .. } => launcher_key(key.code),
            Screen::Restore(_) => restore_key(key.code),
            Screen::Leaderboard(_) | Screen::Slides(_) => match model.focus {
                Focus::List => list_key(key.code),
                Focus::Form => form_key(key.code, Message::SubmitRecord),
                Focus::Prices => form_key(key.code, Message::SubmitPrices),
            },
        }
    }
}

fn launcher_key(code: KeyCode) -> Option<Message> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Message::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(Message::SelectNext),
        KeyCode::Enter => Some(Message::LaunchSelected),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
        _ => None,
    }
}

fn restore_key(code: KeyCode) -> Option<Message> {
    match code {
        KeyCode::Enter => Some(Message::ConfirmRestore),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
        _ => None,
    }
}

fn list_key(code: KeyCode) -> Option<Message> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Message::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(Message::SelectNext),
        KeyCode::Char('K') => Some(Message::MoveUp),
        KeyCode::Char('J') => Some(Message::MoveDown),
        KeyCode::Enter | KeyCode::Char('e') => Some(Message::EditSelected),
        KeyCode::Char('a' | 'n') => Some(Message::NewRecord),
        KeyCode::Char('d') | KeyCode::Delete => Some(Message::DeleteRecord),
        KeyCode::Tab => Some(Message::FocusNext),
        KeyCode::Esc => Some(Message::ClearSelection),
        KeyCode::Char('s') => Some(Message::SaveFile),
        KeyCode::Char('g') => Some(Message::SyncRepo),
        KeyCode::Char('r') => Some(Message::ReloadFile),
        KeyCode::Char('?') => Some(Message::ToggleHelp),
        KeyCode::Char('q') => Some(Message::Quit),
        _ => None,
    }
}

fn form_key(code: KeyCode, submit: Message) -> Option<Message> {
    match code {
        KeyCode::Enter => Some(submit),
        KeyCode::Esc => Some(Message::FocusList),
        KeyCode::Tab => Some(Message::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(Message::FieldPrev),
        KeyCode::Down => Some(Message::FieldNext),
        KeyCode::Backspace => Some(Message::FieldBackspace),
        KeyCode::Delete => Some(Message::FieldDelete),
        KeyCode::Left => Some(Message::FieldLeft),
        KeyCode::Right => Some(Message::FieldRight),
        KeyCode::Home => Some(Message::FieldHome),
        KeyCode::End => Some(Message::FieldEnd),
        KeyCode::Char(ch) => Some(Message::FieldInput(ch)),
        _ => None,
    }
}
