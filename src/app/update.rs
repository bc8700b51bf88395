use crate::app::Model;
use crate::app::model::{Confirm, Focus, Screen, ToastLevel};
use crate::error::ValidationError;
use crate::launch::Tool;

use super::editor::Submitted;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Move the list selection (or launcher cursor) down
    SelectNext,
    /// Move the list selection (or launcher cursor) up
    SelectPrev,
    /// Drop the selection and empty the form
    ClearSelection,
    /// Cycle focus between list, form and price form
    FocusNext,
    /// Return focus to the list
    FocusList,
    /// Focus the form with nothing selected, ready for a new record
    NewRecord,
    /// Focus the form for the selected record
    EditSelected,

    // Form editing
    FieldInput(char),
    FieldBackspace,
    FieldDelete,
    FieldLeft,
    FieldRight,
    FieldHome,
    FieldEnd,
    FieldNext,
    FieldPrev,

    // Records
    /// Update the selected record, or add when nothing is selected
    SubmitRecord,
    /// Add a record from the form regardless of the selection
    AddRecord,
    DeleteRecord,
    MoveUp,
    MoveDown,

    // Side effects
    SaveFile,
    ReloadFile,
    SyncRepo,
    SubmitPrices,
    /// Start the highlighted launcher entry
    LaunchSelected,
    /// Delete and re-clone the site repository
    ConfirmRestore,

    ToggleHelp,
    HideHelp,
    /// Terminal resized; redraw only
    Redraw,
    Quit,
}

/// Pure state transition. File, git and process work happens afterwards in
/// the event loop's side-effect handler.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Any other key cancels a pending confirmation.
    let confirmed = model.pending_confirm.take();

    match msg {
        Message::SelectNext => match &mut model.screen {
            Screen::Launcher { selected } => {
                *selected = (*selected + 1).min(Tool::ALL.len() - 1);
            }
            _ => {
                if let Some(editor) = model.editor_mut() {
                    editor.select_next();
                }
            }
        },
        Message::SelectPrev => match &mut model.screen {
            Screen::Launcher { selected } => {
                *selected = selected.saturating_sub(1);
            }
            _ => {
                if let Some(editor) = model.editor_mut() {
                    editor.select_prev();
                }
            }
        },
        Message::ClearSelection => {
            if let Some(editor) = model.editor_mut() {
                editor.clear_selection();
            }
            model.focus = Focus::List;
        }
        Message::FocusNext => {
            model.focus = match (model.focus, &model.screen) {
                (Focus::List, _) => Focus::Form,
                (Focus::Form, Screen::Leaderboard(_)) => Focus::Prices,
                (Focus::Form | Focus::Prices, _) => Focus::List,
            };
        }
        Message::FocusList => model.focus = Focus::List,
        Message::NewRecord => {
            if let Some(editor) = model.editor_mut() {
                editor.clear_selection();
                model.focus = Focus::Form;
            }
        }
        Message::EditSelected => {
            if let Some(editor) = model.editor_mut() {
                editor.form_mut().focus_first();
                model.focus = Focus::Form;
            }
        }

        Message::FieldInput(ch) => edit_field(&mut model, |f| f.insert_char(ch)),
        Message::FieldBackspace => edit_field(&mut model, |f| {
            f.delete_back();
        }),
        Message::FieldDelete => edit_field(&mut model, |f| {
            f.delete_forward();
        }),
        Message::FieldLeft => edit_field(&mut model, |f| f.move_left()),
        Message::FieldRight => edit_field(&mut model, |f| f.move_right()),
        Message::FieldHome => edit_field(&mut model, |f| f.move_home()),
        Message::FieldEnd => edit_field(&mut model, |f| f.move_end()),
        Message::FieldNext => {
            if let Some(form) = model.focused_form_mut() {
                form.focus_next();
            }
        }
        Message::FieldPrev => {
            if let Some(form) = model.focused_form_mut() {
                form.focus_prev();
            }
        }

        Message::SubmitRecord => {
            let result = model.editor_mut().map(|e| e.submit());
            match result {
                Some(Ok(Submitted::Added)) => model.show_toast(ToastLevel::Info, "Record added"),
                Some(Ok(Submitted::Updated)) => {
                    model.show_toast(ToastLevel::Info, "Record updated");
                }
                Some(Err(err)) => show_validation(&mut model, &err),
                None => {}
            }
        }
        Message::AddRecord => {
            let result = model.editor_mut().map(|e| e.add());
            match result {
                Some(Ok(())) => model.show_toast(ToastLevel::Info, "Record added"),
                Some(Err(err)) => show_validation(&mut model, &err),
                None => {}
            }
        }
        Message::DeleteRecord => {
            let result = model.editor_mut().map(|e| e.delete_selected());
            match result {
                Some(Ok(())) => model.show_toast(ToastLevel::Info, "Record deleted"),
                Some(Err(err)) => show_validation(&mut model, &err),
                None => {}
            }
        }
        Message::MoveUp => move_selected(&mut model, true),
        Message::MoveDown => move_selected(&mut model, false),

        // Handled in App::handle_message_side_effects
        Message::SaveFile | Message::SyncRepo | Message::SubmitPrices => {}

        Message::ReloadFile => {
            if model.has_unsaved_changes() && confirmed != Some(Confirm::Reload) {
                model.pending_confirm = Some(Confirm::Reload);
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press r again to discard them and reload",
                );
            }
        }
        Message::LaunchSelected => {
            if let Screen::Launcher { selected } = model.screen {
                model.pending_launch = Tool::ALL.get(selected).copied();
            }
        }
        Message::ConfirmRestore => {
            if let Screen::Restore(restore) = &model.screen
                && confirmed != Some(Confirm::Restore)
            {
                let message = format!(
                    "This deletes {} and clones it again. Press Enter again to continue",
                    restore.folder.display()
                );
                model.pending_confirm = Some(Confirm::Restore);
                model.show_toast(ToastLevel::Warning, message);
            }
        }

        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::Redraw => {}
        Message::Quit => {
            if model.has_unsaved_changes() && confirmed != Some(Confirm::Quit) {
                model.pending_confirm = Some(Confirm::Quit);
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press q again to quit, or Ctrl+S to save",
                );
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

fn move_selected(model: &mut Model, up: bool) {
    if let Some(Err(err)) = model.editor_mut().map(|e| e.move_selected(up)) {
        show_validation(model, &err);
    }
}

fn edit_field(model: &mut Model, edit: impl FnOnce(&mut crate::form::TextField)) {
    if let Some(form) = model.focused_form_mut() {
        edit(form.focused_field_mut());
    }
}

fn show_validation(model: &mut Model, err: &ValidationError) {
    model.show_toast(ToastLevel::Warning, err.to_string());
}
