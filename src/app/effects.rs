use crate::app::{App, Message, Model, ToastLevel};
use crate::error::EditError;
use crate::{git, sidefiles};

use super::editor::prices_from_form;
use super::model::{Confirm, Screen};

impl App {
    pub(super) fn handle_message_side_effects(&self, model: &mut Model, msg: &Message) {
        match msg {
            Message::SaveFile => save(model),
            Message::ReloadFile if !model.is_awaiting(Confirm::Reload) => reload(model),
            Message::SyncRepo => self.sync(model),
            Message::SubmitPrices => submit_prices(model),
            Message::ConfirmRestore if !model.is_awaiting(Confirm::Restore) => {
                self.restore(model);
            }
            _ => {}
        }
    }

    fn sync(&self, model: &mut Model) {
        if model.editor().is_none() {
            return;
        }
        if model.has_unsaved_changes() {
            model.show_toast(
                ToastLevel::Warning,
                "Save your changes (Ctrl+S) before syncing",
            );
            return;
        }
        let repo = model.settings.git_repo_path.clone();
        match git::sync(self.git.as_ref(), &repo, &model.settings.sync_options()) {
            Ok(report) => {
                tracing::info!(repo = %repo.display(), ?report, "repository synced");
                model.show_toast(ToastLevel::Info, format!("Git: {}", report.summary()));
            }
            Err(err) => {
                tracing::warn!(repo = %repo.display(), %err, "sync failed");
                model.show_toast(ToastLevel::Error, format!("Git sync failed: {err}"));
            }
        }
    }

    fn restore(&self, model: &mut Model) {
        let Screen::Restore(settings) = &model.screen else {
            return;
        };
        let folder = settings.folder.clone();
        match git::restore_repository(self.git.as_ref(), &folder, &settings.repo_url) {
            Ok(()) => {
                tracing::info!(folder = %folder.display(), "repository restored");
                model.show_toast(
                    ToastLevel::Info,
                    format!("Repository restored to {}", folder.display()),
                );
            }
            Err(err) => {
                tracing::warn!(folder = %folder.display(), %err, "restore failed");
                model.show_toast(ToastLevel::Error, format!("Restore failed: {err}"));
            }
        }
    }
}

fn save(model: &mut Model) {
    let stamp_date = matches!(model.screen, Screen::Leaderboard(_));
    let date_file = model.settings.date_file.clone();
    let Some(editor) = model.editor_mut() else {
        return;
    };
    let name = file_name(editor.path());
    if let Err(err) = editor.save() {
        report(model, "Save failed", &err);
        return;
    }
    if !stamp_date {
        model.show_toast(ToastLevel::Info, format!("Saved {name}"));
        return;
    }
    match sidefiles::write_date_stamp(&date_file, sidefiles::today()) {
        Ok(()) => model.show_toast(ToastLevel::Info, format!("Saved {name}")),
        Err(err) => report(
            model,
            &format!("Saved {name}, but the date stamp failed"),
            &err,
        ),
    }
}

fn reload(model: &mut Model) {
    let Some(editor) = model.editor_mut() else {
        return;
    };
    match editor.reload() {
        Ok(()) => model.show_toast(ToastLevel::Info, "Reloaded"),
        Err(err) => report(model, "Reload failed", &err),
    }
}

fn submit_prices(model: &mut Model) {
    let Screen::Leaderboard(screen) = &model.screen else {
        return;
    };
    let config = match prices_from_form(&screen.prices) {
        Ok(config) => config,
        Err(err) => {
            model.show_toast(ToastLevel::Warning, err.to_string());
            return;
        }
    };
    let result = sidefiles::write_constants(&model.settings.constants_file, &config)
        .and_then(|()| sidefiles::write_date_stamp(&model.settings.date_file, sidefiles::today()));
    match result {
        Ok(()) => model.show_toast(ToastLevel::Info, "Prize settings saved"),
        Err(err) => report(model, "Saving prize settings failed", &err),
    }
}

fn report(model: &mut Model, context: &str, err: &EditError) {
    let level = if err.is_recoverable() {
        ToastLevel::Warning
    } else {
        tracing::warn!(%err, "{context}");
        ToastLevel::Error
    };
    model.show_toast(level, format!("{context}: {err}"));
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
