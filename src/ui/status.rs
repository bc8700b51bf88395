use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Focus, Model, Screen, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let status = match (&model.screen, model.editor()) {
        (_, Some(editor)) => {
            let filename = editor
                .path()
                .file_name()
                .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string());
            let dirty = if editor.is_dirty() { " [+]" } else { "" };
            let focus = match model.focus {
                Focus::List => "list",
                Focus::Form => "form",
                Focus::Prices => "prizes",
            };
            format!(
                " {filename}{dirty}  {} records  [{focus}]  ?:help",
                editor.len()
            )
        }
        (Screen::Restore(restore), None) => {
            format!(" restore {}  ?:help", restore.folder.display())
        }
        _ => format!(" boardedit  {}  ?:help", model.settings.source.display()),
    };

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
