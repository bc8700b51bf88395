use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{Confirm, EditorPane, Focus, Model, Screen};
use crate::config::RestoreSettings;
use crate::form::Form;
use crate::launch::Tool;

use super::{FORM_WIDTH_PERCENT, LIST_WIDTH_PERCENT, overlays, status};

/// Height of the prize constants form: three fields plus borders.
const PRICE_FORM_HEIGHT: u16 = 5;

pub fn split_editor_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(LIST_WIDTH_PERCENT),
            Constraint::Percentage(FORM_WIDTH_PERCENT),
        ])
        .split(area)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let [main, footer] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    match &model.screen {
        Screen::Launcher { selected } => render_launcher(*selected, frame, main),
        Screen::Restore(restore) => render_restore(model, restore, frame, main),
        Screen::Leaderboard(screen) => {
            let columns = split_editor_columns(main);
            render_record_list(model, &screen.editor, "Leaderboard", frame, columns[0]);
            let [form_area, prices_area] = Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(PRICE_FORM_HEIGHT),
            ])
            .areas(columns[1]);
            render_form(
                screen.editor.form(),
                record_form_title(&screen.editor),
                model.focus == Focus::Form,
                frame,
                form_area,
            );
            render_form(
                &screen.prices,
                "Prizes",
                model.focus == Focus::Prices,
                frame,
                prices_area,
            );
        }
        Screen::Slides(editor) => {
            let columns = split_editor_columns(main);
            render_record_list(model, editor, "Slides", frame, columns[0]);
            render_form(
                editor.form(),
                record_form_title(editor),
                model.focus == Focus::Form,
                frame,
                columns[1],
            );
        }
    }

    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, footer);
    } else {
        status::render_status_bar(model, frame, footer);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn record_form_title(editor: &dyn EditorPane) -> &'static str {
    if editor.selected().is_some() {
        "Edit record"
    } else {
        "New record"
    }
}

fn render_record_list(
    model: &Model,
    editor: &dyn EditorPane,
    title: &str,
    frame: &mut Frame,
    area: Rect,
) {
    let labels = editor.item_labels();
    let visible_rows = area.height.saturating_sub(2) as usize;
    let start = editor
        .selected()
        .map_or(0, |sel| (sel + 1).saturating_sub(visible_rows));

    let items: Vec<Line> = labels
        .iter()
        .enumerate()
        .skip(start)
        .take(visible_rows)
        .map(|(i, label)| {
            let selected = editor.selected() == Some(i);
            let marker = if selected { ">" } else { " " };
            let style = if selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::styled(format!("{marker} {label}"), style)
        })
        .collect();

    let list = if items.is_empty() {
        Paragraph::new(Line::styled(
            "  (empty)",
            Style::default().fg(Color::Indexed(245)),
        ))
    } else {
        Paragraph::new(items)
    };

    let block = Block::default()
        .title(format!("{title} ({})", editor.len()))
        .borders(Borders::ALL)
        .border_style(focus_border(model.focus == Focus::List));
    frame.render_widget(list.block(block), area);
}

fn render_form(form: &Form, title: &str, focused: bool, frame: &mut Frame, area: Rect) {
    let label_width = form.labels().iter().map(|l| l.len()).max().unwrap_or(0) + 2;

    let lines: Vec<Line> = form
        .labels()
        .iter()
        .zip(form.fields())
        .enumerate()
        .map(|(i, (label, field))| {
            let label_style = if focused && form.focused() == i {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };
            Line::from(vec![
                Span::styled(format!("{:<label_width$}", format!("{label}:")), label_style),
                Span::raw(field.text().to_string()),
            ])
        })
        .collect();

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(focus_border(focused));
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if focused && let Some(field) = form.fields().get(form.focused()) {
        // Labels and field values stay well inside u16 on any terminal
        #[allow(clippy::cast_possible_truncation)]
        let x = inner.x + (label_width + field.cursor_column()) as u16;
        #[allow(clippy::cast_possible_truncation)]
        let y = inner.y + form.focused() as u16;
        if x < inner.right() && y < inner.bottom() {
            frame.set_cursor_position(Position::new(x, y));
        }
    }
}

fn render_launcher(selected: usize, frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = vec![Line::raw("")];
    for (i, tool) in Tool::ALL.iter().enumerate() {
        let text = format!("  {}. {}", i + 1, tool.label());
        if i == selected {
            lines.push(Line::styled(
                format!(">{}", &text[1..]),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            ));
        } else {
            lines.push(Line::raw(text));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "  Enter: open   q: quit",
        Style::default().fg(Color::Indexed(245)),
    ));

    let popup = overlays::centered_popup_rect(44, 10, area);
    let block = Block::default()
        .title("Site data tools")
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn render_restore(model: &Model, restore: &RestoreSettings, frame: &mut Frame, area: Rect) {
    let label_style = Style::default().fg(Color::Cyan);
    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Folder:     ", label_style),
            Span::raw(restore.folder.display().to_string()),
        ]),
        Line::from(vec![
            Span::styled("  Repository: ", label_style),
            Span::raw(restore.repo_url.clone()),
        ]),
        Line::raw(""),
        Line::raw("  Enter deletes the folder and clones the repository again."),
    ];
    if model.is_awaiting(Confirm::Restore) {
        lines.push(Line::styled(
            "  Press Enter again to confirm, any other key cancels.",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let block = Block::default()
        .title("Restore Repository")
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
