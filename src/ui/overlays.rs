use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::{Model, Screen};

fn help_lines(model: &Model) -> Vec<Line<'static>> {
    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = Vec::new();

    match &model.screen {
        Screen::Launcher { .. } => {
            lines.push(Line::styled("Launcher", section_style));
            lines.push(Line::raw("  j/k or Up/Down      Choose a tool"));
            lines.push(Line::raw("  Enter               Open it"));
            lines.push(Line::raw(""));
        }
        Screen::Restore(_) => {
            lines.push(Line::styled("Restore", section_style));
            lines.push(Line::raw("  Enter               Delete folder and re-clone"));
            lines.push(Line::raw("                      (press twice to confirm)"));
            lines.push(Line::raw(""));
        }
        Screen::Leaderboard(_) | Screen::Slides(_) => {
            lines.push(Line::styled("List", section_style));
            lines.push(Line::raw("  j/k or Up/Down      Select record"));
            lines.push(Line::raw("  Enter / e           Edit selected record"));
            lines.push(Line::raw("  a / n               New record"));
            lines.push(Line::raw("  d / Delete          Delete selected record"));
            if matches!(model.screen, Screen::Slides(_)) {
                lines.push(Line::raw("  K / J               Move slide up / down"));
            }
            lines.push(Line::raw("  Esc                 Clear selection"));
            lines.push(Line::raw("  Tab                 Next pane"));
            lines.push(Line::raw(""));

            lines.push(Line::styled("Form", section_style));
            lines.push(Line::raw("  Up/Down, Shift-Tab  Previous / next field"));
            lines.push(Line::raw("  Enter               Update selected, or add"));
            lines.push(Line::raw("  Ctrl-n              Always add as new"));
            lines.push(Line::raw("  Esc                 Back to list"));
            if matches!(model.screen, Screen::Leaderboard(_)) {
                lines.push(Line::raw("  Enter in prizes     Write prize constants"));
            }
            lines.push(Line::raw(""));

            lines.push(Line::styled("File", section_style));
            lines.push(Line::raw("  s / Ctrl-s          Save"));
            lines.push(Line::raw("  g / Ctrl-g          Commit and push"));
            lines.push(Line::raw("  r / Ctrl-r          Reload from disk"));
            lines.push(Line::raw(""));
        }
    }

    lines.push(Line::styled("Other", section_style));
    lines.push(Line::raw("  q / Ctrl-c / Ctrl-q Quit"));
    lines.push(Line::raw("  ? / F1              Toggle help"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!(
        "  {}",
        model.settings.source.display()
    )));
    lines
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let lines = help_lines(model);
    let popup_width = area.width.saturating_sub(12).max(48);
    // Help text is a few dozen lines at most
    #[allow(clippy::cast_possible_truncation)]
    let needed_rows = lines.len() as u16 + 5;
    let popup = centered_popup_rect(popup_width, needed_rows, area);

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    let mut content = lines;
    content.push(Line::styled(
        "any key closes",
        Style::default().fg(Color::Indexed(245)),
    ));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(content).block(block), popup);
}

pub fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
