//! Models tab: advertised-name → upstream model mappings.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::{App, Mode};

use super::chrome;

const HELP: &str = " q quit │ tab switch │ ↑/↓ select │ e/enter edit upstream │ esc cancel";

/// Renders the model-mappings tab.
pub fn render(frame: &mut Frame, app: &App) {
    let content = chrome(frame, app, HELP);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(content);

    render_list(frame, layout[0], app);
    render_editor(frame, layout[1], app);
}

fn render_list(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Model Mappings ");

    if !app.mappings_loaded {
        let para = Paragraph::new("loading mappings…")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, mapping) in app.mappings.iter().enumerate() {
        let mut style = Style::default();
        if i == app.selected_mapping {
            style = style.add_modifier(Modifier::REVERSED);
        }
        lines.push(Line::styled(
            format!("{:<36} → {}", mapping.name, mapping.mapped_to),
            style,
        ));
    }

    if lines.is_empty() {
        lines.push(Line::styled(
            "no mappings configured",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_editor(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Upstream ");

    let line = if app.mode == Mode::Editing {
        Line::styled(
            format!("{}█", app.mapping_input.as_str()),
            Style::default().fg(Color::Yellow),
        )
    } else if app.mappings_saving {
        Line::styled("saving…", Style::default().fg(Color::Yellow))
    } else {
        Line::styled(
            "press e to edit the selected mapping",
            Style::default().fg(Color::DarkGray),
        )
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}
