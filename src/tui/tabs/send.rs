//! Send tab: cut a spendable Cashu token from wallet funds.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::tui::app::{App, Mode};

use super::chrome;

const HELP: &str = " q quit │ tab switch │ e edit amount │ enter create token │ esc clear";

/// Renders the send tab.
pub fn render(frame: &mut Frame, app: &App) {
    let content = chrome(frame, app, HELP);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5)])
        .split(content);

    let editing = app.mode == Mode::Editing;
    let cursor = if editing { "█" } else { "" };
    let input_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let mut lines: Vec<Line> = vec![
        Line::raw("Create a Cashu token spendable outside this node."),
        Line::raw(""),
        Line::styled(
            format!("Amount (sat): {}{cursor}", app.send_input.as_str()),
            input_style,
        ),
    ];

    if app.send_pending {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "creating token…",
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(token) = &app.send_token {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Token (copy before leaving this screen):",
            Style::default().fg(Color::Green),
        ));
        lines.push(Line::raw(token.as_str()));
    }

    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Send "));
    frame.render_widget(para, layout[0]);
}
