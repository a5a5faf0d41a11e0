//! Usage tab: request counts and revenue since node startup.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::currency::{format_amount, group_thousands};
use crate::tui::app::App;

use super::chrome;

const HELP: &str = " q quit │ tab switch │ u unit │ r refresh";

/// Renders the usage tab.
pub fn render(frame: &mut Frame, app: &App) {
    let content = chrome(frame, app, HELP);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(content);

    let block = Block::default().borders(Borders::ALL).title(" Usage ");

    let Some(usage) = &app.usage else {
        let para = Paragraph::new("loading usage…")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, layout[0]);
        return;
    };

    let rate = app.display_rate();
    let margin_msat = usage
        .total_earned_msat
        .saturating_sub(usage.total_spent_msat);

    let summary = vec![
        Line::raw(format!(
            "Requests served: {}",
            group_thousands(usage.total_requests)
        )),
        Line::raw(format!(
            "Earned from users:  {}",
            format_amount(usage.total_earned_msat, app.display_unit, rate)
        )),
        Line::raw(format!(
            "Spent on upstreams: {}",
            format_amount(usage.total_spent_msat, app.display_unit, rate)
        )),
        Line::styled(
            format!(
                "Margin:             {}",
                format_amount(margin_msat, app.display_unit, rate)
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    frame.render_widget(Paragraph::new(summary).block(block), layout[0]);

    let mut lines = vec![Line::styled(
        format!("{:<36} {:>10} {:>20}", "MODEL", "REQUESTS", "EARNED"),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for row in &usage.models {
        lines.push(Line::raw(format!(
            "{:<36} {:>10} {:>20}",
            row.model,
            group_thousands(row.requests),
            format_amount(row.earned_msat, app.display_unit, rate),
        )));
    }
    if usage.models.is_empty() {
        lines.push(Line::styled(
            "no per-model data yet",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" By Model ")),
        layout[1],
    );
}
