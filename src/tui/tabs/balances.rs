//! Balances tab: per-mint rows plus aggregated totals.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::currency::{UNAVAILABLE, format_amount, to_millisat};
use crate::tui::app::App;

use super::{chrome, truncate_to_width};

const HELP: &str = " q quit │ tab switch │ ↑/↓ select │ u unit │ r refresh";

/// Renders the balances tab.
pub fn render(frame: &mut Frame, app: &App) {
    let content = chrome(frame, app, HELP);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(content);

    render_rows(frame, layout[0], app);
    render_totals(frame, layout[1], app);
}

fn render_rows(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Wallet Balances ");

    if !app.balances_loaded {
        let para = Paragraph::new("loading balances…")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, area);
        return;
    }

    let rate = app.display_rate();
    let mut lines = vec![Line::styled(
        format!(
            "{:<38} {:>6} {:>18} {:>18} {:>18}",
            "MINT", "UNIT", "WALLET", "USER", "OWNER"
        ),
        Style::default().add_modifier(Modifier::BOLD),
    )];

    for (i, row) in app.balances.iter().enumerate() {
        let mint = truncate_to_width(&row.mint_url, 38);
        let (text, mut style) = if let Some(error) = &row.error {
            (
                format!(
                    "{mint:<38} {:>6} {:>18} {:>18} {:>18}  {error}",
                    row.unit, UNAVAILABLE, UNAVAILABLE, UNAVAILABLE
                ),
                Style::default().fg(Color::Red),
            )
        } else {
            (
                format!(
                    "{mint:<38} {:>6} {:>18} {:>18} {:>18}",
                    row.unit,
                    format_amount(to_millisat(row.wallet_balance, &row.unit), app.display_unit, rate),
                    format_amount(to_millisat(row.user_balance, &row.unit), app.display_unit, rate),
                    format_amount(
                        to_millisat(row.effective_owner_balance(), &row.unit),
                        app.display_unit,
                        rate
                    ),
                ),
                Style::default(),
            )
        };
        if i == app.selected_row {
            style = style.add_modifier(Modifier::REVERSED);
        }
        lines.push(Line::styled(text, style));
    }

    if app.balances.is_empty() {
        lines.push(Line::styled(
            "no balances reported",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_totals(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let rate = app.display_rate();
    let line = format!(
        "wallet {}   user {}   owner {}",
        format_amount(app.totals.total_wallet_msat, app.display_unit, rate),
        format_amount(app.totals.total_user_msat, app.display_unit, rate),
        format_amount(app.totals.total_owner_msat, app.display_unit, rate),
    );
    let para = Paragraph::new(line)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" Totals "));
    frame.render_widget(para, area);
}
