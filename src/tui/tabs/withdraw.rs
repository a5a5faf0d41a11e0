//! Withdraw tab: pick a mint, enter an amount, confirm past warnings.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::currency::{format_amount, group_thousands, to_millisat};
use crate::tui::app::{App, Mode};
use crate::withdraw::suggested_amount;

use super::{chrome, truncate_to_width};

const HELP: &str =
    " q quit │ tab switch │ ↑/↓ select mint │ e edit amount │ enter submit │ u unit │ esc clear";

/// Renders the withdraw tab.
pub fn render(frame: &mut Frame, app: &App) {
    let content = chrome(frame, app, HELP);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
        .split(content);

    render_mint_list(frame, layout[0], app);
    render_form(frame, layout[1], app);
}

fn render_mint_list(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Mints ");
    let rate = app.display_rate();

    let mut lines: Vec<Line> = Vec::new();
    for (i, row) in app.balances.iter().enumerate() {
        let mint = truncate_to_width(&row.mint_url, 28);
        let (text, mut style) = if row.is_errored() {
            (
                format!("{mint} ({}) unavailable", row.unit),
                Style::default().fg(Color::Red),
            )
        } else {
            (
                format!(
                    "{mint} ({}) owner {}",
                    row.unit,
                    format_amount(
                        to_millisat(row.effective_owner_balance(), &row.unit),
                        app.display_unit,
                        rate
                    )
                ),
                Style::default(),
            )
        };
        if i == app.selected_row {
            style = style.add_modifier(Modifier::REVERSED);
        }
        lines.push(Line::styled(text, style));
    }

    if lines.is_empty() {
        lines.push(Line::styled(
            "no balances reported",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Withdraw ");

    let Some(balance) = app.selected_balance() else {
        let para = Paragraph::new("select a mint on the left")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, area);
        return;
    };

    let mut lines: Vec<Line> = vec![Line::raw(format!("Mint: {}", balance.mint_url))];

    if let Some(error) = &balance.error {
        lines.push(Line::styled(
            format!("balance unavailable: {error}"),
            Style::default().fg(Color::Red),
        ));
        let para = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
        frame.render_widget(para, area);
        return;
    }

    let rate = app.display_rate();
    lines.push(Line::raw(format!(
        "Wallet {}   User {}   Owner {}",
        format_amount(to_millisat(balance.wallet_balance, &balance.unit), app.display_unit, rate),
        format_amount(to_millisat(balance.user_balance, &balance.unit), app.display_unit, rate),
        format_amount(
            to_millisat(balance.effective_owner_balance(), &balance.unit),
            app.display_unit,
            rate
        ),
    )));
    lines.push(Line::raw(""));

    let editing = app.mode == Mode::Editing;
    let cursor = if editing { "█" } else { "" };
    let input_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    lines.push(Line::styled(
        format!(
            "Amount ({}): {}{cursor}",
            balance.unit,
            app.amount_input.as_str()
        ),
        input_style,
    ));
    lines.push(Line::styled(
        format!(
            "Suggested (owner share): {} {}",
            group_thousands(suggested_amount(balance)),
            balance.unit
        ),
        Style::default().fg(Color::DarkGray),
    ));

    if app.withdraw_pending {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "submitting withdrawal…",
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(reason) = &app.pending_confirmation {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("WARNING: {reason}"),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::styled(
            "[y] withdraw anyway   [n] cancel",
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(token) = &app.withdraw_token {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Withdrawal token (redeem in any Cashu wallet):",
            Style::default().fg(Color::Green),
        ));
        lines.push(Line::raw(token.as_str()));
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(para, area);
}
