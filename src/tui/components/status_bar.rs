//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::currency::UNAVAILABLE;
use crate::tui::app::{App, ConnectionStatus, Tab};

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let status_color = match app.connection_status {
        ConnectionStatus::Connected => Color::Green,
        ConnectionStatus::Connecting => Color::Yellow,
        ConnectionStatus::Disconnected => Color::Red,
    };

    let auth_label = if app.authenticated {
        Span::styled(" Auth ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" No Auth ", Style::default().fg(Color::DarkGray))
    };

    // BTC/USD quote: fresh cyan, stale yellow, absent gray
    let rate_span = match app.rate {
        Some(rate) if !rate.is_stale() => Span::styled(
            format!(" BTC ${:.0} ", rate.usd_per_btc),
            Style::default().fg(Color::Cyan),
        ),
        Some(_) => Span::styled(" rate stale ", Style::default().fg(Color::Yellow)),
        None => Span::styled(
            format!(" rate {UNAVAILABLE} "),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let unit_span = Span::styled(
        format!(" {} ", app.display_unit.as_str()),
        Style::default().fg(Color::Magenta),
    );

    let pending_span = if app.withdraw_pending || app.send_pending {
        Span::styled(" BUSY ", Style::default().fg(Color::Black).bg(Color::Yellow))
    } else {
        Span::raw("")
    };

    let error_span = if let Some(ref error) = app.error_message {
        Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::raw("")
    };

    let tab_info = format!(" {}/{} ", app.active_tab + 1, Tab::ALL.len());

    let spans = vec![
        Span::styled(
            format!(" {} ", app.connection_status.label()),
            Style::default().fg(status_color),
        ),
        Span::raw("│"),
        auth_label,
        Span::raw("│"),
        rate_span,
        Span::raw("│"),
        unit_span,
        Span::raw("│"),
        pending_span,
        error_span,
        Span::raw(format!(
            "{:>width$}",
            tab_info,
            width = area.width.saturating_sub(60) as usize
        )),
    ];

    let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
