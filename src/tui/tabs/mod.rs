//! Per-tab screens.

pub mod balances;
pub mod mappings;
pub mod send;
pub mod usage;
pub mod withdraw;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthChar;

use crate::tui::app::App;
use crate::tui::components::{status_bar, tab_bar};

/// Renders the chrome every tab shares (tab bar, status bar, keybinding
/// help line) and returns the content area in between.
fn chrome(frame: &mut Frame, app: &App, help: &str) -> Rect {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
            Constraint::Min(5),    // Content
            Constraint::Length(1), // Keybindings help
        ])
        .split(frame.area());

    tab_bar::render(frame, layout[0], app);
    status_bar::render(frame, layout[1], app);
    frame.render_widget(
        Paragraph::new(Line::raw(help)).style(Style::default().fg(Color::DarkGray)),
        layout[3],
    );
    layout[2]
}

/// Truncates a string to a display width, appending an ellipsis when cut.
fn truncate_to_width(s: &str, max: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return s.to_string();
    }
    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}
