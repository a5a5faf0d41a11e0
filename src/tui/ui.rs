//! Main UI rendering coordinator.

use ratatui::Frame;

use super::app::{App, Tab};
use super::tabs::{balances, mappings, send, usage, withdraw};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    match app.current_tab() {
        Tab::Balances => balances::render(frame, app),
        Tab::Withdraw => withdraw::render(frame, app),
        Tab::Send => send::render(frame, app),
        Tab::Models => mappings::render(frame, app),
        Tab::Usage => usage::render(frame, app),
    }
}
