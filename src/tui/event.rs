//! Event handling for the TUI.
//!
//! Terminal input, poll results, and mutation outcomes all arrive as
//! [`Message`]s on one channel; [`update`] folds them into the [`App`] and
//! occasionally hands an [`Action`] back to the runtime for async execution.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tracing::warn;

use crate::api::AdminClient;
use crate::models::balance::BalanceDetail;
use crate::models::mapping::ModelMapping;
use crate::models::usage::UsageStats;
use crate::models::wallet::WithdrawRequest;
use crate::rates::fetch_usd_price;
use crate::withdraw::{WithdrawVerdict, check_withdrawal};

use super::app::{App, BALANCE_POLL_INTERVAL, CachedRate, ConnectionStatus, Mode, RATE_POLL_INTERVAL, Tab};

/// Events that can occur in the terminal.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),

    /// Fresh balance rows from a poll tick.
    Balances(Vec<BalanceDetail>),
    /// A balance poll failed.
    BalancesFailed(String),
    /// Rate poll settled: the minimum surviving quote, or `None` when every
    /// source failed.
    Rate(Option<Decimal>),
    /// Model mappings fetched.
    Mappings(Vec<ModelMapping>),
    /// Mapping fetch failed.
    MappingsFailed(String),
    /// Usage statistics fetched.
    Usage(UsageStats),
    /// Usage fetch failed.
    UsageFailed(String),

    /// Withdrawal settled: the Cashu token, or the rejection message.
    WithdrawComplete(Result<String, String>),
    /// Send settled: the Cashu token, or the rejection message.
    SendComplete(Result<String, String>),
    /// Mapping save settled.
    MappingsSaved(Result<(), String>),

    /// Request to quit the application.
    Quit,
}

/// Async work the runtime performs on behalf of the reducer.
#[derive(Debug)]
pub enum Action {
    SubmitWithdrawal(WithdrawRequest),
    SubmitSend(u64),
    SaveMappings(Vec<ModelMapping>),
    /// One-off re-fetch of balances, rate, mappings, and usage.
    Refresh,
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Spawns the balance poll loop. Each tick is independent: a failed fetch
/// reports and the next tick proceeds regardless.
pub fn spawn_balance_poller(client: Arc<AdminClient>, tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(BALANCE_POLL_INTERVAL);
        loop {
            interval.tick().await;
            let message = match client.get_detailed_balances().await {
                Ok(balances) => Message::Balances(balances),
                Err(e) => {
                    warn!(error = %e, "balance poll failed");
                    Message::BalancesFailed(e.to_string())
                }
            };
            if tx.send(message).is_err() {
                break;
            }
        }
    });
}

/// Spawns the exchange-rate poll loop.
pub fn spawn_rate_poller(http: reqwest::Client, tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(RATE_POLL_INTERVAL);
        loop {
            interval.tick().await;
            let quote = fetch_usd_price(&http).await;
            if tx.send(Message::Rate(quote)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Balances(balances) => {
            app.connection_status = ConnectionStatus::Connected;
            app.set_balances(balances);
            None
        }
        Message::BalancesFailed(error) => {
            app.connection_status = ConnectionStatus::Disconnected;
            app.show_error(error);
            None
        }
        Message::Rate(Some(usd_per_btc)) => {
            app.rate = Some(CachedRate::new(usd_per_btc));
            None
        }
        // Keep the previous quote; the staleness window decides when it
        // stops being rendered.
        Message::Rate(None) => None,
        Message::Mappings(mappings) => {
            app.mappings = mappings;
            app.mappings_loaded = true;
            if app.selected_mapping >= app.mappings.len() {
                app.selected_mapping = app.mappings.len().saturating_sub(1);
            }
            None
        }
        Message::MappingsFailed(error) | Message::UsageFailed(error) => {
            app.show_error(error);
            None
        }
        Message::Usage(usage) => {
            app.usage = Some(usage);
            None
        }
        Message::WithdrawComplete(result) => {
            app.withdraw_pending = false;
            match result {
                Ok(token) => {
                    app.withdraw_token = Some(token);
                    // No optimistic balance mutation; fetch the new truth.
                    Some(Action::Refresh)
                }
                Err(error) => {
                    app.show_error(error);
                    None
                }
            }
        }
        Message::SendComplete(result) => {
            app.send_pending = false;
            match result {
                Ok(token) => {
                    app.send_token = Some(token);
                    Some(Action::Refresh)
                }
                Err(error) => {
                    app.show_error(error);
                    None
                }
            }
        }
        Message::MappingsSaved(result) => {
            app.mappings_saving = false;
            if let Err(error) = result {
                app.show_error(error);
            }
            None
        }
        Message::Quit => {
            app.should_quit = true;
            None
        }
    }
}

/// Handles a terminal event.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => match app.mode {
            Mode::Normal => handle_normal_key(app, key),
            Mode::Editing => handle_editing_key(app, key),
        },
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.expire_error();
            None
        }
    }
}

/// Key handling outside of text entry.
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // A pending confirmation swallows everything except yes/no.
    if app.pending_confirmation.is_some() {
        match key.code {
            KeyCode::Char('y') => return confirm_withdrawal(app),
            KeyCode::Char('n') | KeyCode::Esc => {
                app.pending_confirmation = None;
            }
            _ => {}
        }
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('q') => {
            app.should_quit = true;
            None
        }
        KeyCode::Tab => {
            app.next_tab();
            None
        }
        KeyCode::BackTab => {
            app.previous_tab();
            None
        }
        KeyCode::Char('u') => {
            app.cycle_display_unit();
            None
        }
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Up => {
            match app.current_tab() {
                Tab::Models => select_previous_mapping(app),
                _ => app.select_previous_row(),
            }
            None
        }
        KeyCode::Down => {
            match app.current_tab() {
                Tab::Models => select_next_mapping(app),
                _ => app.select_next_row(),
            }
            None
        }
        KeyCode::Char('e') => {
            start_editing(app);
            None
        }
        KeyCode::Enter => match app.current_tab() {
            Tab::Withdraw => submit_withdrawal(app),
            Tab::Send => submit_send(app),
            Tab::Models => {
                start_editing(app);
                None
            }
            _ => None,
        },
        KeyCode::Esc => {
            app.withdraw_token = None;
            app.send_token = None;
            None
        }
        _ => None,
    }
}

/// Key handling while a text input has focus.
fn handle_editing_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    let tab = app.current_tab();
    let numeric = !matches!(tab, Tab::Models);
    let input = match tab {
        Tab::Withdraw => &mut app.amount_input,
        Tab::Send => &mut app.send_input,
        Tab::Models => &mut app.mapping_input,
        _ => {
            app.mode = Mode::Normal;
            return None;
        }
    };

    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Normal;
        }
        KeyCode::Enter => {
            app.mode = Mode::Normal;
            if tab == Tab::Models {
                return commit_mapping_edit(app);
            }
        }
        KeyCode::Char(c) if !numeric || c.is_ascii_digit() => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        _ => {}
    }
    None
}

/// Enters editing mode for the active tab's input.
fn start_editing(app: &mut App) {
    match app.current_tab() {
        Tab::Withdraw | Tab::Send => app.mode = Mode::Editing,
        Tab::Models => {
            if let Some(mapping) = app.mappings.get(app.selected_mapping) {
                app.mapping_input.set(mapping.mapped_to.clone());
                app.mode = Mode::Editing;
            }
        }
        _ => {}
    }
}

fn select_next_mapping(app: &mut App) {
    if !app.mappings.is_empty() {
        app.selected_mapping = (app.selected_mapping + 1) % app.mappings.len();
    }
}

fn select_previous_mapping(app: &mut App) {
    if !app.mappings.is_empty() {
        app.selected_mapping = app
            .selected_mapping
            .checked_sub(1)
            .unwrap_or(app.mappings.len() - 1);
    }
}

/// Applies the edited upstream model to the selected row and saves the set.
fn commit_mapping_edit(app: &mut App) -> Option<Action> {
    let upstream = app.mapping_input.as_str().trim().to_string();
    if upstream.is_empty() {
        app.show_error("upstream model must not be empty");
        return None;
    }
    let Some(mapping) = app.mappings.get_mut(app.selected_mapping) else {
        return None;
    };
    mapping.mapped_to = upstream;
    app.mappings_saving = true;
    Some(Action::SaveMappings(app.mappings.clone()))
}

/// Validates the entered amount and either submits, warns, or rejects.
fn submit_withdrawal(app: &mut App) -> Option<Action> {
    if app.withdraw_pending {
        app.show_error("a withdrawal is already in flight");
        return None;
    }
    let Some(balance) = app.selected_balance() else {
        app.show_error("no balance selected");
        return None;
    };
    let Ok(requested) = app.amount_input.as_str().trim().parse::<u64>() else {
        app.show_error("invalid withdrawal amount");
        return None;
    };

    match check_withdrawal(requested, balance) {
        Ok(WithdrawVerdict::Approved) => {
            let request = WithdrawRequest {
                mint_url: balance.mint_url.clone(),
                unit: balance.unit.clone(),
                amount: requested,
            };
            app.withdraw_pending = true;
            app.withdraw_token = None;
            Some(Action::SubmitWithdrawal(request))
        }
        Ok(WithdrawVerdict::RequiresConfirmation { reason }) => {
            app.pending_confirmation = Some(reason);
            None
        }
        Err(error) => {
            app.show_error(error.to_string());
            None
        }
    }
}

/// Submits the withdrawal the operator just confirmed past its warning.
fn confirm_withdrawal(app: &mut App) -> Option<Action> {
    app.pending_confirmation = None;
    if app.withdraw_pending {
        return None;
    }
    let balance = app.selected_balance()?;
    let requested = app.amount_input.as_str().trim().parse::<u64>().ok()?;
    let request = WithdrawRequest {
        mint_url: balance.mint_url.clone(),
        unit: balance.unit.clone(),
        amount: requested,
    };
    app.withdraw_pending = true;
    app.withdraw_token = None;
    Some(Action::SubmitWithdrawal(request))
}

/// Validates the entered send amount and submits it.
fn submit_send(app: &mut App) -> Option<Action> {
    if app.send_pending {
        app.show_error("a send is already in flight");
        return None;
    }
    let Ok(amount) = app.send_input.as_str().trim().parse::<u64>() else {
        app.show_error("invalid send amount");
        return None;
    };
    if amount == 0 {
        app.show_error("send amount must be positive");
        return None;
    }
    app.send_pending = true;
    app.send_token = None;
    Some(Action::SubmitSend(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::Preferences;

    fn key(code: KeyCode) -> Message {
        Message::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn app_with_balance(wallet: u64, owner: u64) -> App {
        let mut app = App::new(Preferences::default(), None);
        app.set_balances(vec![BalanceDetail {
            mint_url: "https://mint.example.com".to_string(),
            unit: "sat".to_string(),
            wallet_balance: wallet,
            user_balance: wallet - owner,
            owner_balance: Some(owner),
            error: None,
        }]);
        app.active_tab = Tab::ALL
            .iter()
            .position(|t| *t == Tab::Withdraw)
            .unwrap();
        app
    }

    #[test]
    fn approved_withdrawal_produces_submit_action() {
        let mut app = app_with_balance(100, 40);
        app.amount_input.set("30".to_string());
        let action = update(&mut app, key(KeyCode::Enter));
        assert!(matches!(
            action,
            Some(Action::SubmitWithdrawal(WithdrawRequest { amount: 30, .. }))
        ));
        assert!(app.withdraw_pending);
    }

    #[test]
    fn over_owner_withdrawal_awaits_confirmation() {
        let mut app = app_with_balance(100, 40);
        app.amount_input.set("60".to_string());
        let action = update(&mut app, key(KeyCode::Enter));
        assert!(action.is_none());
        assert!(app.pending_confirmation.is_some());
        assert!(!app.withdraw_pending);

        // 'n' cancels without submitting
        let action = update(&mut app, key(KeyCode::Char('n')));
        assert!(action.is_none());
        assert!(app.pending_confirmation.is_none());
    }

    #[test]
    fn confirmation_yes_submits() {
        let mut app = app_with_balance(100, 40);
        app.amount_input.set("60".to_string());
        update(&mut app, key(KeyCode::Enter));
        let action = update(&mut app, key(KeyCode::Char('y')));
        assert!(matches!(
            action,
            Some(Action::SubmitWithdrawal(WithdrawRequest { amount: 60, .. }))
        ));
        assert!(app.withdraw_pending);
    }

    #[test]
    fn over_wallet_withdrawal_is_rejected_inline() {
        let mut app = app_with_balance(100, 40);
        app.amount_input.set("150".to_string());
        let action = update(&mut app, key(KeyCode::Enter));
        assert!(action.is_none());
        assert!(app.error_message.is_some());
        assert!(!app.withdraw_pending);
    }

    #[test]
    fn pending_flag_blocks_resubmission() {
        let mut app = app_with_balance(100, 40);
        app.amount_input.set("30".to_string());
        assert!(update(&mut app, key(KeyCode::Enter)).is_some());
        let second = update(&mut app, key(KeyCode::Enter));
        assert!(second.is_none());
    }

    #[test]
    fn withdraw_completion_clears_pending_and_refreshes() {
        let mut app = app_with_balance(100, 40);
        app.withdraw_pending = true;
        let action = update(
            &mut app,
            Message::WithdrawComplete(Ok("cashuAeyJ0b2tlbiI6W119".to_string())),
        );
        assert!(matches!(action, Some(Action::Refresh)));
        assert!(!app.withdraw_pending);
        assert!(app.withdraw_token.is_some());
    }

    #[test]
    fn withdraw_failure_surfaces_error_without_mutation() {
        let mut app = app_with_balance(100, 40);
        app.withdraw_pending = true;
        let before = app.balances.clone();
        let action = update(
            &mut app,
            Message::WithdrawComplete(Err("mint rejected the swap".to_string())),
        );
        assert!(action.is_none());
        assert!(!app.withdraw_pending);
        assert!(app.error_message.is_some());
        assert_eq!(app.balances.len(), before.len());
    }

    #[test]
    fn rate_failure_keeps_previous_quote() {
        let mut app = app_with_balance(100, 40);
        update(&mut app, Message::Rate(Some(rust_decimal_macros::dec!(60000))));
        assert!(app.rate.is_some());
        update(&mut app, Message::Rate(None));
        assert!(app.rate.is_some());
    }

    #[test]
    fn unit_cycle_key_changes_display_unit() {
        let mut app = app_with_balance(100, 40);
        let before = app.display_unit;
        update(&mut app, key(KeyCode::Char('u')));
        assert_ne!(app.display_unit, before);
    }

    #[test]
    fn editing_mode_accepts_digits_only_for_amounts() {
        let mut app = app_with_balance(100, 40);
        app.amount_input.clear();
        update(&mut app, key(KeyCode::Char('e')));
        assert_eq!(app.mode, Mode::Editing);
        update(&mut app, key(KeyCode::Char('4')));
        update(&mut app, key(KeyCode::Char('x')));
        update(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.amount_input.as_str(), "42");
        update(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Normal);
    }
}
