//! Terminal User Interface for the Routstr operator console.
//!
//! Provides a Ratatui-based TUI for wallet balances, owner withdrawals,
//! token sends, model-mapping configuration, and usage analytics.

pub mod app;
pub mod components;
pub mod event;
pub mod input;
pub mod tabs;
pub mod terminal;
pub mod ui;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::api::AdminClient;
use crate::rates::fetch_usd_price;

pub use app::App;
pub use event::{Action, Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;

/// Runs the console until the operator quits.
///
/// Spawns the terminal reader, tick timer, and poll loops, then folds every
/// incoming [`Message`] into the [`App`], executing reducer [`Action`]s as
/// background tasks.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn to, or restored.
pub async fn run(client: Arc<AdminClient>, app: &mut App) -> crate::Result<()> {
    let mut terminal = setup_terminal()?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    event::spawn_event_reader(tx.clone());
    event::spawn_tick_timer(tx.clone(), 250);
    event::spawn_balance_poller(client.clone(), tx.clone());
    event::spawn_rate_poller(client.http().clone(), tx.clone());

    // Mappings and usage have no poll loop; fetch them once up front.
    dispatch(Action::Refresh, &client, &tx);

    let result = event_loop(&mut terminal, app, &client, &tx, &mut rx).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut Tui,
    app: &mut App,
    client: &Arc<AdminClient>,
    tx: &mpsc::UnboundedSender<Message>,
    rx: &mut mpsc::UnboundedReceiver<Message>,
) -> crate::Result<()> {
    while !app.should_quit {
        terminal
            .draw(|frame| render(frame, app))
            .map_err(|e| crate::ConsoleError::Io(format!("draw failed: {e}")))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        if let Some(action) = event::update(app, message) {
            dispatch(action, client, tx);
        }
    }
    Ok(())
}

/// Executes a reducer action as a background task, reporting the outcome
/// back onto the message channel.
fn dispatch(action: Action, client: &Arc<AdminClient>, tx: &mpsc::UnboundedSender<Message>) {
    let client = client.clone();
    let tx = tx.clone();
    match action {
        Action::SubmitWithdrawal(request) => {
            tokio::spawn(async move {
                let result = client
                    .withdraw(&request)
                    .await
                    .map(|response| response.token)
                    .map_err(|e| e.to_string());
                let _ = tx.send(Message::WithdrawComplete(result));
            });
        }
        Action::SubmitSend(amount) => {
            tokio::spawn(async move {
                let result = client
                    .send_token(amount)
                    .await
                    .map(|response| response.token)
                    .map_err(|e| e.to_string());
                let _ = tx.send(Message::SendComplete(result));
            });
        }
        Action::SaveMappings(mappings) => {
            tokio::spawn(async move {
                let result = client
                    .update_model_mappings(mappings)
                    .await
                    .map_err(|e| e.to_string());
                let _ = tx.send(Message::MappingsSaved(result));
            });
        }
        Action::Refresh => {
            tokio::spawn(async move {
                let balances = match client.get_detailed_balances().await {
                    Ok(balances) => Message::Balances(balances),
                    Err(e) => Message::BalancesFailed(e.to_string()),
                };
                if tx.send(balances).is_err() {
                    return;
                }
                match client.get_model_mappings().await {
                    Ok(mappings) => {
                        let _ = tx.send(Message::Mappings(mappings));
                    }
                    Err(e) => {
                        warn!(error = %e, "mapping fetch failed");
                        let _ = tx.send(Message::MappingsFailed(e.to_string()));
                    }
                }
                match client.get_usage().await {
                    Ok(usage) => {
                        let _ = tx.send(Message::Usage(usage));
                    }
                    Err(e) => {
                        warn!(error = %e, "usage fetch failed");
                        let _ = tx.send(Message::UsageFailed(e.to_string()));
                    }
                }
                let quote = fetch_usd_price(client.http()).await;
                let _ = tx.send(Message::Rate(quote));
            });
        }
    }
}
