//! Application state for the TUI.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use rust_decimal::Decimal;

use crate::balances::aggregate;
use crate::currency::DisplayUnit;
use crate::models::balance::{AggregatedTotals, BalanceDetail};
use crate::models::mapping::ModelMapping;
use crate::models::usage::UsageStats;
use crate::prefs::{self, Preferences};
use crate::rates::usd_per_sat;

use super::input::TextInput;

/// How often the wallet balances are re-fetched.
pub const BALANCE_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// How often the BTC/USD rate is re-fetched.
pub const RATE_POLL_INTERVAL: Duration = Duration::from_secs(120);

/// How long a cached rate stays usable after its fetch. Past this window USD
/// amounts render as unavailable instead of using a stale quote.
pub const RATE_STALE_AFTER: Duration = Duration::from_secs(300);

/// How long an error message stays in the status bar.
const ERROR_DISPLAY_DURATION: Duration = Duration::from_secs(6);

/// Console screens.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tab {
    Balances,
    Withdraw,
    Send,
    Models,
    Usage,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Tab; 5] = [
        Self::Balances,
        Self::Withdraw,
        Self::Send,
        Self::Models,
        Self::Usage,
    ];

    /// Returns the tab title shown in the tab bar.
    pub fn title(self) -> &'static str {
        match self {
            Self::Balances => "Balances",
            Self::Withdraw => "Withdraw",
            Self::Send => "Send",
            Self::Models => "Models",
            Self::Usage => "Usage",
        }
    }
}

/// Health of the admin API connection, as observed by the balance poller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Connecting => "Connecting",
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
        }
    }
}

/// Current input mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Normal,
    Editing,
}

/// Error message shown in the status bar until it times out.
pub struct ErrorDisplay {
    pub message: String,
    pub shown_at: Instant,
}

/// The last successful BTC/USD quote and when it was fetched. The fetcher
/// itself is stateless; this cache and its staleness window belong to the
/// caller.
#[derive(Clone, Copy, Debug)]
pub struct CachedRate {
    pub usd_per_btc: Decimal,
    pub fetched_at: Instant,
}

impl CachedRate {
    pub fn new(usd_per_btc: Decimal) -> Self {
        Self {
            usd_per_btc,
            fetched_at: Instant::now(),
        }
    }

    /// USD value of one satoshi at this quote.
    pub fn usd_per_sat(&self) -> Decimal {
        usd_per_sat(self.usd_per_btc)
    }

    pub fn is_stale(&self) -> bool {
        self.fetched_at.elapsed() > RATE_STALE_AFTER
    }
}

/// Central application state container.
pub struct App {
    // -- Tab State --
    /// Index into [`Tab::ALL`].
    pub active_tab: usize,
    /// Current input mode.
    pub mode: Mode,

    // -- Wallet State --
    /// Balance rows from the last successful poll, replaced wholesale.
    pub balances: Vec<BalanceDetail>,
    /// Totals derived from `balances`, recomputed on every poll.
    pub totals: AggregatedTotals,
    /// Whether at least one balance poll has succeeded.
    pub balances_loaded: bool,
    /// Selected balance row (shared by the Balances and Withdraw tabs).
    pub selected_row: usize,

    // -- Rate State --
    /// Last successful BTC/USD quote, if any.
    pub rate: Option<CachedRate>,

    // -- Display Preference --
    /// Active display unit; persisted through `prefs_path` on change.
    pub display_unit: DisplayUnit,
    /// Preference file location, `None` when the platform has none.
    pub prefs_path: Option<PathBuf>,

    // -- Withdraw State --
    /// Amount entry, denominated in the selected row's unit.
    pub amount_input: TextInput,
    /// A withdrawal request is in flight; blocks re-submission.
    pub withdraw_pending: bool,
    /// Warning text awaiting explicit confirmation.
    pub pending_confirmation: Option<String>,
    /// Token returned by the last successful withdrawal.
    pub withdraw_token: Option<String>,

    // -- Send State --
    pub send_input: TextInput,
    pub send_pending: bool,
    pub send_token: Option<String>,

    // -- Model Mappings --
    pub mappings: Vec<ModelMapping>,
    pub mappings_loaded: bool,
    pub selected_mapping: usize,
    /// Upstream-model entry while editing a mapping row.
    pub mapping_input: TextInput,
    pub mappings_saving: bool,

    // -- Usage --
    pub usage: Option<UsageStats>,

    // -- Status --
    pub connection_status: ConnectionStatus,
    pub authenticated: bool,
    pub error_message: Option<ErrorDisplay>,

    // -- Internal --
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the initial state from loaded preferences.
    pub fn new(preferences: Preferences, prefs_path: Option<PathBuf>) -> Self {
        Self {
            active_tab: 0,
            mode: Mode::Normal,

            balances: Vec::new(),
            totals: AggregatedTotals::default(),
            balances_loaded: false,
            selected_row: 0,

            rate: None,

            display_unit: preferences.display_unit,
            prefs_path,

            amount_input: TextInput::new(),
            withdraw_pending: false,
            pending_confirmation: None,
            withdraw_token: None,

            send_input: TextInput::new(),
            send_pending: false,
            send_token: None,

            mappings: Vec::new(),
            mappings_loaded: false,
            selected_mapping: 0,
            mapping_input: TextInput::new(),
            mappings_saving: false,

            usage: None,

            connection_status: ConnectionStatus::Connecting,
            authenticated: false,
            error_message: None,

            should_quit: false,
        }
    }

    /// Returns the currently active tab.
    pub fn current_tab(&self) -> Tab {
        Tab::ALL[self.active_tab]
    }

    /// Switches to the next tab.
    pub fn next_tab(&mut self) {
        self.active_tab = (self.active_tab + 1) % Tab::ALL.len();
    }

    /// Switches to the previous tab.
    pub fn previous_tab(&mut self) {
        self.active_tab = self.active_tab.checked_sub(1).unwrap_or(Tab::ALL.len() - 1);
    }

    /// Returns the USD-per-sat rate usable for display, or `None` when no
    /// quote is cached or the cached quote is past its staleness window.
    pub fn display_rate(&self) -> Option<Decimal> {
        self.rate
            .filter(|rate| !rate.is_stale())
            .map(|rate| rate.usd_per_sat())
    }

    /// Returns the selected balance row, if any.
    pub fn selected_balance(&self) -> Option<&BalanceDetail> {
        self.balances.get(self.selected_row)
    }

    /// Replaces the balance set wholesale and recomputes totals.
    pub fn set_balances(&mut self, balances: Vec<BalanceDetail>) {
        let first_load = !self.balances_loaded;
        self.totals = aggregate(&balances);
        self.balances = balances;
        self.balances_loaded = true;
        if self.selected_row >= self.balances.len() {
            self.selected_row = self.balances.len().saturating_sub(1);
        }
        if first_load {
            self.prefill_amount();
        }
    }

    /// Moves the balance selection down, pre-filling the withdraw amount.
    pub fn select_next_row(&mut self) {
        if !self.balances.is_empty() {
            self.selected_row = (self.selected_row + 1) % self.balances.len();
            self.prefill_amount();
        }
    }

    /// Moves the balance selection up, pre-filling the withdraw amount.
    pub fn select_previous_row(&mut self) {
        if !self.balances.is_empty() {
            self.selected_row = self
                .selected_row
                .checked_sub(1)
                .unwrap_or(self.balances.len() - 1);
            self.prefill_amount();
        }
    }

    /// Pre-fills the withdraw amount with the selected row's suggested
    /// amount (the owner share, or 0).
    pub fn prefill_amount(&mut self) {
        let suggested = self
            .selected_balance()
            .map(crate::withdraw::suggested_amount)
            .unwrap_or(0);
        self.amount_input.set(suggested.to_string());
        self.pending_confirmation = None;
    }

    /// Cycles the display unit and writes the preference through to disk.
    pub fn cycle_display_unit(&mut self) {
        self.display_unit = self.display_unit.next();
        if let Some(path) = &self.prefs_path {
            let preferences = Preferences {
                display_unit: self.display_unit,
            };
            if let Err(e) = prefs::save(path, &preferences) {
                tracing::warn!(error = %e, "failed to persist display unit preference");
            }
        }
    }

    /// Shows an error in the status bar.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(ErrorDisplay {
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    /// Drops the status-bar error once it has been shown long enough.
    pub fn expire_error(&mut self) {
        if let Some(error) = &self.error_message
            && error.shown_at.elapsed() > ERROR_DISPLAY_DURATION
        {
            self.error_message = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(wallet: u64, user: u64) -> BalanceDetail {
        BalanceDetail {
            mint_url: "https://mint.example.com".to_string(),
            unit: "sat".to_string(),
            wallet_balance: wallet,
            user_balance: user,
            owner_balance: None,
            error: None,
        }
    }

    fn new_app() -> App {
        App::new(Preferences::default(), None)
    }

    #[test]
    fn first_balance_load_prefills_suggested_amount() {
        let mut app = new_app();
        app.set_balances(vec![row(1_000, 500)]);
        assert_eq!(app.amount_input.as_str(), "500");
    }

    #[test]
    fn prefill_is_zero_when_owner_share_is_zero() {
        let mut app = new_app();
        app.set_balances(vec![row(1_000, 1_000)]);
        assert_eq!(app.amount_input.as_str(), "0");
    }

    #[test]
    fn selection_change_updates_prefill() {
        let mut app = new_app();
        app.set_balances(vec![row(1_000, 500), row(2_000, 0)]);
        app.select_next_row();
        assert_eq!(app.amount_input.as_str(), "2000");
        app.select_previous_row();
        assert_eq!(app.amount_input.as_str(), "500");
    }

    #[test]
    fn repoll_does_not_clobber_typed_amount() {
        let mut app = new_app();
        app.set_balances(vec![row(1_000, 500)]);
        app.amount_input.set("123".to_string());
        app.set_balances(vec![row(1_000, 500)]);
        assert_eq!(app.amount_input.as_str(), "123");
    }

    #[test]
    fn selection_clamped_when_rows_shrink() {
        let mut app = new_app();
        app.set_balances(vec![row(1, 0), row(2, 0), row(3, 0)]);
        app.selected_row = 2;
        app.set_balances(vec![row(1, 0)]);
        assert_eq!(app.selected_row, 0);
    }

    #[test]
    fn stale_rate_is_not_offered_for_display() {
        let Some(fetched_at) =
            Instant::now().checked_sub(RATE_STALE_AFTER + Duration::from_secs(1))
        else {
            return;
        };
        let mut app = new_app();
        app.rate = Some(CachedRate {
            usd_per_btc: rust_decimal_macros::dec!(60000),
            fetched_at,
        });
        assert_eq!(app.display_rate(), None);
    }

    #[test]
    fn fresh_rate_converts_to_usd_per_sat() {
        let mut app = new_app();
        app.rate = Some(CachedRate::new(rust_decimal_macros::dec!(60000)));
        assert_eq!(app.display_rate(), Some(rust_decimal_macros::dec!(0.0006)));
    }

    #[test]
    fn tab_cycle_wraps() {
        let mut app = new_app();
        app.previous_tab();
        assert_eq!(app.current_tab(), Tab::Usage);
        app.next_tab();
        assert_eq!(app.current_tab(), Tab::Balances);
    }
}
