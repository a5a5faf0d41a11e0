//! Wallet balance models.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Response from the detailed-balances endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailedBalancesResponse {
    pub balances: Vec<BalanceDetail>,
}

/// One row per (mint, unit) pair known to the wallet backend.
///
/// When `error` is set the backend failed to query this mint/unit and none
/// of the numeric fields may be treated as valid data — the row renders as
/// unavailable and contributes nothing to totals.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BalanceDetail {
    /// Origin URL of the Cashu mint.
    pub mint_url: String,
    /// Currency denomination the balances are recorded in (e.g. "sat").
    #[serde(default = "default_unit")]
    pub unit: String,
    /// Total custodial funds held for this mint/unit.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub wallet_balance: u64,
    /// Portion of `wallet_balance` attributable to end-users' prepaid credit.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub user_balance: u64,
    /// Operator-earned portion as reported by the backend; may be absent,
    /// in which case it is derived. See [`BalanceDetail::effective_owner_balance`].
    #[serde(default, deserialize_with = "lenient_optional_amount")]
    pub owner_balance: Option<u64>,
    /// Set when the backend's query for this mint/unit failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BalanceDetail {
    /// Returns whether this row carries a backend error.
    pub fn is_errored(&self) -> bool {
        self.error.is_some()
    }

    /// Returns the operator-earned balance in this row's unit.
    ///
    /// Uses the backend-supplied figure when present, otherwise
    /// `wallet_balance − user_balance`. Either way the result is clamped to
    /// `wallet_balance` — the owner share can never exceed what the wallet
    /// actually holds.
    pub fn effective_owner_balance(&self) -> u64 {
        self.owner_balance
            .unwrap_or_else(|| self.wallet_balance.saturating_sub(self.user_balance))
            .min(self.wallet_balance)
    }
}

fn default_unit() -> String {
    "sat".to_string()
}

/// Decodes an amount field without letting a malformed value poison the row:
/// numbers pass through, numeric strings are parsed, and anything else
/// (null, objects, negative or non-finite values) becomes 0.
fn lenient_amount<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(amount_from_value(&value))
}

/// Like [`lenient_amount`], but preserves absence: `null` stays `None`.
fn lenient_optional_amount<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(amount_from_value(&other)),
    })
}

fn amount_from_value(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Totals across all non-errored balance rows, normalized to millisatoshi.
/// Derived and ephemeral — recomputed on every poll.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AggregatedTotals {
    pub total_wallet_msat: u64,
    pub total_user_msat: u64,
    pub total_owner_msat: u64,
}
