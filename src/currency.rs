//! Amount normalization and display formatting.
//!
//! All balances are normalized to millisatoshi before aggregation and can be
//! rendered in any [`DisplayUnit`]. USD rendering needs a live exchange rate;
//! when none is available the formatter returns [`UNAVAILABLE`] rather than a
//! zero amount, so "unknown" is never displayed as "nothing".

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Marker rendered when a USD amount cannot be computed.
pub const UNAVAILABLE: &str = "—";

/// Millisatoshi per satoshi.
pub const MSAT_PER_SAT: u64 = 1_000;

/// Satoshi per bitcoin.
pub const SAT_PER_BTC: u64 = 100_000_000;

/// Unit used when rendering amounts. Pure display-layer selector; the
/// operator's choice is persisted via [`crate::prefs`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    Msat,
    #[default]
    Sat,
    Usd,
}

impl DisplayUnit {
    /// Returns the wire/preference-file name for this unit.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Msat => "msat",
            Self::Sat => "sat",
            Self::Usd => "usd",
        }
    }

    /// Returns the next unit in the display cycle (msat → sat → usd → msat).
    pub fn next(self) -> Self {
        match self {
            Self::Msat => Self::Sat,
            Self::Sat => Self::Usd,
            Self::Usd => Self::Msat,
        }
    }
}

/// Converts an amount recorded in `unit` to millisatoshi.
///
/// `"sat"` amounts are scaled by 1000 (saturating); any other unit is
/// treated as already millisatoshi-denominated and passed through.
pub fn to_millisat(amount: u64, unit: &str) -> u64 {
    if unit == "sat" {
        amount.saturating_mul(MSAT_PER_SAT)
    } else {
        amount
    }
}

/// Renders a millisatoshi amount in the requested display unit.
///
/// USD rendering requires `usd_per_sat`; with no rate the function returns
/// [`UNAVAILABLE`]. Sub-dollar amounts get four decimal places so a real but
/// tiny balance never shows up as `$0.00`.
pub fn format_amount(
    amount_msat: u64,
    unit: DisplayUnit,
    usd_per_sat: Option<Decimal>,
) -> String {
    match unit {
        DisplayUnit::Msat => format!("{} msat", group_thousands(amount_msat)),
        DisplayUnit::Sat => {
            let whole = amount_msat / MSAT_PER_SAT;
            let rem = amount_msat % MSAT_PER_SAT;
            if rem == 0 {
                format!("{} sats", group_thousands(whole))
            } else {
                let frac = format!("{rem:03}");
                format!(
                    "{}.{} sats",
                    group_thousands(whole),
                    frac.trim_end_matches('0')
                )
            }
        }
        DisplayUnit::Usd => {
            let Some(rate) = usd_per_sat else {
                return UNAVAILABLE.to_string();
            };
            let sats = Decimal::from(amount_msat) / Decimal::from(MSAT_PER_SAT);
            format_usd(sats * rate)
        }
    }
}

/// Formats a USD value as currency: two decimal places for amounts of a
/// dollar or more, four below that.
pub fn format_usd(usd: Decimal) -> String {
    let places: usize = if usd.abs() >= Decimal::ONE { 2 } else { 4 };
    let rendered = format!("{:.*}", places, usd.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let sign = if usd.is_sign_negative() && !usd.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}.{frac_part}", group_digits(int_part))
}

/// Groups an unsigned integer with comma thousands separators.
pub fn group_thousands(n: u64) -> String {
    group_digits(&n.to_string())
}

/// Inserts a comma every three digits, counting from the right.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
