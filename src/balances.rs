//! Balance aggregation across mints and units.

use crate::currency::to_millisat;
use crate::models::balance::{AggregatedTotals, BalanceDetail};

/// Reduces per-mint balance rows to wallet/user/owner totals in millisatoshi.
///
/// Rows carrying a backend error are skipped entirely — their numbers are
/// unreliable and must not leak into the totals. An empty input yields
/// all-zero totals.
pub fn aggregate(balances: &[BalanceDetail]) -> AggregatedTotals {
    let mut totals = AggregatedTotals::default();
    for row in balances {
        if row.is_errored() {
            continue;
        }
        totals.total_wallet_msat = totals
            .total_wallet_msat
            .saturating_add(to_millisat(row.wallet_balance, &row.unit));
        totals.total_user_msat = totals
            .total_user_msat
            .saturating_add(to_millisat(row.user_balance, &row.unit));
        totals.total_owner_msat = totals
            .total_owner_msat
            .saturating_add(to_millisat(row.effective_owner_balance(), &row.unit));
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sat_row(wallet: u64, user: u64) -> BalanceDetail {
        BalanceDetail {
            mint_url: "https://mint.example.com".to_string(),
            unit: "sat".to_string(),
            wallet_balance: wallet,
            user_balance: user,
            owner_balance: None,
            error: None,
        }
    }

    fn msat_row(wallet: u64, user: u64) -> BalanceDetail {
        BalanceDetail {
            unit: "msat".to_string(),
            ..sat_row(wallet, user)
        }
    }

    fn errored_row() -> BalanceDetail {
        BalanceDetail {
            error: Some("mint unreachable".to_string()),
            ..sat_row(9_999, 9_999)
        }
    }

    #[test]
    fn empty_input_yields_zero_totals() {
        assert_eq!(aggregate(&[]), AggregatedTotals::default());
    }

    #[test]
    fn mixed_units_normalize_before_summing() {
        let totals = aggregate(&[sat_row(100, 60), msat_row(5_000, 1_000)]);
        assert_eq!(totals.total_wallet_msat, 105_000);
        assert_eq!(totals.total_user_msat, 61_000);
        assert_eq!(totals.total_owner_msat, 44_000);
    }

    #[test]
    fn errored_rows_contribute_nothing() {
        let with_error = aggregate(&[sat_row(100, 60), errored_row()]);
        let without = aggregate(&[sat_row(100, 60)]);
        assert_eq!(with_error, without);
    }

    #[test]
    fn all_errored_rows_equal_empty() {
        assert_eq!(
            aggregate(&[errored_row(), errored_row()]),
            AggregatedTotals::default()
        );
    }
}
