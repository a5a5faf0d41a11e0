//! Withdrawal validation layer.
//!
//! Classifies a requested owner withdrawal against the selected balance row
//! before any network call. Acts as an advisory gate between the withdraw
//! form and the remote wallet API — the API stays the final authority and
//! this layer never deducts or locks funds.

use std::fmt;

use crate::models::balance::BalanceDetail;

/// Result of a successful withdrawal check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WithdrawVerdict {
    /// Withdrawal is within the owner share and can be submitted.
    Approved,
    /// Withdrawal is fundable but dips into user-attributed funds;
    /// requires explicit operator confirmation before submission.
    RequiresConfirmation { reason: String },
}

/// Reason a withdrawal was rejected before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WithdrawCheckError {
    ZeroAmount,
    UnavailableBalance {
        mint_url: String,
    },
    InsufficientFunds {
        requested: u64,
        available: u64,
        mint_url: String,
    },
}

impl fmt::Display for WithdrawCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroAmount => {
                write!(f, "withdrawal amount must be positive")
            }
            Self::UnavailableBalance { mint_url } => {
                write!(f, "{mint_url}: balance unavailable, cannot withdraw")
            }
            Self::InsufficientFunds {
                requested,
                available,
                mint_url,
            } => {
                write!(
                    f,
                    "{mint_url}: requested {requested} exceeds wallet balance {available}"
                )
            }
        }
    }
}

impl std::error::Error for WithdrawCheckError {}

/// Validates a requested withdrawal against a balance row.
///
/// `requested` is denominated in the row's own unit. Rules, in priority
/// order: reject a zero amount, an errored row, or an amount above the
/// wallet balance; warn (confirmation required) when the amount exceeds the
/// owner share but is still fundable; approve otherwise.
pub fn check_withdrawal(
    requested: u64,
    balance: &BalanceDetail,
) -> Result<WithdrawVerdict, WithdrawCheckError> {
    if requested == 0 {
        return Err(WithdrawCheckError::ZeroAmount);
    }

    if balance.is_errored() {
        return Err(WithdrawCheckError::UnavailableBalance {
            mint_url: balance.mint_url.clone(),
        });
    }

    if requested > balance.wallet_balance {
        return Err(WithdrawCheckError::InsufficientFunds {
            requested,
            available: balance.wallet_balance,
            mint_url: balance.mint_url.clone(),
        });
    }

    let owner = balance.effective_owner_balance();
    if requested > owner {
        return Ok(WithdrawVerdict::RequiresConfirmation {
            reason: format!(
                "{requested} {unit} exceeds the owner share of {owner} {unit}; \
                 the remainder would come from user-deposited funds",
                unit = balance.unit
            ),
        });
    }

    Ok(WithdrawVerdict::Approved)
}

/// Default amount to pre-fill when a balance row is selected: the owner
/// share when positive, otherwise 0. Steers the operator toward withdrawing
/// only their own earnings.
pub fn suggested_amount(balance: &BalanceDetail) -> u64 {
    if balance.is_errored() {
        return 0;
    }
    balance.effective_owner_balance()
}
