//! Withdrawal gating behavior across the public API.

use routstr_console::models::balance::BalanceDetail;
use routstr_console::withdraw::{
    WithdrawCheckError, WithdrawVerdict, check_withdrawal, suggested_amount,
};

fn balance(wallet: u64, owner: u64) -> BalanceDetail {
    BalanceDetail {
        mint_url: "https://mint.minibits.cash/Bitcoin".to_string(),
        unit: "sat".to_string(),
        wallet_balance: wallet,
        user_balance: wallet.saturating_sub(owner),
        owner_balance: Some(owner),
        error: None,
    }
}

#[test]
fn classification_matrix() {
    let row = balance(100, 40);

    assert_eq!(check_withdrawal(30, &row), Ok(WithdrawVerdict::Approved));
    assert!(matches!(
        check_withdrawal(60, &row),
        Ok(WithdrawVerdict::RequiresConfirmation { .. })
    ));
    assert!(matches!(
        check_withdrawal(150, &row),
        Err(WithdrawCheckError::InsufficientFunds { .. })
    ));
}

#[test]
fn confirmation_reason_names_user_funds() {
    let row = balance(100, 40);
    let Ok(WithdrawVerdict::RequiresConfirmation { reason }) = check_withdrawal(60, &row) else {
        panic!("expected a confirmation verdict");
    };
    assert!(reason.contains("user"));
}

#[test]
fn rejection_messages_are_operator_readable() {
    let row = balance(100, 40);
    let error = check_withdrawal(150, &row).unwrap_err();
    assert!(error.to_string().contains("exceeds wallet balance 100"));

    let error = check_withdrawal(0, &row).unwrap_err();
    assert!(error.to_string().contains("positive"));
}

#[test]
fn suggested_amounts_follow_owner_share() {
    assert_eq!(suggested_amount(&balance(1_000, 500)), 500);
    assert_eq!(suggested_amount(&balance(1_000, 0)), 0);
}

#[test]
fn untrusted_owner_figures_are_clamped_before_gating() {
    // backend claims more owner funds than the wallet holds
    let mut row = balance(100, 40);
    row.owner_balance = Some(500);

    assert_eq!(suggested_amount(&row), 100);
    assert_eq!(check_withdrawal(100, &row), Ok(WithdrawVerdict::Approved));
    assert!(matches!(
        check_withdrawal(101, &row),
        Err(WithdrawCheckError::InsufficientFunds { .. })
    ));
}
