//! Deserialization tests for all admin API model types.

use routstr_console::models::balance::DetailedBalancesResponse;
use routstr_console::models::mapping::ModelMappingsResponse;
use routstr_console::models::usage::UsageStats;
use routstr_console::models::wallet::TokenResponse;

const BALANCES_JSON: &str = include_str!("fixtures/balances.json");
const TOKEN_JSON: &str = include_str!("fixtures/token.json");
const MAPPINGS_JSON: &str = include_str!("fixtures/mappings.json");
const USAGE_JSON: &str = include_str!("fixtures/usage.json");

#[test]
fn test_detailed_balances_deserialize() {
    let response: DetailedBalancesResponse =
        serde_json::from_str(BALANCES_JSON).expect("Failed to deserialize balances response");

    assert_eq!(response.balances.len(), 3);

    let minibits = &response.balances[0];
    assert_eq!(minibits.mint_url, "https://mint.minibits.cash/Bitcoin");
    assert_eq!(minibits.unit, "sat");
    assert_eq!(minibits.wallet_balance, 125_000);
    assert_eq!(minibits.user_balance, 100_000);
    assert_eq!(minibits.owner_balance, Some(25_000));
    assert!(!minibits.is_errored());

    // owner_balance omitted: derived from wallet − user
    let coinos = &response.balances[1];
    assert_eq!(coinos.unit, "msat");
    assert_eq!(coinos.owner_balance, None);
    assert_eq!(coinos.effective_owner_balance(), 4_000_000);

    let broken = &response.balances[2];
    assert!(broken.is_errored());
    assert_eq!(
        broken.error.as_deref(),
        Some("mint unreachable: connection refused")
    );
}

#[test]
fn test_errored_rows_are_excluded_from_totals() {
    let response: DetailedBalancesResponse = serde_json::from_str(BALANCES_JSON).unwrap();
    let totals = routstr_console::balances::aggregate(&response.balances);

    // 125000 sat + 5000000 msat, errored row contributes nothing
    assert_eq!(totals.total_wallet_msat, 130_000_000);
    assert_eq!(totals.total_user_msat, 101_000_000);
    assert_eq!(totals.total_owner_msat, 29_000_000);
}

#[test]
fn test_token_response_deserialize() {
    let response: TokenResponse =
        serde_json::from_str(TOKEN_JSON).expect("Failed to deserialize token response");
    assert!(response.token.starts_with("cashuA"));
}

#[test]
fn test_model_mappings_deserialize() {
    let response: ModelMappingsResponse =
        serde_json::from_str(MAPPINGS_JSON).expect("Failed to deserialize mappings response");

    assert_eq!(response.mappings.len(), 2);
    assert_eq!(response.mappings[0].name, "gpt-4o");
    assert_eq!(response.mappings[0].mapped_to, "openai/gpt-4o-2024-08-06");
}

#[test]
fn test_usage_stats_deserialize() {
    let stats: UsageStats =
        serde_json::from_str(USAGE_JSON).expect("Failed to deserialize usage stats");

    assert_eq!(stats.total_requests, 18_423);
    assert_eq!(stats.total_spent_msat, 91_200_000);
    assert_eq!(stats.total_earned_msat, 104_500_000);
    assert_eq!(stats.models.len(), 2);
    assert_eq!(stats.models[1].model, "sonnet");
    assert_eq!(stats.models[1].requests, 6_423);
}

#[test]
fn test_usage_stats_tolerate_missing_fields() {
    let stats: UsageStats = serde_json::from_str("{}").unwrap();
    assert_eq!(stats.total_requests, 0);
    assert!(stats.models.is_empty());
}
