//! Wallet mutation models (withdraw / send).

use serde::{Deserialize, Serialize};

/// Request body for the owner-withdrawal endpoint. The amount is denominated
/// in the selected balance row's own unit.
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawRequest {
    pub mint_url: String,
    pub unit: String,
    pub amount: u64,
}

/// Request body for the send-token endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SendTokenRequest {
    pub amount: u64,
}

/// Response from withdraw and send: a serialized Cashu token the operator
/// can redeem elsewhere.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
