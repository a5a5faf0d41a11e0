//! Usage and revenue analytics models.

use serde::Deserialize;

/// Node-wide usage statistics since startup.
#[derive(Debug, Clone, Deserialize)]
pub struct UsageStats {
    #[serde(default)]
    pub total_requests: u64,
    /// Total paid out to upstream providers, in millisatoshi.
    #[serde(default)]
    pub total_spent_msat: u64,
    /// Total collected from users, in millisatoshi.
    #[serde(default)]
    pub total_earned_msat: u64,
    #[serde(default)]
    pub models: Vec<ModelUsage>,
}

/// Per-model usage breakdown row.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelUsage {
    pub model: String,
    #[serde(default)]
    pub requests: u64,
    #[serde(default)]
    pub earned_msat: u64,
}
