//! Shared models for the node admin API.
//!
//! Contains typed request/response payloads for the wallet, model-mapping,
//! and usage endpoints. Millisatoshi-convertible amounts are `u64`; USD
//! figures use [`rust_decimal::Decimal`].

pub mod balance;
pub mod mapping;
pub mod usage;
pub mod wallet;
