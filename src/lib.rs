//! Operator console library for a Routstr node.
//!
//! Provides the admin API client, wallet balance aggregation, withdrawal
//! validation, BTC/USD rate lookup with multi-source fallback, and the
//! terminal dashboard built on top of them.

pub mod api;
pub mod balances;
pub mod config;
pub mod credentials;
pub mod currency;
pub mod error;
pub mod models;
pub mod prefs;
pub mod rates;
pub mod tui;
pub mod withdraw;

pub use error::{ConsoleError, Result};
