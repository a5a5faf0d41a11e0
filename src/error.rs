//! Crate-level error types.
//!
//! [`ConsoleError`] unifies every error source (configuration, HTTP, JSON,
//! terminal IO, API rejections) behind a single enum so callers can match on
//! the variant they care about while still using the `?` operator for easy
//! propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Configuration from the environment was missing or inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// An HTTP request to the node or a price feed failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal or filesystem IO failed.
    #[error("io error: {0}")]
    Io(String),

    /// The admin API rejected a request.
    #[error("api error ({status}): {detail}")]
    Api { status: u16, detail: String },

    /// No admin session is active, or the node rejected the bearer token.
    #[error("not authenticated with the node admin API")]
    AuthRequired,
}
