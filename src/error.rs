//! Error types for Advisor Chat
//!
//! This module defines the error types shared by the relay and the
//! conversation client, using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Advisor Chat operations
///
/// Covers configuration loading, durable storage, relay round-trips,
/// and the relay's own upstream forwarding.
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key/value storage errors (sled operations, bad keys)
    #[error("Storage error: {0}")]
    Storage(String),

    /// The relay answered with a non-success status
    #[error("Relay HTTP {status}: {body}")]
    RelayStatus {
        /// HTTP status code returned by the relay
        status: u16,
        /// Raw response body text
        body: String,
    },

    /// Relay-side failures (bad request body, upstream unreachable)
    #[error("Relay error: {0}")]
    Relay(String),

    /// The relay has no credential for the upstream API
    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Advisor Chat operations
///
/// Uses `anyhow::Error` so callers can attach context while the
/// concrete `AdvisorError` stays downcastable.
pub type Result<T> = anyhow::Result<T>;
