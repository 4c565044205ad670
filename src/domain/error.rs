//! Domain error types

use thiserror::Error;

/// Errors that can occur constructing a modem or codec.
///
/// Per the core error-handling contract, this is the *only* error that ever
/// crosses the core boundary: configuration validation at construction time.
/// Decode anomalies are absorbed silently by resetting the relevant state
/// machine; encode functions are infallible.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModemError {
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for modem construction.
pub type ModemResult<T> = Result<T, ModemError>;
