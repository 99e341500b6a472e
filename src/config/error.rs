//! Defines the custom error type for the `config` module.

use thiserror::Error;

/// Errors raised while reading platform overrides.
///
/// Build-time resolution never fails; these only surface from the opt-in
/// readers in [`super::settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A flag override that is neither a recognised truthy nor falsy value.
    #[error("Invalid flag value for {key}: {value:?}")]
    InvalidFlag { key: String, value: String },

    /// A constant override that is not a decimal 32-bit integer.
    #[error("Invalid integer value for {key}: {value:?}")]
    InvalidInteger { key: String, value: String },

    /// The override document could not be parsed.
    #[error("Invalid override document: {0}")]
    Json(#[from] serde_json::Error),
}
