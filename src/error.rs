//! Error types for bridge configuration.
//!
//! This module contains the error type raised while constructing and
//! validating [`BridgeConfig`](crate::config::BridgeConfig) and its newtypes.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Configuration errors are always raised before any
//! remote call is made.
//!
//! # Example
//!
//! ```rust
//! use shopify_bridge::{AppName, ConfigError};
//!
//! let result = AppName::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAppName)));
//! ```

use thiserror::Error;

/// Errors that can occur during bridge configuration.
///
/// Each variant provides a clear, actionable error message. These errors are
/// fatal and surface before any remote API call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// App name cannot be empty.
    #[error("App name cannot be empty. Please provide the name your app registers routes under.")]
    EmptyAppName,

    /// App name contains characters that cannot appear in a URL path segment.
    #[error("Invalid app name '{name}'. App names may contain letters, digits, hyphens, and underscores.")]
    InvalidAppName {
        /// The invalid name that was provided.
        name: String,
    },

    /// Callback base URL is invalid.
    #[error("Invalid callback base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://myapp.example.com').")]
    InvalidCallbackBase {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name' or 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// Page size must be at least 1.
    #[error("Page size must be greater than zero.")]
    ZeroPageSize,

    /// Fetch concurrency must be at least 1.
    #[error("Fetch concurrency must be greater than zero.")]
    ZeroFetchConcurrency,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
