//! Error types for remote API calls.
//!
//! This module contains [`RemoteApiError`], the single error type every
//! remote call in the bridge can fail with.
//!
//! # Propagation Policy
//!
//! - For resource counting and individual page fetches, a `RemoteApiError`
//!   is fatal to the whole aggregation.
//! - For webhook create/update, the error is captured per-item in a
//!   [`SyncStatus::Failed`](crate::webhooks::SyncStatus) outcome and never
//!   propagated out of the sync call.
//!
//! # Example
//!
//! ```rust,ignore
//! match client.get::<serde_json::Value>("products/count.json", &[]).await {
//!     Ok(body) => println!("count response: {body}"),
//!     Err(RemoteApiError::Response { code, message, .. }) => {
//!         println!("API error {code}: {message}");
//!     }
//!     Err(RemoteApiError::Network(e)) => println!("network error: {e}"),
//!     Err(RemoteApiError::UnexpectedBody { message }) => {
//!         println!("unusable response: {message}");
//!     }
//! }
//! ```

use thiserror::Error;

/// An error from a remote API call.
///
/// Non-2xx responses carry the status code and a serialized error message
/// from the response body, plus the `X-Request-Id` reference when the
/// platform provided one.
#[derive(Debug, Error)]
pub enum RemoteApiError {
    /// The remote returned a non-2xx response.
    #[error("Remote API responded with status {code}: {message}")]
    Response {
        /// The HTTP status code of the response.
        code: u16,
        /// Serialized error message from the response body.
        message: String,
        /// Reference ID for error reporting (from the X-Request-Id header).
        error_reference: Option<String>,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be interpreted as the expected shape.
    #[error("Unexpected response body: {message}")]
    UnexpectedBody {
        /// What was expected and what was found.
        message: String,
    },
}

impl RemoteApiError {
    /// Returns the HTTP status code if this error carries one.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Response { code, .. } => Some(*code),
            Self::Network(_) | Self::UnexpectedBody { .. } => None,
        }
    }
}
