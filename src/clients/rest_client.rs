//! Authenticated JSON client for the Shopify admin REST API.
//!
//! This module provides the [`RestClient`] type used by the resource and
//! webhook handles to reach the remote platform. It handles base URI
//! construction, access-token header injection, JSON decoding, and
//! rate-limit-aware retries.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::errors::RemoteApiError;
use crate::config::ShopDomain;

/// Fixed retry wait time in seconds when the response carries no Retry-After.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Crate version, reported in the User-Agent header.
pub const BRIDGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP methods used against the admin REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Authenticated JSON client for a single shop's admin REST API.
///
/// The client handles:
/// - Base URI construction from the shop domain (or an explicit override)
/// - Default headers including User-Agent and the access token
/// - Retry for 429 responses, honoring Retry-After
/// - JSON body decoding into caller-supplied types
///
/// Retries default to a single attempt so that callers relying on fail-fast
/// semantics (the pagination aggregator in particular) see the first failure
/// immediately; use [`tries`](Self::tries) to opt in to retries.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust
/// use shopify_bridge::clients::RestClient;
/// use shopify_bridge::ShopDomain;
///
/// let shop = ShopDomain::new("my-store").unwrap();
/// let client = RestClient::new(&shop, "access-token");
/// assert_eq!(client.base_url(), "https://my-store.myshopify.com/admin");
/// ```
#[derive(Debug)]
pub struct RestClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL including the admin prefix (e.g., `https://shop.myshopify.com/admin`).
    base_url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Number of attempts per request (1 = no retries).
    tries: u32,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new client for the given shop.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(shop: &ShopDomain, access_token: &str) -> Self {
        Self::with_base_url(format!("https://{}/admin", shop.as_ref()), access_token)
    }

    /// Creates a new client against an explicit base URL.
    ///
    /// Useful when the admin API is reached through a proxy, or in tests
    /// against a local mock server.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, access_token: &str) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();

        let user_agent = format!("Shopify Bridge v{BRIDGE_VERSION} | Rust");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        if !access_token.is_empty() {
            default_headers.insert(
                "X-Shopify-Access-Token".to_string(),
                access_token.to_string(),
            );
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            default_headers,
            tries: 1,
        }
    }

    /// Sets the number of attempts per request (1 = no retries).
    ///
    /// Only 429 responses are retried; the Retry-After header is honored
    /// when present.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = if tries == 0 { 1 } else { tries };
        self
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a GET request and decodes the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] on network failure, a non-2xx response, or
    /// a response body that does not decode as `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RemoteApiError> {
        self.send(Method::Get, path, query, None).await
    }

    /// Sends a POST request with a JSON body and decodes the response.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] on network failure, a non-2xx response, or
    /// a response body that does not decode as `T`.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, RemoteApiError> {
        let body = serde_json::to_value(body).map_err(|e| RemoteApiError::UnexpectedBody {
            message: format!("request body failed to serialize: {e}"),
        })?;
        self.send(Method::Post, path, &[], Some(body)).await
    }

    /// Sends a PUT request with a JSON body and decodes the response.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] on network failure, a non-2xx response, or
    /// a response body that does not decode as `T`.
    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, RemoteApiError> {
        let body = serde_json::to_value(body).map_err(|e| RemoteApiError::UnexpectedBody {
            message: format!("request body failed to serialize: {e}"),
        })?;
        self.send(Method::Put, path, &[], Some(body)).await
    }

    /// Sends a DELETE request and decodes the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] on network failure, a non-2xx response, or
    /// a response body that does not decode as `T`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteApiError> {
        self.send(Method::Delete, path, &[], None).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T, RemoteApiError> {
        let url = format!("{}/{}", self.base_url, path);

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let mut req_builder = match method {
                Method::Get => self.client.get(&url),
                Method::Post => self.client.post(&url),
                Method::Put => self.client.put(&url),
                Method::Delete => self.client.delete(&url),
            };

            for (key, value) in &self.default_headers {
                req_builder = req_builder.header(key, value);
            }

            if !query.is_empty() {
                req_builder = req_builder.query(query);
            }

            if let Some(body) = &body {
                req_builder = req_builder.json(body);
            }

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let request_id = res
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            let retry_after = res
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<f64>().ok());
            let body_text = res.text().await.unwrap_or_default();

            if (200..300).contains(&code) {
                return serde_json::from_str(&body_text).map_err(|e| {
                    RemoteApiError::UnexpectedBody {
                        message: format!("failed to decode response from {path}: {e}"),
                    }
                });
            }

            let message = Self::serialize_error(&body_text);

            // Only rate-limit responses are retried.
            if code != 429 || attempt >= self.tries {
                return Err(RemoteApiError::Response {
                    code,
                    message,
                    error_reference: request_id,
                });
            }

            let delay = retry_after.map_or(
                std::time::Duration::from_secs(RETRY_WAIT_TIME),
                std::time::Duration::from_secs_f64,
            );
            tracing::debug!(path, attempt, ?delay, "rate limited, retrying");
            tokio::time::sleep(delay).await;
        }
    }

    /// Extracts the platform's error fields from a response body.
    fn serialize_error(body_text: &str) -> String {
        let Ok(body) = serde_json::from_str::<serde_json::Value>(body_text) else {
            return body_text.to_string();
        };

        let mut error_body = serde_json::Map::new();
        if let Some(errors) = body.get("errors") {
            error_body.insert("errors".to_string(), errors.clone());
        }
        if let Some(error) = body.get("error") {
            error_body.insert("error".to_string(), error.clone());
        }

        if error_body.is_empty() {
            body_text.to_string()
        } else {
            serde_json::to_string(&error_body).unwrap_or_else(|_| body_text.to_string())
        }
    }
}
