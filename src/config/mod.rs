//! Configuration types for the bridge.
//!
//! This module provides the core configuration consumed by the pagination
//! aggregator and the webhook reconciliation entry points.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`BridgeConfig`]: The main configuration struct holding all bridge settings
//! - [`BridgeConfigBuilder`]: A builder for constructing [`BridgeConfig`] instances
//! - [`AppName`]: A validated application name newtype
//! - [`CallbackBase`]: A validated webhook callback base URL
//! - [`ShopDomain`]: A validated Shopify shop domain
//!
//! # Example
//!
//! ```rust
//! use shopify_bridge::{AppName, BridgeConfig, CallbackBase};
//!
//! let config = BridgeConfig::builder()
//!     .app_name(AppName::new("my-shop-app").unwrap())
//!     .callback_base(CallbackBase::new("https://myapp.example.com").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert!(config.webhooks_enabled());
//! ```

mod newtypes;

pub use newtypes::{AppName, CallbackBase, ShopDomain};

use crate::error::ConfigError;
use crate::webhooks::WebhookTopic;

/// Default number of items requested per page, the platform's maximum.
pub const DEFAULT_PAGE_SIZE: u32 = 250;

/// Default cap on concurrently in-flight remote calls per aggregation or sync.
pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;

/// Configuration for the bridge.
///
/// Holds the app identity, the public callback base for webhook
/// subscriptions, pagination settings, and the webhook subscription toggle.
///
/// The subscription toggle is an explicit configuration value rather than a
/// process-wide environment flag, so both states can be exercised in tests
/// without process-level side effects.
///
/// # Thread Safety
///
/// `BridgeConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use shopify_bridge::{AppName, BridgeConfig, CallbackBase};
///
/// let config = BridgeConfig::builder()
///     .app_name(AppName::new("my-shop-app").unwrap())
///     .callback_base(CallbackBase::new("https://myapp.example.com").unwrap())
///     .webhooks_enabled(false)
///     .build()
///     .unwrap();
///
/// assert!(!config.webhooks_enabled());
/// ```
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    app_name: AppName,
    callback_base: CallbackBase,
    page_size: u32,
    fetch_concurrency: usize,
    webhooks_enabled: bool,
}

impl BridgeConfig {
    /// Creates a new builder for constructing a `BridgeConfig`.
    #[must_use]
    pub fn builder() -> BridgeConfigBuilder {
        BridgeConfigBuilder::new()
    }

    /// Returns the app name.
    #[must_use]
    pub const fn app_name(&self) -> &AppName {
        &self.app_name
    }

    /// Returns the webhook callback base URL.
    #[must_use]
    pub const fn callback_base(&self) -> &CallbackBase {
        &self.callback_base
    }

    /// Returns the number of items requested per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the cap on concurrently in-flight remote calls.
    #[must_use]
    pub const fn fetch_concurrency(&self) -> usize {
        self.fetch_concurrency
    }

    /// Returns whether webhook subscription is enabled.
    ///
    /// When `false`, [`subscribe`](crate::webhooks::subscribe) becomes a
    /// no-op success without issuing any remote call.
    #[must_use]
    pub const fn webhooks_enabled(&self) -> bool {
        self.webhooks_enabled
    }

    /// Returns the callback address for a webhook topic.
    ///
    /// The address follows the fixed template
    /// `{callback_base}/webhook/{app_name}/{topic}`, which is also the route
    /// shape under which receiving apps register their webhook handlers.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shopify_bridge::{AppName, BridgeConfig, CallbackBase, WebhookTopic};
    ///
    /// let config = BridgeConfig::builder()
    ///     .app_name(AppName::new("my-shop-app").unwrap())
    ///     .callback_base(CallbackBase::new("https://myapp.example.com").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     config.callback_address(WebhookTopic::OrdersCreate),
    ///     "https://myapp.example.com/webhook/my-shop-app/orders/create"
    /// );
    /// ```
    #[must_use]
    pub fn callback_address(&self, topic: WebhookTopic) -> String {
        format!(
            "{}/webhook/{}/{}",
            self.callback_base.as_ref(),
            self.app_name.as_ref(),
            topic
        )
    }
}

// Verify BridgeConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BridgeConfig>();
};

/// Builder for constructing [`BridgeConfig`] instances.
///
/// Required fields are `app_name` and `callback_base`. All other fields have
/// defaults.
///
/// # Defaults
///
/// - `page_size`: [`DEFAULT_PAGE_SIZE`] (250)
/// - `fetch_concurrency`: [`DEFAULT_FETCH_CONCURRENCY`] (8)
/// - `webhooks_enabled`: `true`
#[derive(Debug, Default)]
pub struct BridgeConfigBuilder {
    app_name: Option<AppName>,
    callback_base: Option<CallbackBase>,
    page_size: Option<u32>,
    fetch_concurrency: Option<usize>,
    webhooks_enabled: Option<bool>,
}

impl BridgeConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the app name (required).
    #[must_use]
    pub fn app_name(mut self, name: AppName) -> Self {
        self.app_name = Some(name);
        self
    }

    /// Sets the webhook callback base URL (required).
    #[must_use]
    pub fn callback_base(mut self, base: CallbackBase) -> Self {
        self.callback_base = Some(base);
        self
    }

    /// Sets the number of items requested per page.
    #[must_use]
    pub const fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Sets the cap on concurrently in-flight remote calls.
    #[must_use]
    pub const fn fetch_concurrency(mut self, limit: usize) -> Self {
        self.fetch_concurrency = Some(limit);
        self
    }

    /// Enables or disables webhook subscription.
    #[must_use]
    pub const fn webhooks_enabled(mut self, enabled: bool) -> Self {
        self.webhooks_enabled = Some(enabled);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `app_name` or
    /// `callback_base` was not set, [`ConfigError::ZeroPageSize`] if the page
    /// size is zero, or [`ConfigError::ZeroFetchConcurrency`] if the
    /// concurrency limit is zero.
    pub fn build(self) -> Result<BridgeConfig, ConfigError> {
        let app_name = self
            .app_name
            .ok_or(ConfigError::MissingRequiredField { field: "app_name" })?;
        let callback_base = self.callback_base.ok_or(ConfigError::MissingRequiredField {
            field: "callback_base",
        })?;

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }

        let fetch_concurrency = self.fetch_concurrency.unwrap_or(DEFAULT_FETCH_CONCURRENCY);
        if fetch_concurrency == 0 {
            return Err(ConfigError::ZeroFetchConcurrency);
        }

        Ok(BridgeConfig {
            app_name,
            callback_base,
            page_size,
            fetch_concurrency,
            webhooks_enabled: self.webhooks_enabled.unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_builder() -> BridgeConfigBuilder {
        BridgeConfig::builder()
            .app_name(AppName::new("test-app").unwrap())
            .callback_base(CallbackBase::new("https://app.example.com").unwrap())
    }

    #[test]
    fn test_build_with_defaults() {
        let config = minimal_builder().build().unwrap();
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(config.fetch_concurrency(), DEFAULT_FETCH_CONCURRENCY);
        assert!(config.webhooks_enabled());
    }

    #[test]
    fn test_build_fails_without_app_name() {
        let result = BridgeConfig::builder()
            .callback_base(CallbackBase::new("https://app.example.com").unwrap())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "app_name" })
        ));
    }

    #[test]
    fn test_build_fails_without_callback_base() {
        let result = BridgeConfig::builder()
            .app_name(AppName::new("test-app").unwrap())
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "callback_base"
            })
        ));
    }

    #[test]
    fn test_build_rejects_zero_page_size() {
        let result = minimal_builder().page_size(0).build();
        assert!(matches!(result, Err(ConfigError::ZeroPageSize)));
    }

    #[test]
    fn test_build_rejects_zero_concurrency() {
        let result = minimal_builder().fetch_concurrency(0).build();
        assert!(matches!(result, Err(ConfigError::ZeroFetchConcurrency)));
    }

    #[test]
    fn test_callback_address_template() {
        let config = minimal_builder().build().unwrap();
        assert_eq!(
            config.callback_address(WebhookTopic::OrdersCreate),
            "https://app.example.com/webhook/test-app/orders/create"
        );
    }

    #[test]
    fn test_webhooks_can_be_disabled() {
        let config = minimal_builder().webhooks_enabled(false).build().unwrap();
        assert!(!config.webhooks_enabled());
    }
}
