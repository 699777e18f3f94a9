//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A validated application name.
///
/// The app name appears as a path segment in every webhook callback address
/// (`{base}/webhook/{app_name}/{topic}`), so it is restricted to characters
/// that are safe in a URL path without escaping.
///
/// # Example
///
/// ```rust
/// use shopify_bridge::AppName;
///
/// let name = AppName::new("my-shop-app").unwrap();
/// assert_eq!(name.as_ref(), "my-shop-app");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppName(String);

impl AppName {
    /// Creates a new validated app name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAppName`] if the name is empty, or
    /// [`ConfigError::InvalidAppName`] if it contains characters that cannot
    /// appear in a URL path segment.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::EmptyAppName);
        }
        let valid = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ConfigError::InvalidAppName { name });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for AppName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated Shopify shop domain.
///
/// This newtype validates and normalizes shop domains to the full
/// `shop.myshopify.com` format.
///
/// # Accepted Formats
///
/// - `shop-name` - normalized to `shop-name.myshopify.com`
/// - `shop-name.myshopify.com` - used as-is
///
/// # Example
///
/// ```rust
/// use shopify_bridge::ShopDomain;
///
/// // Short format is normalized
/// let domain = ShopDomain::new("my-store").unwrap();
/// assert_eq!(domain.as_ref(), "my-store.myshopify.com");
/// assert_eq!(domain.shop_name(), "my-store");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShopDomain {
    full_domain: String,
    shop_name_end: usize,
}

impl ShopDomain {
    const SUFFIX: &'static str = ".myshopify.com";

    /// Creates a new validated shop domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShopDomain`] if the domain is invalid.
    pub fn new(domain: impl Into<String>) -> Result<Self, ConfigError> {
        let domain = domain.into();
        let domain = domain.trim().to_lowercase();

        if domain.is_empty() {
            return Err(ConfigError::InvalidShopDomain { domain });
        }

        let (shop_name, full_domain) = if let Some(shop_name) = domain.strip_suffix(Self::SUFFIX) {
            (shop_name.to_string(), domain)
        } else if domain.contains('.') {
            // Contains a dot but not the myshopify.com suffix
            return Err(ConfigError::InvalidShopDomain { domain });
        } else {
            (domain.clone(), format!("{}{}", domain, Self::SUFFIX))
        };

        if !Self::is_valid_shop_name(&shop_name) {
            return Err(ConfigError::InvalidShopDomain {
                domain: full_domain,
            });
        }

        Ok(Self {
            shop_name_end: shop_name.len(),
            full_domain,
        })
    }

    /// Returns the shop name portion of the domain.
    ///
    /// For `my-store.myshopify.com`, this returns `my-store`.
    #[must_use]
    pub fn shop_name(&self) -> &str {
        &self.full_domain[..self.shop_name_end]
    }

    fn is_valid_shop_name(name: &str) -> bool {
        if name.is_empty() {
            return false;
        }

        // Shop names contain lowercase letters, numbers, and hyphens,
        // and cannot start or end with a hyphen.
        if name.starts_with('-') || name.ends_with('-') {
            return false;
        }

        name.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.full_domain
    }
}

impl Serialize for ShopDomain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.full_domain)
    }
}

impl<'de> Deserialize<'de> for ShopDomain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated base URL for webhook callback addresses.
///
/// This is the publicly reachable address of the app; per-topic callback
/// paths are appended to it when webhook subscriptions are created.
///
/// # Example
///
/// ```rust
/// use shopify_bridge::CallbackBase;
///
/// let base = CallbackBase::new("https://myapp.example.com").unwrap();
/// assert_eq!(base.scheme(), "https");
/// assert_eq!(base.as_ref(), "https://myapp.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackBase {
    url: String,
    scheme_end: usize,
}

impl CallbackBase {
    /// Creates a new validated callback base URL.
    ///
    /// A trailing slash is stripped so that appending a path segment never
    /// produces a double slash.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCallbackBase`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidCallbackBase { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidCallbackBase { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidCallbackBase { url: url.clone() });
        }

        Ok(Self { url, scheme_end })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }
}

impl AsRef<str> for CallbackBase {
    fn as_ref(&self) -> &str {
        &self.url
    }
}
