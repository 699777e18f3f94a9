//! # Shopify Bridge
//!
//! A toolkit for exposing the Shopify admin REST API through a local HTTP
//! surface, adding three capabilities the raw SDK lacks:
//!
//! - **Paginated aggregation** ([`pagination`]): read a whole resource
//!   collection as one ordered result — count, fetch every page concurrently
//!   under a configurable bound, reassemble in page order.
//! - **Webhook reconciliation** ([`webhooks`]): diff a declared topic set
//!   against the subscriptions a shop already has, then create or update as
//!   needed with per-topic failure isolation, so re-running setup is
//!   idempotent and never duplicates or clobbers a subscription.
//! - **Argument binding** ([`ops`]): translate a JSON-encoded query payload
//!   into a positional argument list validated against an ordered parameter
//!   schema, so one generic route handler can serve many remote operations.
//!
//! The bridge owns no wire protocol of its own. Remote collaborators are
//! reached through the trait contracts in [`remote`]; the REST-backed
//! defaults in [`resources`] drive the admin API via [`clients::RestClient`].
//! Router wiring, session storage, and token exchange are left to the host
//! application.
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_bridge::{AppName, BridgeConfig, CallbackBase};
//!
//! let config = BridgeConfig::builder()
//!     .app_name(AppName::new("my-shop-app").unwrap())
//!     .callback_base(CallbackBase::new("https://myapp.example.com").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Aggregating a Collection
//!
//! ```rust,ignore
//! use shopify_bridge::clients::RestClient;
//! use shopify_bridge::resources::RestCollection;
//! use shopify_bridge::ShopDomain;
//!
//! let shop = ShopDomain::new("my-store")?;
//! let client = RestClient::new(&shop, &access_token);
//!
//! let products = RestCollection::products(&client).list_all(&config).await?;
//! println!("{} products", products.len());
//! ```
//!
//! ## Reconciling Webhook Subscriptions
//!
//! ```rust,ignore
//! use shopify_bridge::resources::RestWebhooks;
//! use shopify_bridge::webhooks::subscribe_all;
//!
//! let channel = RestWebhooks::new(&client);
//! let report = subscribe_all(&config, &channel).await?;
//! for failure in report.failures() {
//!     eprintln!("webhook {} failed", failure.topic);
//! }
//! ```
//!
//! ## Binding Operation Arguments
//!
//! ```rust
//! use shopify_bridge::ops::{bind_args, ArgumentSpec, ParamSpec};
//!
//! let spec = ArgumentSpec::new(vec![
//!     ParamSpec::required("id"),
//!     ParamSpec::optional("fields"),
//! ]);
//! let args = bind_args(r#"{"id": 632910392}"#, &spec).unwrap();
//! assert_eq!(args.len(), 1);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the webhook subscription toggle and concurrency
//!   limits are explicit configuration values, never process-wide flags
//! - **Fail-fast validation**: configuration newtypes validate on
//!   construction; argument binding fails on the first missing parameter
//! - **Visible partial success**: webhook sync reports one outcome per
//!   topic instead of failing as a whole
//! - **Async-first**: designed for use with the Tokio runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod ops;
pub mod pagination;
pub mod remote;
pub mod resources;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use clients::{RemoteApiError, RestClient};
pub use config::{
    AppName, BridgeConfig, BridgeConfigBuilder, CallbackBase, ShopDomain, DEFAULT_FETCH_CONCURRENCY,
    DEFAULT_PAGE_SIZE,
};
pub use error::ConfigError;
pub use ops::{bind_args, ArgumentSpec, ParamSpec, ValidationError};
pub use pagination::{aggregate, PaginationPlan};
pub use webhooks::{SyncOutcome, SyncReport, SyncStatus, WebhookTopic};
