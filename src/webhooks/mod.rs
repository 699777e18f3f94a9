//! Idempotent webhook subscription reconciliation.
//!
//! Webhook subscriptions persist on the platform until deleted, so an app
//! restarting (or its public address changing) must check which
//! subscriptions already exist before trying to create them. This module
//! reconciles a declared topic set against remote state in two phases:
//!
//! 1. **Diff** ([`diff`]): classify each desired topic as create, update, or
//!    report-only, attaching the existing subscription id when updating.
//! 2. **Sync** ([`sync`]): execute the classified actions concurrently with
//!    per-item failure isolation.
//!
//! [`subscribe`] composes the two behind the configuration's subscription
//! toggle; [`subscribe_many`] runs several shops concurrently.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_bridge::webhooks::{subscribe_all, SyncStatus};
//!
//! let report = subscribe_all(&config, &channel).await?;
//! for outcome in report.outcomes() {
//!     match &outcome.status {
//!         SyncStatus::Created(id) => println!("{}: created {id}", outcome.topic),
//!         SyncStatus::Updated(id) => println!("{}: updated {id}", outcome.topic),
//!         SyncStatus::Skipped => println!("{}: skipped", outcome.topic),
//!         SyncStatus::Failed(error) => println!("{}: failed: {error}", outcome.topic),
//!     }
//! }
//! ```

mod diff;
mod sync;
mod topics;
mod types;

pub use diff::diff;
pub use sync::{subscribe, subscribe_all, subscribe_many, sync};
pub use topics::{UnknownTopicError, WebhookTopic};
pub use types::{
    ReconciliationItem, SyncOutcome, SyncReport, SyncStatus, WebhookFormat, WebhookParams,
    WebhookSubscription,
};
