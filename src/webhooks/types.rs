//! Data types for webhook reconciliation.
//!
//! This module contains the request-scoped values that flow between the diff
//! engine and the sync executor, plus the remote subscription record shape.
//! None of these outlive a single reconciliation run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::RemoteApiError;

use super::topics::WebhookTopic;

/// The format for webhook payload delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WebhookFormat {
    /// JSON format (default).
    #[default]
    Json,
    /// XML format.
    Xml,
}

/// A webhook subscription as the remote platform records it.
///
/// Returned by [`WebhookChannel::list`](crate::remote::WebhookChannel::list)
/// and by create/update calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookSubscription {
    /// The remote identifier of the subscription.
    pub id: u64,

    /// The topic the subscription delivers.
    pub topic: WebhookTopic,

    /// The callback address the platform posts payloads to.
    pub address: String,

    /// The payload format.
    #[serde(default)]
    pub format: WebhookFormat,

    /// When the subscription was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the subscription was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The desired shape of one webhook subscription.
///
/// Built by the diff engine with a deterministic callback address; `id` is
/// absent until the descriptor has been matched against an existing remote
/// subscription.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WebhookParams {
    /// The topic to subscribe to.
    pub topic: WebhookTopic,

    /// The callback address payloads should be posted to.
    pub address: String,

    /// The payload format.
    pub format: WebhookFormat,

    /// The matched remote subscription id, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

/// One classified reconciliation action.
///
/// Produced by [`diff`](super::diff), consumed once by
/// [`sync`](super::sync).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationItem {
    /// The desired subscription, carrying the matched id when updating.
    pub params: WebhookParams,

    /// Whether an existing remote subscription for this topic was found.
    pub needs_update: bool,

    /// Whether the topic requires the Sales Channel SDK and must only be
    /// reported, never written.
    pub requires_sales_channel_sdk: bool,
}

/// What happened to one reconciliation item.
#[derive(Debug)]
pub enum SyncStatus {
    /// The topic requires a capability the reconciler does not have; no
    /// remote call was made.
    Skipped,
    /// A new subscription was created, with its remote id.
    Created(u64),
    /// The existing subscription was updated, with its remote id.
    Updated(u64),
    /// The remote write failed; the other items were not affected.
    Failed(RemoteApiError),
}

/// The outcome of syncing one reconciliation item.
///
/// Outcomes carry their originating topic so callers can correlate them
/// without relying on array position.
#[derive(Debug)]
pub struct SyncOutcome {
    /// The topic the item was reconciling.
    pub topic: WebhookTopic,

    /// What happened.
    pub status: SyncStatus,
}

impl SyncOutcome {
    /// Returns whether this outcome is a failure.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.status, SyncStatus::Failed(_))
    }
}

/// The result of a whole reconciliation run.
#[derive(Debug)]
pub enum SyncReport {
    /// Webhook subscription is disabled by configuration; no remote call was
    /// made.
    Disabled,
    /// The run completed, with one outcome per desired topic.
    Completed(Vec<SyncOutcome>),
}

impl SyncReport {
    /// Returns the outcomes of the run, empty when subscription is disabled.
    #[must_use]
    pub fn outcomes(&self) -> &[SyncOutcome] {
        match self {
            Self::Disabled => &[],
            Self::Completed(outcomes) => outcomes,
        }
    }

    /// Returns the outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &SyncOutcome> {
        self.outcomes().iter().filter(|o| o.is_failed())
    }
}
