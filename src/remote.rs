//! Contracts for the remote collaborators the bridge drives.
//!
//! The bridge itself owns no wire protocol; it is a transformation layer
//! between an external SDK surface and an external router. This module
//! defines the two handle shapes that surface must provide:
//!
//! - [`CountedResource`]: a resource kind exposing `count()` and paged `list()`
//! - [`WebhookChannel`]: a shop's webhook subscription endpoint
//!
//! Default REST-backed implementations live in
//! [`resources`](crate::resources); tests substitute in-memory fakes.

use crate::clients::RemoteApiError;
use crate::webhooks::{WebhookParams, WebhookSubscription};

/// Options for one page fetch.
///
/// The page number is the only cursor; no pagination token is carried
/// between fetches, which is what allows all pages to be requested
/// concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of items to return.
    pub limit: u32,
    /// 1-based page number.
    pub page: u32,
}

/// A remote resource kind that can be counted and listed page by page.
///
/// Implementors are cheap request-scoped handles; the pagination aggregator
/// borrows one for the duration of a single aggregation.
#[allow(async_fn_in_trait)]
pub trait CountedResource {
    /// The item type one page fetch yields.
    type Item;

    /// Returns the total number of items in the remote collection.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] if the remote call fails. A count failure
    /// is fatal to the whole aggregation.
    async fn count(&self) -> Result<u64, RemoteApiError>;

    /// Returns one page of items, in the remote's order.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] if the remote call fails. A single page
    /// failure is fatal to the whole aggregation.
    async fn list(&self, request: PageRequest) -> Result<Vec<Self::Item>, RemoteApiError>;
}

/// A shop's webhook subscription endpoint.
///
/// One channel corresponds to one shop; processing several shops means
/// driving several channels.
#[allow(async_fn_in_trait)]
pub trait WebhookChannel {
    /// Lists all existing webhook subscriptions for the shop.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] if the remote call fails. A list failure is
    /// fatal to that shop's reconciliation run.
    async fn list(&self) -> Result<Vec<WebhookSubscription>, RemoteApiError>;

    /// Creates a new webhook subscription.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] if the remote call fails. The sync executor
    /// captures this per item rather than propagating it.
    async fn create(&self, params: &WebhookParams) -> Result<WebhookSubscription, RemoteApiError>;

    /// Updates an existing webhook subscription by id.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] if the remote call fails. The sync executor
    /// captures this per item rather than propagating it.
    async fn update(
        &self,
        id: u64,
        params: &WebhookParams,
    ) -> Result<WebhookSubscription, RemoteApiError>;
}
