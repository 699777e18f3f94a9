//! Transparent aggregation of a paginated resource collection.
//!
//! The admin REST API caps list responses at a fixed page size, so reading a
//! whole collection means counting first, fetching every page, and splicing
//! the pages back together. This module does that once, generically, for any
//! [`CountedResource`] handle:
//!
//! 1. `count()` the collection (a count failure fails the aggregation)
//! 2. Plan the minimal page sequence ([`PaginationPlan`])
//! 3. Fetch all pages concurrently under a configurable bound
//! 4. Reassemble in page-index order and flatten
//!
//! No consistency snapshot is taken: if the remote collection mutates
//! between the count and the page fetches, duplicates or gaps in the result
//! are accepted as a known limitation.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_bridge::pagination::aggregate;
//!
//! let products = aggregate(&resources::products(&client), &config).await?;
//! println!("{} products", products.len());
//! ```

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::clients::RemoteApiError;
use crate::config::BridgeConfig;
use crate::remote::{CountedResource, PageRequest};

/// The minimal page sequence needed to cover a counted collection.
///
/// # Invariant
///
/// `page_count = max(1, ceil(total_count / page_size))`. At least one page is
/// always fetched, even for an empty collection: a list of zero items is
/// itself the valid single-page result, so the call is made rather than
/// skipped.
///
/// # Example
///
/// ```rust
/// use shopify_bridge::pagination::PaginationPlan;
///
/// let plan = PaginationPlan::new(501, 250);
/// assert_eq!(plan.page_count(), 3);
///
/// let empty = PaginationPlan::new(0, 250);
/// assert_eq!(empty.page_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPlan {
    total_count: u64,
    page_size: u32,
    page_count: u32,
}

impl PaginationPlan {
    /// Computes the page sequence for a collection of `total_count` items
    /// read `page_size` at a time.
    ///
    /// A zero `page_size` is treated as 1 rather than panicking; the
    /// configuration layer rejects zero before a plan is ever built.
    #[must_use]
    pub const fn new(total_count: u64, page_size: u32) -> Self {
        let page_size = if page_size == 0 { 1 } else { page_size };
        let pages = total_count.div_ceil(page_size as u64);
        let page_count = if pages == 0 {
            1
        } else if pages > u32::MAX as u64 {
            u32::MAX
        } else {
            pages as u32
        };
        Self {
            total_count,
            page_size,
            page_count,
        }
    }

    /// Returns the total item count the plan was built from.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns the page size the plan was built with.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the number of pages to fetch (always at least 1).
    #[must_use]
    pub const fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Returns the 1-based page numbers to fetch, in order.
    pub fn pages(&self) -> impl Iterator<Item = u32> {
        1..=self.page_count
    }
}

/// Aggregates every page of a resource collection into one ordered sequence.
///
/// Pages are fetched concurrently, at most `config.fetch_concurrency()` in
/// flight at a time, and reassembled in page-index order regardless of
/// completion order. Within each page the remote's item order is preserved.
///
/// # Errors
///
/// Returns [`RemoteApiError`] if the count call or any single page fetch
/// fails. No partial result is ever returned: a partial collection is unsafe
/// to hand to a caller expecting the complete one.
pub async fn aggregate<R: CountedResource>(
    resource: &R,
    config: &BridgeConfig,
) -> Result<Vec<R::Item>, RemoteApiError> {
    aggregate_pages(resource, config.page_size(), config.fetch_concurrency()).await
}

/// [`aggregate`] with an explicit page size and concurrency bound.
///
/// # Errors
///
/// Returns [`RemoteApiError`] if the count call or any single page fetch
/// fails.
pub async fn aggregate_pages<R: CountedResource>(
    resource: &R,
    page_size: u32,
    concurrency: usize,
) -> Result<Vec<R::Item>, RemoteApiError> {
    let total_count = resource.count().await?;
    let plan = PaginationPlan::new(total_count, page_size);
    tracing::debug!(
        total_count,
        pages = plan.page_count(),
        page_size = plan.page_size(),
        "aggregating paginated collection"
    );

    // `buffered` keeps at most `concurrency` fetches in flight and yields
    // results in page order no matter which fetch completes first.
    let pages: Vec<Vec<R::Item>> = stream::iter(plan.pages().map(|page| {
        resource.list(PageRequest {
            limit: plan.page_size(),
            page,
        })
    }))
    .buffered(concurrency.max(1))
    .try_collect()
    .await?;

    Ok(pages.into_iter().flatten().collect())
}
