//! Execution of classified reconciliation actions against the remote.
//!
//! The executor favors visible partial success over all-or-nothing: one
//! topic's transient failure (rate limiting, say) must not discard the
//! successful writes for the other topics, and re-running is always
//! idempotent. [`sync`] therefore never fails as a whole; callers inspect
//! the outcome sequence for partial failure.

use futures::stream::{self, StreamExt};

use crate::clients::RemoteApiError;
use crate::config::BridgeConfig;
use crate::remote::WebhookChannel;

use super::diff::diff;
use super::topics::WebhookTopic;
use super::types::{ReconciliationItem, SyncOutcome, SyncReport, SyncStatus};

/// Executes reconciliation items against a shop's webhook channel.
///
/// Items are dispatched concurrently, at most `concurrency` in flight at a
/// time, with per-item failure isolation. The returned sequence has exactly
/// one outcome per input item, in input order, each tagged with its
/// originating topic.
///
/// Concurrent writes for different topics on the same shop are safe because
/// the platform enforces at most one subscription per topic per shop. Two
/// overlapping `sync` calls for the same topic set are not serialized here
/// and may race; callers own that exclusion.
pub async fn sync<C: WebhookChannel>(
    channel: &C,
    items: Vec<ReconciliationItem>,
    concurrency: usize,
) -> Vec<SyncOutcome> {
    stream::iter(items.into_iter().map(|item| sync_one(channel, item)))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

async fn sync_one<C: WebhookChannel>(channel: &C, item: ReconciliationItem) -> SyncOutcome {
    let topic = item.params.topic;

    if item.requires_sales_channel_sdk {
        tracing::debug!(%topic, "skipping webhook topic that requires the Sales Channel SDK");
        return SyncOutcome {
            topic,
            status: SyncStatus::Skipped,
        };
    }

    let status = match (item.needs_update, item.params.id) {
        (true, Some(id)) => match channel.update(id, &item.params).await {
            Ok(subscription) => {
                tracing::debug!(%topic, id = subscription.id, "updated webhook");
                SyncStatus::Updated(subscription.id)
            }
            Err(error) => {
                tracing::warn!(%topic, %error, "error on update webhook");
                SyncStatus::Failed(error)
            }
        },
        _ => match channel.create(&item.params).await {
            Ok(subscription) => {
                tracing::debug!(%topic, id = subscription.id, "created webhook");
                SyncStatus::Created(subscription.id)
            }
            Err(error) => {
                tracing::warn!(%topic, %error, "error on create webhook");
                SyncStatus::Failed(error)
            }
        },
    };

    SyncOutcome { topic, status }
}

/// Reconciles the desired topics against a shop's existing subscriptions.
///
/// This is the per-shop entry point: it lists the shop's current
/// subscriptions, classifies the desired topics with
/// [`diff`](super::diff), and executes the result with [`sync`].
///
/// When webhook subscription is disabled in the configuration, the call is a
/// no-op success ([`SyncReport::Disabled`]) and no remote call is made.
///
/// # Errors
///
/// Returns [`RemoteApiError`] only if listing the existing subscriptions
/// fails; create/update failures are captured per topic in the report.
pub async fn subscribe<C: WebhookChannel>(
    config: &BridgeConfig,
    channel: &C,
    topics: &[WebhookTopic],
) -> Result<SyncReport, RemoteApiError> {
    if !config.webhooks_enabled() {
        tracing::info!("webhook subscription disabled");
        return Ok(SyncReport::Disabled);
    }

    let existing = channel.list().await?;
    let items = diff(config, topics, &existing);
    let outcomes = sync(channel, items, config.fetch_concurrency()).await;
    Ok(SyncReport::Completed(outcomes))
}

/// [`subscribe`] over the whole platform topic catalog.
///
/// # Errors
///
/// Returns [`RemoteApiError`] if listing the existing subscriptions fails.
pub async fn subscribe_all<C: WebhookChannel>(
    config: &BridgeConfig,
    channel: &C,
) -> Result<SyncReport, RemoteApiError> {
    subscribe(config, channel, WebhookTopic::ALL).await
}

/// Reconciles several shops' channels concurrently.
///
/// Shops are independent: each gets its own report, and one shop's list
/// failure does not affect the others. Reports are returned in channel
/// order.
pub async fn subscribe_many<C: WebhookChannel>(
    config: &BridgeConfig,
    channels: &[C],
    topics: &[WebhookTopic],
) -> Vec<Result<SyncReport, RemoteApiError>> {
    futures::future::join_all(
        channels
            .iter()
            .map(|channel| subscribe(config, channel, topics)),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppName, CallbackBase};
    use crate::webhooks::types::{WebhookFormat, WebhookParams, WebhookSubscription};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    /// In-memory channel recording writes; configurable per-topic failures.
    struct FakeChannel {
        existing: Mutex<Vec<WebhookSubscription>>,
        fail_topics: Vec<WebhookTopic>,
        next_id: AtomicU64,
    }

    impl FakeChannel {
        fn new(existing: Vec<WebhookSubscription>) -> Self {
            Self {
                existing: Mutex::new(existing),
                fail_topics: Vec::new(),
                next_id: AtomicU64::new(100),
            }
        }

        fn failing(mut self, topics: Vec<WebhookTopic>) -> Self {
            self.fail_topics = topics;
            self
        }

        fn subscription(&self, id: u64, params: &WebhookParams) -> WebhookSubscription {
            WebhookSubscription {
                id,
                topic: params.topic,
                address: params.address.clone(),
                format: params.format,
                created_at: None,
                updated_at: None,
            }
        }

        fn check_failure(&self, topic: WebhookTopic) -> Result<(), RemoteApiError> {
            if self.fail_topics.contains(&topic) {
                return Err(RemoteApiError::Response {
                    code: 429,
                    message: "rate limited".to_string(),
                    error_reference: None,
                });
            }
            Ok(())
        }
    }

    impl WebhookChannel for FakeChannel {
        async fn list(&self) -> Result<Vec<WebhookSubscription>, RemoteApiError> {
            Ok(self.existing.lock().unwrap().clone())
        }

        async fn create(
            &self,
            params: &WebhookParams,
        ) -> Result<WebhookSubscription, RemoteApiError> {
            self.check_failure(params.topic)?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let subscription = self.subscription(id, params);
            self.existing.lock().unwrap().push(subscription.clone());
            Ok(subscription)
        }

        async fn update(
            &self,
            id: u64,
            params: &WebhookParams,
        ) -> Result<WebhookSubscription, RemoteApiError> {
            self.check_failure(params.topic)?;
            Ok(self.subscription(id, params))
        }
    }

    fn test_config() -> BridgeConfig {
        BridgeConfig::builder()
            .app_name(AppName::new("test-app").unwrap())
            .callback_base(CallbackBase::new("https://app.example.com").unwrap())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_subscribe_creates_missing_topics() {
        let channel = FakeChannel::new(vec![]);
        let topics = [WebhookTopic::OrdersCreate, WebhookTopic::ProductsUpdate];
        let report = subscribe(&test_config(), &channel, &topics).await.unwrap();

        let outcomes = report.outcomes();
        assert_eq!(outcomes.len(), 2);
        for outcome in outcomes {
            assert!(matches!(outcome.status, SyncStatus::Created(_)));
        }
    }

    #[tokio::test]
    async fn test_one_failing_topic_does_not_stop_the_rest() {
        let channel =
            FakeChannel::new(vec![]).failing(vec![WebhookTopic::ProductsUpdate]);
        let topics = [
            WebhookTopic::OrdersCreate,
            WebhookTopic::ProductsUpdate,
            WebhookTopic::ShopUpdate,
        ];
        let report = subscribe(&test_config(), &channel, &topics).await.unwrap();

        let outcomes = report.outcomes();
        assert_eq!(outcomes.len(), 3);
        assert!(matches!(outcomes[0].status, SyncStatus::Created(_)));
        assert!(matches!(outcomes[1].status, SyncStatus::Failed(_)));
        assert_eq!(outcomes[1].topic, WebhookTopic::ProductsUpdate);
        assert!(matches!(outcomes[2].status, SyncStatus::Created(_)));
    }

    #[tokio::test]
    async fn test_sales_channel_topics_skipped_without_remote_call() {
        // Failure configured for the listing topic proves no write happens.
        let channel =
            FakeChannel::new(vec![]).failing(vec![WebhookTopic::ProductListingsAdd]);
        let topics = [WebhookTopic::ProductListingsAdd];
        let report = subscribe(&test_config(), &channel, &topics).await.unwrap();

        assert!(matches!(report.outcomes()[0].status, SyncStatus::Skipped));
    }

    #[tokio::test]
    async fn test_second_run_updates_instead_of_duplicating() {
        let channel = FakeChannel::new(vec![]);
        let topics = [WebhookTopic::OrdersCreate, WebhookTopic::CartsUpdate];
        let config = test_config();

        let first = subscribe(&config, &channel, &topics).await.unwrap();
        for outcome in first.outcomes() {
            assert!(matches!(outcome.status, SyncStatus::Created(_)));
        }

        // Remote state unchanged between runs: every topic must update, and
        // no duplicate subscription may appear.
        let second = subscribe(&config, &channel, &topics).await.unwrap();
        for outcome in second.outcomes() {
            assert!(matches!(outcome.status, SyncStatus::Updated(_)));
        }
        assert_eq!(channel.existing.lock().unwrap().len(), topics.len());
    }

    #[tokio::test]
    async fn test_disabled_config_short_circuits() {
        let channel = FakeChannel::new(vec![]);
        let config = BridgeConfig::builder()
            .app_name(AppName::new("test-app").unwrap())
            .callback_base(CallbackBase::new("https://app.example.com").unwrap())
            .webhooks_enabled(false)
            .build()
            .unwrap();

        let report = subscribe(&config, &channel, &[WebhookTopic::OrdersCreate])
            .await
            .unwrap();
        assert!(matches!(report, SyncReport::Disabled));
        assert!(channel.existing.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_many_isolates_shops() {
        let shops = vec![
            FakeChannel::new(vec![]),
            FakeChannel::new(vec![]).failing(vec![WebhookTopic::OrdersCreate]),
        ];
        let topics = [WebhookTopic::OrdersCreate];
        let reports = subscribe_many(&test_config(), &shops, &topics).await;

        assert_eq!(reports.len(), 2);
        let first = reports[0].as_ref().unwrap();
        assert!(matches!(first.outcomes()[0].status, SyncStatus::Created(_)));
        // The second shop's write failed but its run still completed.
        let second = reports[1].as_ref().unwrap();
        assert!(second.outcomes()[0].is_failed());
    }
}
