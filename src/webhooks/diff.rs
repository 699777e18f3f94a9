//! Classification of desired webhook topics against remote state.
//!
//! Given the set of topics an app wants subscribed and the subscriptions a
//! shop already has, [`diff`] decides per topic whether the sync executor
//! should create, update, or skip — so that re-running subscription setup is
//! idempotent and never duplicates or clobbers a subscription.

use crate::config::BridgeConfig;

use super::topics::WebhookTopic;
use super::types::{ReconciliationItem, WebhookFormat, WebhookParams, WebhookSubscription};

/// Classifies each desired topic as create, update, or report-only.
///
/// Topics are processed in input order and each yields exactly one
/// [`ReconciliationItem`]:
///
/// - The callback address is derived from the fixed template
///   `{callback_base}/webhook/{app_name}/{topic}`.
/// - If an existing subscription carries the same topic, the item is marked
///   `needs_update` and carries that subscription's id. The scan does not
///   break on the first match, so if the remote ever returns duplicate
///   subscriptions for one topic, the last one wins.
/// - Topics that require the Sales Channel SDK are flagged and will be
///   skipped by the executor regardless of remote state.
///
/// # Example
///
/// ```rust
/// use shopify_bridge::webhooks::{diff, WebhookTopic};
/// use shopify_bridge::{AppName, BridgeConfig, CallbackBase};
///
/// let config = BridgeConfig::builder()
///     .app_name(AppName::new("my-app").unwrap())
///     .callback_base(CallbackBase::new("https://app.example.com").unwrap())
///     .build()
///     .unwrap();
///
/// let items = diff(&config, &[WebhookTopic::OrdersCreate], &[]);
/// assert_eq!(items.len(), 1);
/// assert!(!items[0].needs_update);
/// ```
#[must_use]
pub fn diff(
    config: &BridgeConfig,
    desired: &[WebhookTopic],
    existing: &[WebhookSubscription],
) -> Vec<ReconciliationItem> {
    desired
        .iter()
        .map(|&topic| {
            let mut item = ReconciliationItem {
                params: WebhookParams {
                    topic,
                    address: config.callback_address(topic),
                    format: WebhookFormat::Json,
                    id: None,
                },
                needs_update: false,
                requires_sales_channel_sdk: topic.requires_sales_channel_sdk(),
            };

            for subscription in existing {
                if subscription.topic == topic {
                    item.needs_update = true;
                    item.params.id = Some(subscription.id);
                }
            }

            tracing::debug!(
                %topic,
                needs_update = item.needs_update,
                report_only = item.requires_sales_channel_sdk,
                "classified webhook topic"
            );
            item
        })
        .collect()
}
