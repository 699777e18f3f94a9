//! REST-backed implementations of the remote handle contracts.
//!
//! These are the default collaborators the bridge drives in production:
//!
//! - [`RestCollection`]: a [`CountedResource`] over `{plural}/count.json`
//!   and `{plural}.json?limit=&page=`, with named constructors for the
//!   resource kinds served whole ([`products`](RestCollection::products),
//!   [`customers`](RestCollection::customers),
//!   [`custom_collections`](RestCollection::custom_collections),
//!   [`smart_collections`](RestCollection::smart_collections))
//! - [`RestWebhooks`]: a [`WebhookChannel`](crate::remote::WebhookChannel)
//!   over `webhooks.json` / `webhooks/{id}.json`
//! - [`Metafields`]: bulk delete/update of metafields
//!
//! Items pass through as raw [`serde_json::Value`]s: this layer relays the
//! admin API to local callers rather than modeling every resource shape.

use serde::Deserialize;
use serde_json::Value;

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::clients::{RemoteApiError, RestClient};
use crate::config::BridgeConfig;
use crate::pagination;
use crate::remote::{CountedResource, PageRequest, WebhookChannel};
use crate::webhooks::{WebhookParams, WebhookSubscription};

#[derive(Debug, Deserialize)]
struct CountEnvelope {
    count: u64,
}

#[derive(Debug, Deserialize)]
struct WebhookEnvelope {
    webhook: WebhookSubscription,
}

#[derive(Debug, Deserialize)]
struct WebhookListEnvelope {
    webhooks: Vec<WebhookSubscription>,
}

/// A countable, pageable resource collection on the admin REST API.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_bridge::resources::RestCollection;
///
/// let products = RestCollection::products(&client);
/// let all = products.list_all(&config).await?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RestCollection<'a> {
    client: &'a RestClient,
    plural: &'static str,
}

impl<'a> RestCollection<'a> {
    /// Creates a handle for an arbitrary resource kind by its plural path
    /// segment (e.g., `"products"`).
    #[must_use]
    pub const fn new(client: &'a RestClient, plural: &'static str) -> Self {
        Self { client, plural }
    }

    /// The products collection.
    #[must_use]
    pub const fn products(client: &'a RestClient) -> Self {
        Self::new(client, "products")
    }

    /// The customers collection.
    #[must_use]
    pub const fn customers(client: &'a RestClient) -> Self {
        Self::new(client, "customers")
    }

    /// The custom collections collection.
    #[must_use]
    pub const fn custom_collections(client: &'a RestClient) -> Self {
        Self::new(client, "custom_collections")
    }

    /// The smart collections collection.
    #[must_use]
    pub const fn smart_collections(client: &'a RestClient) -> Self {
        Self::new(client, "smart_collections")
    }

    /// Returns the plural path segment this handle addresses.
    #[must_use]
    pub const fn plural(&self) -> &'static str {
        self.plural
    }

    /// Fetches the whole collection, all pages aggregated in order.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] if the count or any page fetch fails; no
    /// partial result is returned.
    pub async fn list_all(&self, config: &BridgeConfig) -> Result<Vec<Value>, RemoteApiError> {
        pagination::aggregate(self, config).await
    }
}

impl CountedResource for RestCollection<'_> {
    type Item = Value;

    async fn count(&self) -> Result<u64, RemoteApiError> {
        let envelope: CountEnvelope = self
            .client
            .get(&format!("{}/count.json", self.plural), &[])
            .await?;
        Ok(envelope.count)
    }

    async fn list(&self, request: PageRequest) -> Result<Vec<Value>, RemoteApiError> {
        let body: Value = self
            .client
            .get(
                &format!("{}.json", self.plural),
                &[
                    ("limit", request.limit.to_string()),
                    ("page", request.page.to_string()),
                ],
            )
            .await?;
        body.get(self.plural)
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| RemoteApiError::UnexpectedBody {
                message: format!("list response is missing the '{}' array", self.plural),
            })
    }
}

/// A shop's webhook subscription endpoint on the admin REST API.
#[derive(Debug, Clone, Copy)]
pub struct RestWebhooks<'a> {
    client: &'a RestClient,
}

impl<'a> RestWebhooks<'a> {
    /// Creates a webhook channel over the given client.
    #[must_use]
    pub const fn new(client: &'a RestClient) -> Self {
        Self { client }
    }
}

impl WebhookChannel for RestWebhooks<'_> {
    async fn list(&self) -> Result<Vec<WebhookSubscription>, RemoteApiError> {
        let envelope: WebhookListEnvelope = self.client.get("webhooks.json", &[]).await?;
        Ok(envelope.webhooks)
    }

    async fn create(&self, params: &WebhookParams) -> Result<WebhookSubscription, RemoteApiError> {
        let envelope: WebhookEnvelope = self
            .client
            .post("webhooks.json", &serde_json::json!({ "webhook": params }))
            .await?;
        Ok(envelope.webhook)
    }

    async fn update(
        &self,
        id: u64,
        params: &WebhookParams,
    ) -> Result<WebhookSubscription, RemoteApiError> {
        let envelope: WebhookEnvelope = self
            .client
            .put(
                &format!("webhooks/{id}.json"),
                &serde_json::json!({ "webhook": params }),
            )
            .await?;
        Ok(envelope.webhook)
    }
}

/// One metafield value change for [`Metafields::update_all`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MetafieldUpdate {
    /// The metafield's remote identifier.
    pub id: u64,
    /// The new value.
    pub value: Value,
    /// The declared value type, when it changes along with the value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

/// Bulk operations over metafields.
///
/// Both operations run their per-id calls concurrently and fail as a whole
/// on the first error, unlike the webhook sync executor: a half-applied
/// metafield batch is reported to the caller as a failure, not a partial
/// success.
#[derive(Debug, Clone, Copy)]
pub struct Metafields<'a> {
    client: &'a RestClient,
}

impl<'a> Metafields<'a> {
    /// Creates a metafields handle over the given client.
    #[must_use]
    pub const fn new(client: &'a RestClient) -> Self {
        Self { client }
    }

    /// Deletes several metafields at once.
    ///
    /// # Errors
    ///
    /// Returns the first [`RemoteApiError`] encountered; deletes already
    /// issued are not rolled back.
    pub async fn delete_all(
        &self,
        ids: &[u64],
        concurrency: usize,
    ) -> Result<(), RemoteApiError> {
        stream::iter(ids.iter().map(|id| async move {
            self.client
                .delete::<Value>(&format!("metafields/{id}.json"))
                .await
                .map(|_| ())
        }))
        .buffered(concurrency.max(1))
        .try_collect::<Vec<()>>()
        .await?;
        Ok(())
    }

    /// Updates several metafields at once.
    ///
    /// Returns the updated metafields in input order.
    ///
    /// # Errors
    ///
    /// Returns the first [`RemoteApiError`] encountered; updates already
    /// issued are not rolled back.
    pub async fn update_all(
        &self,
        updates: &[MetafieldUpdate],
        concurrency: usize,
    ) -> Result<Vec<Value>, RemoteApiError> {
        stream::iter(updates.iter().map(|update| async move {
            let body: Value = self
                .client
                .put(
                    &format!("metafields/{}.json", update.id),
                    &serde_json::json!({ "metafield": update }),
                )
                .await?;
            Ok(body
                .get("metafield")
                .cloned()
                .unwrap_or(body))
        }))
        .buffered(concurrency.max(1))
        .try_collect()
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShopDomain;

    #[test]
    fn test_named_constructors_address_expected_paths() {
        let shop = ShopDomain::new("test-shop").unwrap();
        let client = RestClient::new(&shop, "token");
        assert_eq!(RestCollection::products(&client).plural(), "products");
        assert_eq!(RestCollection::customers(&client).plural(), "customers");
        assert_eq!(
            RestCollection::custom_collections(&client).plural(),
            "custom_collections"
        );
        assert_eq!(
            RestCollection::smart_collections(&client).plural(),
            "smart_collections"
        );
    }

    #[test]
    fn test_metafield_update_serializes_without_absent_value_type() {
        let update = MetafieldUpdate {
            id: 5,
            value: serde_json::json!("new"),
            value_type: None,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("value_type").is_none());
        assert_eq!(json["id"], 5);
    }
}
