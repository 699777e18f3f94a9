//! The catalog of platform-supported webhook topics.
//!
//! Topics are `resource/action` pairs drawn from the admin API's fixed list.
//! The catalog also records which topics require the Sales Channel SDK, a
//! capability the reconciler does not have: those topics are reported but
//! never created or updated.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A webhook topic supported by the platform.
///
/// Serializes to and from its `resource/action` string form.
///
/// # Example
///
/// ```rust
/// use shopify_bridge::WebhookTopic;
///
/// let topic = WebhookTopic::OrdersCreate;
/// assert_eq!(topic.to_string(), "orders/create");
/// assert_eq!(topic.resource(), "orders");
/// assert_eq!(topic.action(), "create");
///
/// let json = serde_json::to_string(&topic).unwrap();
/// assert_eq!(json, "\"orders/create\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookTopic {
    CartsCreate,
    CartsUpdate,
    CheckoutsCreate,
    CheckoutsDelete,
    CheckoutsUpdate,
    CollectionsCreate,
    CollectionsDelete,
    CollectionsUpdate,
    CollectionListingsAdd,
    CollectionListingsRemove,
    CollectionListingsUpdate,
    CustomersCreate,
    CustomersDelete,
    CustomersDisable,
    CustomersEnable,
    CustomersUpdate,
    CustomerGroupsCreate,
    CustomerGroupsDelete,
    CustomerGroupsUpdate,
    DraftOrdersCreate,
    DraftOrdersDelete,
    DraftOrdersUpdate,
    FulfillmentsCreate,
    FulfillmentsUpdate,
    FulfillmentEventsCreate,
    FulfillmentEventsDelete,
    OrdersCancelled,
    OrdersCreate,
    OrdersDelete,
    OrdersFulfilled,
    OrdersPaid,
    OrdersPartiallyFulfilled,
    OrdersUpdated,
    OrderTransactionsCreate,
    ProductsCreate,
    ProductsDelete,
    ProductsUpdate,
    ProductListingsAdd,
    ProductListingsRemove,
    ProductListingsUpdate,
    RefundsCreate,
    AppUninstalled,
    ShopUpdate,
    ThemesCreate,
    ThemesDelete,
    ThemesPublish,
    ThemesUpdate,
}

impl WebhookTopic {
    /// Every topic the platform supports, in catalog order.
    pub const ALL: &'static [Self] = &[
        Self::CartsCreate,
        Self::CartsUpdate,
        Self::CheckoutsCreate,
        Self::CheckoutsDelete,
        Self::CheckoutsUpdate,
        Self::CollectionsCreate,
        Self::CollectionsDelete,
        Self::CollectionsUpdate,
        Self::CollectionListingsAdd,
        Self::CollectionListingsRemove,
        Self::CollectionListingsUpdate,
        Self::CustomersCreate,
        Self::CustomersDelete,
        Self::CustomersDisable,
        Self::CustomersEnable,
        Self::CustomersUpdate,
        Self::CustomerGroupsCreate,
        Self::CustomerGroupsDelete,
        Self::CustomerGroupsUpdate,
        Self::DraftOrdersCreate,
        Self::DraftOrdersDelete,
        Self::DraftOrdersUpdate,
        Self::FulfillmentsCreate,
        Self::FulfillmentsUpdate,
        Self::FulfillmentEventsCreate,
        Self::FulfillmentEventsDelete,
        Self::OrdersCancelled,
        Self::OrdersCreate,
        Self::OrdersDelete,
        Self::OrdersFulfilled,
        Self::OrdersPaid,
        Self::OrdersPartiallyFulfilled,
        Self::OrdersUpdated,
        Self::OrderTransactionsCreate,
        Self::ProductsCreate,
        Self::ProductsDelete,
        Self::ProductsUpdate,
        Self::ProductListingsAdd,
        Self::ProductListingsRemove,
        Self::ProductListingsUpdate,
        Self::RefundsCreate,
        Self::AppUninstalled,
        Self::ShopUpdate,
        Self::ThemesCreate,
        Self::ThemesDelete,
        Self::ThemesPublish,
        Self::ThemesUpdate,
    ];

    /// Returns the topic's `resource/action` string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CartsCreate => "carts/create",
            Self::CartsUpdate => "carts/update",
            Self::CheckoutsCreate => "checkouts/create",
            Self::CheckoutsDelete => "checkouts/delete",
            Self::CheckoutsUpdate => "checkouts/update",
            Self::CollectionsCreate => "collections/create",
            Self::CollectionsDelete => "collections/delete",
            Self::CollectionsUpdate => "collections/update",
            Self::CollectionListingsAdd => "collection_listings/add",
            Self::CollectionListingsRemove => "collection_listings/remove",
            Self::CollectionListingsUpdate => "collection_listings/update",
            Self::CustomersCreate => "customers/create",
            Self::CustomersDelete => "customers/delete",
            Self::CustomersDisable => "customers/disable",
            Self::CustomersEnable => "customers/enable",
            Self::CustomersUpdate => "customers/update",
            Self::CustomerGroupsCreate => "customer_groups/create",
            Self::CustomerGroupsDelete => "customer_groups/delete",
            Self::CustomerGroupsUpdate => "customer_groups/update",
            Self::DraftOrdersCreate => "draft_orders/create",
            Self::DraftOrdersDelete => "draft_orders/delete",
            Self::DraftOrdersUpdate => "draft_orders/update",
            Self::FulfillmentsCreate => "fulfillments/create",
            Self::FulfillmentsUpdate => "fulfillments/update",
            Self::FulfillmentEventsCreate => "fulfillment_events/create",
            Self::FulfillmentEventsDelete => "fulfillment_events/delete",
            Self::OrdersCancelled => "orders/cancelled",
            Self::OrdersCreate => "orders/create",
            Self::OrdersDelete => "orders/delete",
            Self::OrdersFulfilled => "orders/fulfilled",
            Self::OrdersPaid => "orders/paid",
            Self::OrdersPartiallyFulfilled => "orders/partially_fulfilled",
            Self::OrdersUpdated => "orders/updated",
            Self::OrderTransactionsCreate => "order_transactions/create",
            Self::ProductsCreate => "products/create",
            Self::ProductsDelete => "products/delete",
            Self::ProductsUpdate => "products/update",
            Self::ProductListingsAdd => "product_listings/add",
            Self::ProductListingsRemove => "product_listings/remove",
            Self::ProductListingsUpdate => "product_listings/update",
            Self::RefundsCreate => "refunds/create",
            Self::AppUninstalled => "app/uninstalled",
            Self::ShopUpdate => "shop/update",
            Self::ThemesCreate => "themes/create",
            Self::ThemesDelete => "themes/delete",
            Self::ThemesPublish => "themes/publish",
            Self::ThemesUpdate => "themes/update",
        }
    }

    /// Returns the resource portion of the topic (e.g., `orders`).
    #[must_use]
    pub fn resource(self) -> &'static str {
        let s = self.as_str();
        // Every catalog string contains exactly one '/'.
        s.split_once('/').map_or(s, |(resource, _)| resource)
    }

    /// Returns the action portion of the topic (e.g., `create`).
    #[must_use]
    pub fn action(self) -> &'static str {
        let s = self.as_str();
        s.split_once('/').map_or(s, |(_, action)| action)
    }

    /// Returns whether subscribing to this topic requires the Sales Channel
    /// SDK.
    ///
    /// The `collection_listings/*` and `product_listings/*` namespaces need a
    /// capability the reconciler does not have; such topics are only ever
    /// reported, never created or updated.
    #[must_use]
    pub const fn requires_sales_channel_sdk(self) -> bool {
        matches!(
            self,
            Self::CollectionListingsAdd
                | Self::CollectionListingsRemove
                | Self::CollectionListingsUpdate
                | Self::ProductListingsAdd
                | Self::ProductListingsRemove
                | Self::ProductListingsUpdate
        )
    }
}

impl fmt::Display for WebhookTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a string that is not a catalog topic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown webhook topic '{topic}'.")]
pub struct UnknownTopicError {
    /// The string that did not match any catalog topic.
    pub topic: String,
}

impl FromStr for WebhookTopic {
    type Err = UnknownTopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|topic| topic.as_str() == s)
            .ok_or_else(|| UnknownTopicError {
                topic: s.to_string(),
            })
    }
}

impl Serialize for WebhookTopic {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WebhookTopic {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
