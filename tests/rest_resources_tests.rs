//! Integration tests for the REST-backed resource handles.
//!
//! These tests drive `RestCollection`, `RestWebhooks`, and `Metafields`
//! against a wiremock server to verify path construction, envelope
//! decoding, pagination aggregation, and error mapping at the HTTP level.

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopify_bridge::clients::RestClient;
use shopify_bridge::remote::{CountedResource, PageRequest, WebhookChannel};
use shopify_bridge::resources::{Metafields, MetafieldUpdate, RestCollection, RestWebhooks};
use shopify_bridge::webhooks::{WebhookFormat, WebhookParams, WebhookTopic};
use shopify_bridge::{AppName, BridgeConfig, CallbackBase, RemoteApiError};

fn test_config() -> BridgeConfig {
    BridgeConfig::builder()
        .app_name(AppName::new("test-app").unwrap())
        .callback_base(CallbackBase::new("https://app.example.com").unwrap())
        .page_size(2)
        .build()
        .unwrap()
}

fn client_for(server: &MockServer) -> RestClient {
    RestClient::with_base_url(format!("{}/admin", server.uri()), "test-token")
}

// ============================================================================
// RestCollection
// ============================================================================

#[tokio::test]
async fn test_count_hits_count_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/products/count.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 42})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let count = RestCollection::products(&client).count().await.unwrap();
    assert_eq!(count, 42);
}

#[tokio::test]
async fn test_list_sends_limit_and_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/customers.json"))
        .and(query_param("limit", "250"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customers": [{"id": 1}, {"id": 2}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let items = RestCollection::customers(&client)
        .list(PageRequest {
            limit: 250,
            page: 3,
        })
        .await
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], 1);
}

#[tokio::test]
async fn test_list_all_aggregates_pages_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/products/count.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 3})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/products.json"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{"id": 1}, {"id": 2}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/products.json"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{"id": 3}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let products = RestCollection::products(&client)
        .list_all(&test_config())
        .await
        .unwrap();

    let ids: Vec<i64> = products.iter().map(|p| p["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_list_all_of_empty_collection_fetches_one_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/custom_collections/count.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/custom_collections.json"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "custom_collections": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let items = RestCollection::custom_collections(&client)
        .list_all(&test_config())
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_list_all_fails_whole_when_one_page_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/smart_collections/count.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 4})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/smart_collections.json"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "smart_collections": [{"id": 1}, {"id": 2}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/smart_collections.json"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"errors": "Internal Server Error"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = RestCollection::smart_collections(&client)
        .list_all(&test_config())
        .await;
    assert!(matches!(
        result,
        Err(RemoteApiError::Response { code: 500, .. })
    ));
}

#[tokio::test]
async fn test_list_with_missing_envelope_is_unexpected_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unrelated": true})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = RestCollection::products(&client)
        .list(PageRequest { limit: 250, page: 1 })
        .await;
    assert!(matches!(result, Err(RemoteApiError::UnexpectedBody { .. })));
}

#[tokio::test]
async fn test_error_response_carries_request_id_reference() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/products/count.json"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"errors": "Not Found"}))
                .insert_header("x-request-id", "abc-123"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = RestCollection::products(&client).count().await;
    match result {
        Err(RemoteApiError::Response {
            code,
            message,
            error_reference,
        }) => {
            assert_eq!(code, 404);
            assert!(message.contains("Not Found"));
            assert_eq!(error_reference.as_deref(), Some("abc-123"));
        }
        other => panic!("expected response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limited_request_retries_when_enabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/products/count.json"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({"errors": "Too Many Requests"}))
                .insert_header("retry-after", "0"),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/products/count.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 7})))
        .mount(&server)
        .await;

    let client = client_for(&server).tries(2);
    let count = RestCollection::products(&client).count().await.unwrap();
    assert_eq!(count, 7);
}

#[tokio::test]
async fn test_rate_limited_request_fails_fast_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/products/count.json"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"errors": "Too Many Requests"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = RestCollection::products(&client).count().await;
    assert!(matches!(
        result,
        Err(RemoteApiError::Response { code: 429, .. })
    ));
}

// ============================================================================
// RestWebhooks
// ============================================================================

#[tokio::test]
async fn test_webhook_channel_list_decodes_subscriptions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/webhooks.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "webhooks": [{
                "id": 901234,
                "topic": "orders/create",
                "address": "https://app.example.com/webhook/test-app/orders/create",
                "format": "json"
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let subscriptions = RestWebhooks::new(&client).list().await.unwrap();
    assert_eq!(subscriptions.len(), 1);
    assert_eq!(subscriptions[0].id, 901_234);
    assert_eq!(subscriptions[0].topic, WebhookTopic::OrdersCreate);
}

#[tokio::test]
async fn test_webhook_channel_create_posts_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/webhooks.json"))
        .and(body_string_contains("orders/create"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "webhook": {
                "id": 1,
                "topic": "orders/create",
                "address": "https://app.example.com/webhook/test-app/orders/create",
                "format": "json"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = WebhookParams {
        topic: WebhookTopic::OrdersCreate,
        address: "https://app.example.com/webhook/test-app/orders/create".to_string(),
        format: WebhookFormat::Json,
        id: None,
    };
    let created = RestWebhooks::new(&client).create(&params).await.unwrap();
    assert_eq!(created.id, 1);
}

#[tokio::test]
async fn test_webhook_channel_update_puts_to_id_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/admin/webhooks/55.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "webhook": {
                "id": 55,
                "topic": "shop/update",
                "address": "https://app.example.com/webhook/test-app/shop/update",
                "format": "json"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = WebhookParams {
        topic: WebhookTopic::ShopUpdate,
        address: "https://app.example.com/webhook/test-app/shop/update".to_string(),
        format: WebhookFormat::Json,
        id: Some(55),
    };
    let updated = RestWebhooks::new(&client).update(55, &params).await.unwrap();
    assert_eq!(updated.id, 55);
}

// ============================================================================
// Metafields
// ============================================================================

#[tokio::test]
async fn test_metafields_delete_all_issues_one_delete_per_id() {
    let server = MockServer::start().await;
    for id in [11, 12, 13] {
        Mock::given(method("DELETE"))
            .and(path(format!("/admin/metafields/{id}.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    Metafields::new(&client)
        .delete_all(&[11, 12, 13], 4)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_metafields_delete_all_fails_whole_on_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/metafields/21.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/metafields/22.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"errors": "Not Found"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = Metafields::new(&client).delete_all(&[21, 22], 4).await;
    assert!(matches!(
        result,
        Err(RemoteApiError::Response { code: 404, .. })
    ));
}

#[tokio::test]
async fn test_metafields_update_all_returns_updated_records_in_order() {
    let server = MockServer::start().await;
    for (id, value) in [(31, "a"), (32, "b")] {
        Mock::given(method("PUT"))
            .and(path(format!("/admin/metafields/{id}.json")))
            .and(body_string_contains(value))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "metafield": {"id": id, "value": value}
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    let updates = vec![
        MetafieldUpdate {
            id: 31,
            value: json!("a"),
            value_type: Some("string".to_string()),
        },
        MetafieldUpdate {
            id: 32,
            value: json!("b"),
            value_type: None,
        },
    ];
    let updated = Metafields::new(&client).update_all(&updates, 4).await.unwrap();
    assert_eq!(updated.len(), 2);
    assert_eq!(updated[0]["id"], 31);
    assert_eq!(updated[1]["id"], 32);
}
