//! Request building, envelope decoding and error mapping against a mock backend.

mod common;

use common::{authed_client, client, item_json, page_json, price_json, service_json};
use common::{MockBackend, MockResponse};
use fleetdesk::api::{ApiError, ListQuery, PriceApi, ServiceApi};
use fleetdesk::domain::{PriceDraft, PriceFilter, ServiceFilter, TimeWindow};

fn draft() -> PriceDraft {
    PriceDraft {
        vehicle_type: "auto".to_string(),
        sub_type: String::new(),
        min_km: 0.0,
        max_km: 5.0,
        rate: 12.0,
        time_slot: Some(TimeWindow {
            start: "06:00".to_string(),
            end: "22:00".to_string(),
        }),
    }
}

#[tokio::test]
async fn list_sends_filters_page_and_limit() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::value(page_json(
            vec![price_json("p1", "auto", 0.0, 5.0, 12.0)],
            2,
            10,
            11,
        )))
        .await;

    let api = PriceApi::new(authed_client(&backend.api_url()));
    let query = ListQuery {
        filter: PriceFilter {
            vehicle_type: Some("auto".to_string()),
            sub_type: None,
        },
        page: 2,
        limit: 10,
    };
    let page = api.list(&query).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, "p1");
    assert_eq!(page.pagination.total_pages, 2);

    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].line(), "GET /api/prices");
    assert_eq!(
        requests[0].query_pairs(),
        vec![
            ("vehicleType".to_string(), "auto".to_string()),
            ("page".to_string(), "2".to_string()),
            ("limit".to_string(), "10".to_string()),
        ]
    );
    assert_eq!(requests[0].header("authorization"), Some("Bearer test-token"));
    assert_eq!(requests[0].header("accept"), Some("application/json"));
}

#[tokio::test]
async fn service_filter_renders_active_flag_and_city() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::value(page_json(
            vec![service_json("s1", "bike", "Navi Mumbai", false)],
            1,
            20,
            1,
        )))
        .await;

    let api = ServiceApi::new(client(&backend.api_url()));
    let query = ListQuery::with_limit(
        ServiceFilter {
            city: Some("Navi Mumbai".to_string()),
            is_active: Some(false),
            ..ServiceFilter::default()
        },
        20,
    );
    let page = api.list(&query).await.unwrap();
    assert!(!page.items[0].is_active);

    let requests = backend.captured_requests().await;
    let pairs = requests[0].query_pairs();
    assert!(pairs.contains(&("city".to_string(), "Navi Mumbai".to_string())));
    assert!(pairs.contains(&("isActive".to_string(), "false".to_string())));
    assert!(!pairs.iter().any(|(k, _)| k == "vehicleType"));
    // No session, no header
    assert_eq!(requests[0].header("authorization"), None);
}

#[tokio::test]
async fn list_without_pagination_uses_data_length() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::value(serde_json::json!({
            "data": [price_json("a", "car", 0.0, 10.0, 14.0), price_json("b", "car", 10.0, 20.0, 12.0)]
        })))
        .await;

    let api = PriceApi::new(client(&backend.api_url()));
    let page = api.list(&ListQuery::default()).await.unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.pagination.total, 2);
    assert_eq!(page.pagination.total_pages, 1);
    assert!(!page.pagination.has_next());
}

#[tokio::test]
async fn create_posts_camel_case_draft_and_unwraps_data() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::value(item_json(price_json("new", "auto", 0.0, 5.0, 12.0))))
        .await;

    let api = PriceApi::new(authed_client(&backend.api_url()));
    let created = api.create(&draft()).await.unwrap();
    assert_eq!(created.id, "new");

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].line(), "POST /api/prices");
    assert!(requests[0]
        .header("content-type")
        .is_some_and(|v| v.starts_with("application/json")));
    let body = requests[0].json();
    assert_eq!(body["vehicleType"], "auto");
    assert_eq!(body["maxKm"], 5.0);
    assert_eq!(body["timeSlot"]["start"], "06:00");
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn update_get_and_delete_address_the_item() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::value(item_json(price_json("p 1", "auto", 0.0, 5.0, 13.0))))
        .await;
    backend
        .enqueue(MockResponse::value(item_json(price_json("p 1", "auto", 0.0, 5.0, 13.0))))
        .await;
    backend.enqueue(MockResponse::no_content()).await;

    let api = PriceApi::new(authed_client(&backend.api_url()));
    let updated = api.update("p 1", &draft()).await.unwrap();
    assert_eq!(updated.rate, 13.0);
    let fetched = api.get("p 1").await.unwrap();
    assert_eq!(fetched.id, "p 1");
    api.delete("p 1").await.unwrap();

    assert_eq!(
        backend.request_lines().await,
        vec![
            "PUT /api/prices/p%201",
            "GET /api/prices/p%201",
            "DELETE /api/prices/p%201",
        ]
    );
}

#[tokio::test]
async fn bulk_create_wraps_drafts_under_collection_key() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::value(serde_json::json!({
            "data": [price_json("a", "auto", 0.0, 5.0, 12.0), price_json("b", "auto", 5.0, 10.0, 11.0)]
        })))
        .await;

    let api = PriceApi::new(authed_client(&backend.api_url()));
    let created = api.bulk_create(&[draft(), draft()]).await.unwrap();
    assert_eq!(created.len(), 2);

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].line(), "POST /api/prices/bulk");
    assert_eq!(requests[0].json()["prices"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn update_clears_time_slot_with_null() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::value(item_json(price_json("p1", "auto", 0.0, 5.0, 12.0))))
        .await;

    let api = PriceApi::new(authed_client(&backend.api_url()));
    let cleared = PriceDraft {
        time_slot: None,
        ..draft()
    };
    api.update("p1", &cleared).await.unwrap();

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].line(), "PUT /api/prices/p1");
    assert_eq!(requests[0].json()["timeSlot"], serde_json::Value::Null);
    assert!(requests[0].json().as_object().unwrap().contains_key("timeSlot"));
}

#[tokio::test]
async fn set_active_patches_status() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::value(item_json(service_json("s1", "car", "Pune", true))))
        .await;

    let api = ServiceApi::new(authed_client(&backend.api_url()));
    let service = api.set_active("s1", true).await.unwrap();
    assert!(service.is_active);

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].line(), "PATCH /api/services/s1/status");
    assert_eq!(requests[0].json(), serde_json::json!({ "isActive": true }));
}

#[tokio::test]
async fn set_active_decode_error_reports_full_url() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::value(serde_json::json!({ "data": { "ok": true } })))
        .await;

    let api = ServiceApi::new(authed_client(&backend.api_url()));
    let err = api.set_active("s1", false).await.unwrap_err();
    match &err {
        ApiError::Decode { url, .. } => {
            assert_eq!(url, &format!("{}/services/s1/status", backend.api_url()));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::error(409, "Price range overlaps an existing entry"))
        .await;

    let api = PriceApi::new(authed_client(&backend.api_url()));
    let err = api.create(&draft()).await.unwrap_err();
    match &err {
        ApiError::Status { status, message } => {
            assert_eq!(*status, 409);
            assert_eq!(message, "Price range overlaps an existing entry");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.user_message(), "Price range overlaps an existing entry");
}

#[tokio::test]
async fn plain_text_error_is_kept() {
    let backend = MockBackend::start().await;
    backend.enqueue(MockResponse::text(502, "upstream down")).await;

    let api = ServiceApi::new(client(&backend.api_url()));
    let err = api.get("s1").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 502, ref message } if message == "upstream down"));
}

#[tokio::test]
async fn unauthorized_is_distinguished() {
    let backend = MockBackend::start().await;
    backend.enqueue(MockResponse::error(401, "jwt expired")).await;

    let api = PriceApi::new(authed_client(&backend.api_url()));
    let err = api.list(&ListQuery::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert_eq!(err.error_type(), "unauthorized");
}

#[tokio::test]
async fn malformed_list_is_a_decode_error() {
    let backend = MockBackend::start().await;
    backend
        .enqueue(MockResponse::json(r#"{"data": "nope"}"#))
        .await;

    let api = PriceApi::new(client(&backend.api_url()));
    let err = api.list(&ListQuery::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_backend_is_a_connection_error() {
    let api = PriceApi::new(client("http://127.0.0.1:9/api"));
    let err = api.list(&ListQuery::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Connection { .. }));
    assert_eq!(err.user_message(), "Backend is unreachable");
}
