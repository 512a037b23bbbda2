//! Shared test utilities and fixtures.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use fleetdesk::api::ApiClient;
use fleetdesk::config::ApiConfig;
use fleetdesk::session::SecureString;
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

pub use mock_backend::{CapturedRequest, MockBackend, MockResponse};

/// Client pointed at `base_url` with short timeouts.
pub fn client(base_url: &str) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        connect_timeout_seconds: 2,
    };
    ApiClient::new(&config).expect("client")
}

pub fn authed_client(base_url: &str) -> ApiClient {
    client(base_url).with_token(Some(SecureString::new("test-token".to_string())))
}

/// Write `content` to `config.toml` in a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}

pub fn price_json(id: &str, vehicle: &str, min_km: f64, max_km: f64, rate: f64) -> Value {
    json!({
        "_id": id,
        "vehicleType": vehicle,
        "subType": "",
        "minKm": min_km,
        "maxKm": max_km,
        "rate": rate
    })
}

pub fn service_json(id: &str, vehicle: &str, city: &str, active: bool) -> Value {
    json!({
        "_id": id,
        "vehicleType": vehicle,
        "subType": "",
        "city": city,
        "isActive": active
    })
}

/// `{data, pagination}` list envelope.
pub fn page_json(items: Vec<Value>, page: u32, limit: u32, total: u64) -> Value {
    let total_pages = total.div_ceil(u64::from(limit.max(1))) as u32;
    json!({
        "data": items,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total,
            "totalPages": total_pages
        }
    })
}

pub fn item_json(item: Value) -> Value {
    json!({ "data": item })
}
