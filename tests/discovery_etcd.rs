//! etcd discovery integration tests against a fake v3 JSON gateway.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use mall::config::EtcdConfig;
use mall::discovery::{DiscoveryError, EtcdDiscovery, ServiceDiscovery};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serves `/v3/kv/range` with `values` registered under `user.rpc/`.
async fn fake_etcd(values: Vec<&'static str>) -> String {
    let values = Arc::new(values);
    let app = Router::new()
        .route("/v3/kv/range", post(range))
        .with_state(values);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr.to_string()
}

async fn range(
    State(values): State<Arc<Vec<&'static str>>>,
    Json(request): Json<Value>,
) -> Json<Value> {
    if request["key"] != BASE64.encode("user.rpc/") {
        return Json(json!({ "header": {} }));
    }

    let kvs: Vec<Value> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            json!({
                "key": BASE64.encode(format!("user.rpc/{i}")),
                "value": BASE64.encode(v),
            })
        })
        .collect();
    Json(json!({ "header": {}, "kvs": kvs, "count": kvs.len().to_string() }))
}

fn discovery(hosts: Vec<String>) -> EtcdDiscovery {
    EtcdDiscovery::new(
        EtcdConfig {
            hosts,
            key: "user.rpc".to_string(),
        },
        Duration::from_secs(1),
    )
    .unwrap()
}

#[tokio::test]
async fn test_resolves_registered_endpoints() {
    let host = fake_etcd(vec!["10.0.0.1:8080", "10.0.0.2:8080"]).await;

    let endpoints = discovery(vec![host]).resolve().await.unwrap();

    assert_eq!(endpoints, vec!["10.0.0.1:8080", "10.0.0.2:8080"]);
}

#[tokio::test]
async fn test_falls_through_to_next_host() {
    let live = fake_etcd(vec!["10.0.0.1:8080"]).await;

    let endpoints = discovery(vec!["127.0.0.1:1".to_string(), format!("http://{live}")])
        .resolve()
        .await
        .unwrap();

    assert_eq!(endpoints, vec!["10.0.0.1:8080"]);
}

#[tokio::test]
async fn test_no_registrations_is_an_error() {
    let host = fake_etcd(Vec::new()).await;

    let err = discovery(vec![host]).resolve().await.unwrap_err();

    assert!(matches!(err, DiscoveryError::NoEndpoints(_)), "got {err:?}");
}

#[tokio::test]
async fn test_all_hosts_down_reports_request_error() {
    let err = discovery(vec!["127.0.0.1:1".to_string()])
        .resolve()
        .await
        .unwrap_err();

    assert!(matches!(err, DiscoveryError::Request { .. }), "got {err:?}");
}
