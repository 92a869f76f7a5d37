// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for classification, health, metrics and docs endpoints

mod fixtures;

use std::time::Duration;

use fixtures::{TestServer, VITALIK_ADDRESS};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn classify_normalizes_input() {
    let server = TestServer::start(1000).await;

    let (status, body) = server
        .post("/v1/classify", json!({"input": "Alice.BTC"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["canonical_name"], "alice.eth:btc");
    assert_eq!(body["chain_tag"], "btc");
    assert_eq!(body["is_eth_subdomain"], false);
    assert_eq!(body["network"], "mainnet");
}

#[tokio::test]
async fn classify_appends_eth() {
    let server = TestServer::start(1000).await;

    let (_, body) = server
        .post("/v1/classify", json!({"input": "alice", "network": "testnet"}))
        .await;

    assert_eq!(body["canonical_name"], "alice.eth");
    assert_eq!(body["chain_tag"], "eth");
    assert_eq!(body["network"], "testnet");
}

#[tokio::test]
async fn classify_rejects_invalid_format() {
    let server = TestServer::start(1000).await;

    let (status, body) = server
        .post("/v1/classify", json!({"input": "bad!name.eth"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_format");
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn health_reports_up() {
    let server = TestServer::start(1000).await;

    let response = server.client.get(server.url("/health")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "Up");
    assert_eq!(body["environment"], "testing");
    assert_eq!(body["supported_chains"], 25);
    assert_eq!(body["resolution_window_ms"], 1000);
}

#[tokio::test]
async fn request_id_is_propagated() {
    let server = TestServer::start(1000).await;

    let response = server
        .client
        .get(server.url("/health"))
        .header("x-request-id", "test-request-42")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "test-request-42"
    );
}

#[tokio::test]
async fn metrics_count_resolutions() {
    let server = TestServer::start(1000).await;
    server
        .mount_local("metrics.eth", "mainnet", VITALIK_ADDRESS, Duration::ZERO)
        .await;

    server
        .post("/v1/resolve", json!({"input": "metrics.eth"}))
        .await;

    let text = server
        .client
        .get(server.url("/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(text.contains("name_resolver_resolutions_total"));
    assert!(text.contains(r#"provider="local-resolver""#));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let server = TestServer::start(1000).await;

    let doc: Value = server
        .client
        .get(server.url("/api-doc/openapi.json"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(doc["paths"]["/v1/resolve"].is_object());
    assert!(doc["paths"]["/v1/classify"].is_object());
}

#[tokio::test]
async fn shutdown_stops_accepting_requests() {
    let server = TestServer::start(1000).await;
    server.shutdown.cancel();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let result = server.client.get(server.url("/health")).send().await;

    assert!(result.is_err());
}
