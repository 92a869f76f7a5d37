// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the resolve endpoint

mod fixtures;

use std::time::{Duration, Instant};

use fixtures::{BTC_ADDRESS, TestServer, VITALIK_ADDRESS};
use reqwest::StatusCode;
use serde_json::json;
use shared_types::Network;

#[tokio::test]
async fn resolves_eth_name_through_local_resolver() {
    let server = TestServer::start(2000).await;
    server
        .mount_local("vitalik.eth", "mainnet", VITALIK_ADDRESS, Duration::ZERO)
        .await;

    let (status, body) = server
        .post("/v1/resolve", json!({"input": "vitalik.eth"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["value"], VITALIK_ADDRESS);
    assert_eq!(body["result"]["provider"], "local-resolver");
    assert_eq!(body["result"]["chain"]["tag"], "eth");
    assert_eq!(
        body["result"]["link"],
        format!("https://etherscan.io/address/{VITALIK_ADDRESS}")
    );
    assert!(body["result"]["avatar"].is_null());
    assert_eq!(body["query"]["canonical_name"], "vitalik.eth");
}

#[tokio::test]
async fn resolves_wallet_record_through_eth_xyz() {
    let server = TestServer::start(2000).await;
    server.mount_eth_xyz("alice").await;

    let (status, body) = server
        .post("/v1/resolve", json!({"input": "alice.btc"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"]["canonical_name"], "alice.eth:btc");
    assert_eq!(body["result"]["value"], BTC_ADDRESS);
    assert_eq!(body["result"]["provider"], "eth-xyz");
    assert_eq!(body["result"]["chain"]["display_name"], "Bitcoin");
}

#[tokio::test]
async fn no_value_is_a_null_result() {
    let server = TestServer::start(1000).await;

    let (status, body) = server
        .post("/v1/resolve", json!({"input": "nobody.eth"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["result"].is_null());
    assert!(body["eth_fallback"].is_null());
}

#[tokio::test]
async fn slow_providers_are_bounded_by_window() {
    let server = TestServer::start(500).await;
    server
        .mount_local("slow.eth", "mainnet", VITALIK_ADDRESS, Duration::from_secs(5))
        .await;

    let started = Instant::now();
    let (status, body) = server
        .post("/v1/resolve", json!({"input": "slow.eth"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["result"].is_null());
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn eth_fallback_is_reported_separately() {
    let server = TestServer::start(2000).await;
    server
        .mount_local("alice.eth", "mainnet", VITALIK_ADDRESS, Duration::ZERO)
        .await;

    let (status, body) = server
        .post(
            "/v1/resolve",
            json!({"input": "alice.sol", "eth_fallback": true}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["result"].is_null());
    assert_eq!(body["eth_fallback"]["value"], VITALIK_ADDRESS);
    assert_eq!(body["eth_fallback"]["chain_tag"], "eth");
}

#[tokio::test]
async fn request_network_overrides_default() {
    let server = TestServer::start(2000).await;
    server
        .mount_local("alice.eth", "sepolia", VITALIK_ADDRESS, Duration::ZERO)
        .await;

    let (status, body) = server
        .post(
            "/v1/resolve",
            json!({"input": "alice.eth", "network": "testnet"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["value"], VITALIK_ADDRESS);
    assert_eq!(body["query"]["network"], "testnet");
}

#[tokio::test]
async fn configured_default_network_is_used() {
    let server = TestServer::start_on(2000, Network::Testnet).await;
    server
        .mount_local("alice.eth", "sepolia", VITALIK_ADDRESS, Duration::ZERO)
        .await;

    let (_, body) = server
        .post("/v1/resolve", json!({"input": "alice"}))
        .await;

    assert_eq!(body["result"]["value"], VITALIK_ADDRESS);
    assert_eq!(body["query"]["network"], "testnet");
}

#[tokio::test]
async fn unsupported_chain_is_rejected_before_any_lookup() {
    let server = TestServer::start(1000).await;

    let (status, body) = server
        .post("/v1/resolve", json!({"input": "alice.zzz"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unsupported_chain");
    assert!(
        body["supported"]
            .as_array()
            .unwrap()
            .contains(&json!("eth"))
    );
    assert!(
        server
            .providers
            .received_requests()
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let server = TestServer::start(1000).await;

    let response = server
        .client
        .post(server.url("/v1/resolve"))
        .header("content-type", "application/json")
        .body(r#"{"input": "alice",,}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("invalid JSON syntax"));
}
