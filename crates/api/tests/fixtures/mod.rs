// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

//! Test fixtures for the HTTP service
//!
//! Starts a server whose providers are all served by one wiremock instance.

use std::{net::SocketAddr, time::Duration};

use api::{Server, ServerConfig, ShutdownConfig, config::ResolutionTimeoutMs};
use external_apis::ProviderEndpoints;
use serde_json::{Value, json};
use shared_types::Network;
use tokio_util::sync::CancellationToken;
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

pub const VITALIK_ADDRESS: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
pub const BTC_ADDRESS: &str = "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh";

/// A running server and the provider mock behind it
pub struct TestServer {
    pub addr: SocketAddr,
    pub providers: MockServer,
    pub shutdown: CancellationToken,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Start a server on mainnet with the given resolution window
    pub async fn start(window_ms: u64) -> Self {
        Self::start_on(window_ms, Network::Mainnet).await
    }

    /// Start a server whose requests default to `network`
    pub async fn start_on(window_ms: u64, network: Network) -> Self {
        let providers = MockServer::start().await;
        let base = Url::parse(&providers.uri()).unwrap();

        let mut config = ServerConfig::for_testing();
        config.resolver.endpoints = ProviderEndpoints::all_at(&base);
        config.resolver.window_ms = ResolutionTimeoutMs::new(window_ms).unwrap();
        config.resolver.default_network = network;

        let (addr, shutdown) = Server::new(config, ShutdownConfig::default())
            .expect("Failed to create server")
            .run_for_testing()
            .await
            .expect("Failed to start test server");

        Self {
            addr,
            providers,
            shutdown,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, route: &str) -> String {
        format!("http://{}{route}", self.addr)
    }

    /// POST `body` to `route` and return the status and JSON response
    pub async fn post(&self, route: &str, body: Value) -> (reqwest::StatusCode, Value) {
        let response = self
            .client
            .post(self.url(route))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request");
        let status = response.status();
        (status, response.json().await.expect("response is JSON"))
    }

    /// Self-hosted resolver answering `address` for `name` on `network`
    pub async fn mount_local(&self, name: &str, network: &str, address: &str, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(format!("/resolve/{name}")))
            .and(query_param("network", network))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "data": {"address": address}}))
                    .set_delay(delay),
            )
            .mount(&self.providers)
            .await;
    }

    /// eth.xyz profile for `label` with a Bitcoin wallet and an X handle
    pub async fn mount_eth_xyz(&self, label: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/text-records/{label}.eth")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "name": "Alice",
                    "com.twitter": "alice_onchain",
                    "wallets": [{"name": "Bitcoin", "value": BTC_ADDRESS}]
                }
            })))
            .mount(&self.providers)
            .await;
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
