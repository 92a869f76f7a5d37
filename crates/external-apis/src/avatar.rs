// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Profile picture lookup for resolved Ethereum names

use std::{sync::Arc, time::Duration};

use api_client::{ApiError, JsonFetcher};
use tokio::time::timeout;
use tracing::debug;
use url::Url;

use crate::{
    config::ProviderEndpoints,
    providers::{endpoint, ensideas},
};

/// Body the metadata service returns when a name has no avatar
const EMPTY_SVG_AVATAR: &str = "data:image/svg+xml;base64,";

/// Looks up avatars from the ENS metadata service, then ENS Ideas
#[derive(Debug)]
pub struct AvatarLookup<F> {
    fetcher: Arc<F>,
    metadata: Url,
    ensideas: Url,
    timeout: Duration,
}

impl<F: JsonFetcher> AvatarLookup<F> {
    /// Create a lookup bounded by `timeout` per request
    pub fn new(fetcher: Arc<F>, endpoints: &ProviderEndpoints, timeout: Duration) -> Self {
        Self {
            fetcher,
            metadata: endpoints.avatar_metadata.clone(),
            ensideas: endpoints.ensideas.clone(),
            timeout,
        }
    }

    /// Avatar URL for `ens_name`, resolved to `address` on mainnet
    ///
    /// Returns `None` when neither source has an avatar or both fail.
    pub async fn fetch(&self, ens_name: &str, address: &str) -> Option<String> {
        match self.metadata_avatar(address).await {
            Ok(Some(avatar)) => return Some(avatar),
            Ok(None) => debug!(ens_name, "metadata service has no avatar"),
            Err(error) => debug!(ens_name, error = %error, "metadata avatar lookup failed"),
        }

        match self.ensideas_avatar(ens_name).await {
            Ok(avatar) => avatar,
            Err(error) => {
                debug!(ens_name, error = %error, "ENS Ideas avatar lookup failed");
                None
            }
        }
    }

    async fn metadata_avatar(&self, address: &str) -> Result<Option<String>, ApiError> {
        let url = endpoint(&self.metadata, &["mainnet", address, "avatar"])?;
        let body = self.bounded(self.fetcher.get_text(&url)).await?;
        let avatar = body.trim();

        if avatar.is_empty() || avatar == EMPTY_SVG_AVATAR {
            return Ok(None);
        }
        Ok(Some(avatar.to_string()))
    }

    async fn ensideas_avatar(&self, ens_name: &str) -> Result<Option<String>, ApiError> {
        let url = ensideas::name_url(&self.ensideas, ens_name)?;
        let body = self.bounded(self.fetcher.get_json(&url)).await?;
        Ok(ensideas::extract_avatar(&body))
    }

    async fn bounded<T>(
        &self,
        request: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        timeout(self.timeout, request)
            .await
            .map_err(|_| ApiError::Timeout {
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            })?
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::{Value, json};

    use super::*;

    #[derive(Default)]
    struct AvatarSources {
        metadata: Option<String>,
        ensideas: Option<Value>,
        requested: Mutex<Vec<String>>,
    }

    impl JsonFetcher for AvatarSources {
        async fn get_json(&self, url: &Url) -> Result<Value, ApiError> {
            self.requested.lock().unwrap().push(url.path().to_string());
            self.ensideas
                .clone()
                .ok_or(ApiError::Status { status: 404 })
        }

        async fn get_text(&self, url: &Url) -> Result<String, ApiError> {
            self.requested.lock().unwrap().push(url.path().to_string());
            self.metadata
                .clone()
                .ok_or(ApiError::Status { status: 404 })
        }
    }

    fn lookup(sources: AvatarSources) -> (AvatarLookup<AvatarSources>, Arc<AvatarSources>) {
        let sources = Arc::new(sources);
        let base = Url::parse("http://avatars.test").unwrap();
        let lookup = AvatarLookup::new(
            Arc::clone(&sources),
            &ProviderEndpoints::all_at(&base),
            Duration::from_secs(1),
        );
        (lookup, sources)
    }

    #[tokio::test]
    async fn prefers_metadata_service() {
        let (lookup, sources) = lookup(AvatarSources {
            metadata: Some("https://img.example/meta.png".to_string()),
            ensideas: Some(json!({"avatar": "https://img.example/ideas.png"})),
            ..Default::default()
        });

        let avatar = lookup.fetch("alice.eth", "0xabc").await;

        assert_eq!(avatar, Some("https://img.example/meta.png".to_string()));
        assert_eq!(
            *sources.requested.lock().unwrap(),
            ["/mainnet/0xabc/avatar"]
        );
    }

    #[tokio::test]
    async fn falls_back_to_ensideas_on_placeholder() {
        let (lookup, sources) = lookup(AvatarSources {
            metadata: Some(EMPTY_SVG_AVATAR.to_string()),
            ensideas: Some(json!({"address": "0xabc", "avatar": "https://img.example/ideas.png"})),
            ..Default::default()
        });

        let avatar = lookup.fetch("alice.eth", "0xabc").await;

        assert_eq!(avatar, Some("https://img.example/ideas.png".to_string()));
        assert_eq!(
            *sources.requested.lock().unwrap(),
            ["/mainnet/0xabc/avatar", "/ens/resolve/alice.eth"]
        );
    }

    #[tokio::test]
    async fn falls_back_to_ensideas_on_error() {
        let (lookup, _) = lookup(AvatarSources {
            metadata: None,
            ensideas: Some(json!({"avatar": "https://img.example/ideas.png"})),
            ..Default::default()
        });

        let avatar = lookup.fetch("alice.eth", "0xabc").await;

        assert_eq!(avatar, Some("https://img.example/ideas.png".to_string()));
    }

    #[tokio::test]
    async fn none_when_both_sources_are_empty() {
        let (lookup, _) = lookup(AvatarSources {
            metadata: Some("   ".to_string()),
            ensideas: Some(json!({"address": "0xabc"})),
            ..Default::default()
        });

        assert_eq!(lookup.fetch("alice.eth", "0xabc").await, None);
    }
}
