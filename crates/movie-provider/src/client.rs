//! Adapter backed by an upstream provider API

use crate::error::{ProviderError, Result};
use crate::provider::MovieProvider;
use crate::types::{EpisodeServer, EpisodeSources, MediaInfo, MovieResult, Search, StreamingServer};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Calls an upstream API exposing `{base_url}/movies/{provider}/...` routes
pub struct UpstreamProvider {
    client: Client,
    base_url: String,
    name: String,
}

impl UpstreamProvider {
    pub fn new(base_url: &str, name: &str) -> Self {
        Self::with_timeout(base_url, name, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: &str, name: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            name: name.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/movies/{}/{}", self.base_url, self.name, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(provider = %self.name, url = %url, "Calling upstream provider");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(url));
        }
        if !status.is_success() {
            warn!(provider = %self.name, status = %status, url = %url, "Upstream provider failed");
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl MovieProvider for UpstreamProvider {
    async fn search(&self, query: &str, page: u32) -> Result<Search<MovieResult>> {
        self.get_json(&format!("{}?page={}", urlencoding::encode(query), page))
            .await
    }

    async fn info(&self, id: &str) -> Result<MediaInfo> {
        self.get_json(&format!("info?id={}", urlencoding::encode(id)))
            .await
    }

    async fn episode_sources(
        &self,
        episode_id: &str,
        media_id: &str,
        server: Option<StreamingServer>,
    ) -> Result<EpisodeSources> {
        let mut path = format!(
            "watch?episodeId={}&mediaId={}",
            urlencoding::encode(episode_id),
            urlencoding::encode(media_id)
        );
        if let Some(server) = server {
            path.push_str(&format!("&server={}", server));
        }
        self.get_json(&path).await
    }

    async fn episode_servers(&self, episode_id: &str, media_id: &str) -> Result<Vec<EpisodeServer>> {
        self.get_json(&format!(
            "servers?episodeId={}&mediaId={}",
            urlencoding::encode(episode_id),
            urlencoding::encode(media_id)
        ))
        .await
    }

    async fn recent_movies(&self) -> Result<Vec<MovieResult>> {
        self.get_json("recent-movies").await
    }

    async fn recent_shows(&self) -> Result<Vec<MovieResult>> {
        self.get_json("recent-shows").await
    }

    async fn trending_movies(&self) -> Result<Vec<MovieResult>> {
        self.get_json("trending?type=movie").await
    }

    async fn trending_shows(&self) -> Result<Vec<MovieResult>> {
        self.get_json("trending?type=tv").await
    }

    async fn by_country(&self, country: &str, page: u32) -> Result<Search<MovieResult>> {
        self.get_json(&format!(
            "country/{}?page={}",
            urlencoding::encode(country),
            page
        ))
        .await
    }

    async fn by_genre(&self, genre: &str, page: u32) -> Result<Search<MovieResult>> {
        self.get_json(&format!("genre/{}?page={}", urlencoding::encode(genre), page))
            .await
    }
}
