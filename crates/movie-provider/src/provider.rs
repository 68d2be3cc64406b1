//! Provider adapter contract

use crate::error::Result;
use crate::types::{EpisodeServer, EpisodeSources, MediaInfo, MovieResult, Search, StreamingServer};
use async_trait::async_trait;

/// A source of movie and TV metadata for one site.
///
/// One instance per provider is built at start-up and shared by all requests.
#[async_trait]
pub trait MovieProvider: Send + Sync {
    async fn search(&self, query: &str, page: u32) -> Result<Search<MovieResult>>;

    async fn info(&self, id: &str) -> Result<MediaInfo>;

    async fn episode_sources(
        &self,
        episode_id: &str,
        media_id: &str,
        server: Option<StreamingServer>,
    ) -> Result<EpisodeSources>;

    async fn episode_servers(&self, episode_id: &str, media_id: &str) -> Result<Vec<EpisodeServer>>;

    async fn recent_movies(&self) -> Result<Vec<MovieResult>>;

    async fn recent_shows(&self) -> Result<Vec<MovieResult>>;

    async fn trending_movies(&self) -> Result<Vec<MovieResult>>;

    async fn trending_shows(&self) -> Result<Vec<MovieResult>>;

    async fn by_country(&self, country: &str, page: u32) -> Result<Search<MovieResult>>;

    async fn by_genre(&self, genre: &str, page: u32) -> Result<Search<MovieResult>>;
}
