//! Provider domain records
//!
//! Only the fields the gateway reads are typed; everything else a provider
//! returns is kept in `extra` and passed through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A movie or TV show as listed in search, trending and recent feeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResult {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A page of results with pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Search<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next_page: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u32>,
    pub results: Vec<T>,
}

impl<T> Search<T> {
    /// Replace the result list, keeping the pagination metadata
    pub fn with_results<U>(self, results: Vec<U>) -> Search<U> {
        Search {
            current_page: self.current_page,
            has_next_page: self.has_next_page,
            total_pages: self.total_pages,
            total_results: self.total_results,
            results,
        }
    }

    /// Split the result list off from the pagination metadata
    pub fn take_results(self) -> (Vec<T>, Search<()>) {
        let Search {
            current_page,
            has_next_page,
            total_pages,
            total_results,
            results,
        } = self;
        let page = Search {
            current_page,
            has_next_page,
            total_pages,
            total_results,
            results: Vec::new(),
        };
        (results, page)
    }
}

/// Detailed information about a single title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Playable sources for one episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeSources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<String, Value>>,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtitles: Vec<Subtitle>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(rename = "isM3U8", default, skip_serializing_if = "Option::is_none")]
    pub is_m3u8: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtitle {
    pub url: String,
    pub lang: String,
}

/// A streaming server offering an episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeServer {
    pub name: String,
    pub url: String,
}

/// Streaming servers a client may request sources from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamingServer {
    UpCloud,
    VidCloud,
    MixDrop,
    StreamTape,
    StreamSB,
    VidStreaming,
    Mp4Upload,
    AsianLoad,
    GogoCdn,
    StreamWish,
    Filemoon,
    Voe,
}

impl StreamingServer {
    pub const ALL: [StreamingServer; 12] = [
        StreamingServer::UpCloud,
        StreamingServer::VidCloud,
        StreamingServer::MixDrop,
        StreamingServer::StreamTape,
        StreamingServer::StreamSB,
        StreamingServer::VidStreaming,
        StreamingServer::Mp4Upload,
        StreamingServer::AsianLoad,
        StreamingServer::GogoCdn,
        StreamingServer::StreamWish,
        StreamingServer::Filemoon,
        StreamingServer::Voe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StreamingServer::UpCloud => "upcloud",
            StreamingServer::VidCloud => "vidcloud",
            StreamingServer::MixDrop => "mixdrop",
            StreamingServer::StreamTape => "streamtape",
            StreamingServer::StreamSB => "streamsb",
            StreamingServer::VidStreaming => "vidstreaming",
            StreamingServer::Mp4Upload => "mp4upload",
            StreamingServer::AsianLoad => "asianload",
            StreamingServer::GogoCdn => "gogocdn",
            StreamingServer::StreamWish => "streamwish",
            StreamingServer::Filemoon => "filemoon",
            StreamingServer::Voe => "voe",
        }
    }
}

impl fmt::Display for StreamingServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown streaming server: {0}")]
pub struct UnknownStreamingServer(pub String);

impl FromStr for StreamingServer {
    type Err = UnknownStreamingServer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StreamingServer::ALL
            .into_iter()
            .find(|server| server.as_str() == s)
            .ok_or_else(|| UnknownStreamingServer(s.to_string()))
    }
}
