//! Movie provider adapters
//!
//! Domain records returned by movie providers, the [`MovieProvider`] adapter
//! contract, and [`UpstreamProvider`], which satisfies it by calling an
//! upstream provider API over HTTP.

pub mod client;
pub mod error;
pub mod provider;
pub mod types;

pub use client::UpstreamProvider;
pub use error::{ProviderError, Result};
pub use provider::MovieProvider;
pub use types::{
    EpisodeServer, EpisodeSources, MediaInfo, MovieResult, Search, Source, StreamingServer,
    Subtitle, UnknownStreamingServer,
};
