//! Batch enrichment of records with inlined images

use crate::encode::to_data_uri;
use crate::fetcher::ImageFetcher;
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// URL transformation applied before fetching (e.g. asking for a larger poster)
pub type Rewrite = dyn Fn(&str) -> String + Send + Sync;

/// A record with its inlined image.
///
/// The record's own fields are flattened alongside `base64Image`, which is
/// `null` when the record had no image URL or the fetch failed. A record
/// that already serializes a `base64Image` field would emit the key twice,
/// so callers must drop it from the record first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enriched<R> {
    #[serde(flatten)]
    pub record: R,
    pub base64_image: Option<String>,
}

/// Fetches and encodes images for records, one concurrent fetch per record
pub struct ImageInliner {
    fetcher: Arc<dyn ImageFetcher>,
    max_concurrency: Option<usize>,
}

impl ImageInliner {
    /// Unbounded fan-out: every record of a batch is fetched at once
    pub fn new(fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self {
            fetcher,
            max_concurrency: None,
        }
    }

    /// Cap the number of in-flight fetches per batch. Output order is unchanged.
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit.max(1));
        self
    }

    /// Fetch and encode a single image. Any failure yields `None`.
    pub async fn inline(&self, url: Option<&str>, rewrite: Option<&Rewrite>) -> Option<String> {
        let url = url.filter(|u| !u.is_empty())?;
        let target = match rewrite {
            Some(rewrite) => rewrite(url),
            None => url.to_string(),
        };

        match self.fetcher.fetch(&target).await {
            Ok(bytes) => Some(to_data_uri(&bytes)),
            Err(e) => {
                warn!(url = %target, error = %e, "Failed to inline image");
                None
            }
        }
    }

    /// Inline the image of every record.
    ///
    /// Returns one entry per input record, in input order, whatever order the
    /// fetches complete in.
    pub async fn enrich<R, U>(
        &self,
        records: Vec<R>,
        url_of: U,
        rewrite: Option<&Rewrite>,
    ) -> Vec<Enriched<R>>
    where
        U: Fn(&R) -> Option<&str>,
    {
        // Collected before the first await so the returned future stays Send
        let lookups: Vec<_> = records
            .iter()
            .map(|r| self.inline(url_of(r), rewrite))
            .collect();

        let encoded: Vec<Option<String>> = match self.max_concurrency {
            Some(limit) => stream::iter(lookups).buffered(limit).collect().await,
            None => join_all(lookups).await,
        };

        records
            .into_iter()
            .zip(encoded)
            .map(|(record, base64_image)| Enriched {
                record,
                base64_image,
            })
            .collect()
    }
}
