//! Shared enrichment helpers for attaching inlined images to provider records.
//!
//! Search pages and listings get a `base64Image` per title; media info gets
//! both `base64Image` and `base64Cover`. Original image URLs are kept.

use image_inline::{Enriched, ImageInliner, Rewrite};
use movie_provider::{MediaInfo, MovieResult, Search};
use serde::Serialize;
use serde_json::{Map, Value};

/// Fields the gateway writes itself; upstream copies are dropped so the
/// flattened output never repeats a key.
const INLINED_FIELDS: [&str; 2] = ["base64Image", "base64Cover"];

fn drop_inlined_fields(extra: &mut Map<String, Value>) {
    for field in INLINED_FIELDS {
        extra.remove(field);
    }
}

/// Inline the poster of every title in a listing
pub async fn enrich_list(
    inliner: &ImageInliner,
    mut results: Vec<MovieResult>,
    rewrite: Option<&Rewrite>,
) -> Vec<Enriched<MovieResult>> {
    for result in &mut results {
        drop_inlined_fields(&mut result.extra);
    }

    inliner
        .enrich(results, |m| m.image.as_deref(), rewrite)
        .await
}

/// Inline posters of a search page, keeping its pagination metadata
pub async fn enrich_search(
    inliner: &ImageInliner,
    search: Search<MovieResult>,
    rewrite: Option<&Rewrite>,
) -> Search<Enriched<MovieResult>> {
    let (results, page) = search.take_results();
    let enriched = enrich_list(inliner, results, rewrite).await;
    page.with_results(enriched)
}

/// Media info with its poster and cover inlined
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlinedMediaInfo {
    #[serde(flatten)]
    pub info: MediaInfo,
    pub base64_image: Option<String>,
    pub base64_cover: Option<String>,
}

pub async fn inline_info(
    inliner: &ImageInliner,
    mut info: MediaInfo,
    rewrite: Option<&Rewrite>,
) -> InlinedMediaInfo {
    drop_inlined_fields(&mut info.extra);

    let (base64_image, base64_cover) = tokio::join!(
        inliner.inline(info.image.as_deref(), rewrite),
        inliner.inline(info.cover.as_deref(), rewrite),
    );

    InlinedMediaInfo {
        info,
        base64_image,
        base64_cover,
    }
}
