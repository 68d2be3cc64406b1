//! Image inlining
//!
//! Fetches poster and cover images referenced by domain records and embeds
//! them as `data:` URIs, so API clients never make a second request to the
//! origin image host. Fetches for a batch run concurrently; a failed fetch
//! only blanks the image of its own record.

pub mod encode;
pub mod error;
pub mod fetcher;
pub mod pipeline;

pub use encode::{to_data_uri, DATA_URI_PREFIX};
pub use error::{ImageError, Result};
pub use fetcher::{HttpImageFetcher, ImageFetcher};
pub use pipeline::{Enriched, ImageInliner, Rewrite};
