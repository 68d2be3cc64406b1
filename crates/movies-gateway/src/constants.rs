// --- Cache lifetimes ---

/// Search results are reused for six hours.
pub const SEARCH_TTL_SECS: u64 = 60 * 60 * 6;

/// Listings (recent, trending, country, genre) and media info.
pub const LISTING_TTL_SECS: u64 = 60 * 60 * 3;

/// Episode sources and servers.
pub const EPISODE_TTL_SECS: u64 = 60 * 30;

// --- Request defaults ---

pub const DEFAULT_PAGE: u32 = 1;

/// Titles of each kind in the mixed trending feed (no `type` given).
pub const TRENDING_MIX_PER_KIND: usize = 7;

// --- Poster upscaling ---

pub const POSTER_THUMB_SIZE: &str = "250x400";
pub const POSTER_FULL_SIZE: &str = "1000x1600";
