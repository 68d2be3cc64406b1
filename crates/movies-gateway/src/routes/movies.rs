use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use cache_aside::{CacheKey, CacheStatus};
use movie_provider::StreamingServer;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_PAGE, EPISODE_TTL_SECS, LISTING_TTL_SECS, SEARCH_TTL_SECS, TRENDING_MIX_PER_KIND,
};
use crate::enrichment;
use crate::error::AppError;
use crate::providers::Route;
use crate::state::AppState;

/// Attach the `X-Cache` header describing how the payload was obtained
fn with_cache_status<T: IntoResponse>(body: T, status: CacheStatus) -> Response {
    ([("X-Cache", status.as_header_value())], body).into_response()
}

#[derive(Serialize)]
pub struct ProviderIntro {
    intro: String,
    routes: Vec<&'static str>,
    documentation: &'static str,
}

pub async fn intro(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<Json<ProviderIntro>, AppError> {
    let provider = state
        .providers
        .get(&provider)
        .ok_or_else(|| AppError::NotFound(format!("Unknown provider: {}", provider)))?;

    Ok(Json(ProviderIntro {
        intro: provider.profile.intro(),
        routes: provider.profile.route_paths(),
        documentation: provider.profile.documentation,
    }))
}

#[derive(Deserialize)]
pub struct PageParams {
    page: Option<u32>,
}

pub async fn search(
    State(state): State<AppState>,
    Path((provider, query)): Path<(String, String)>,
    Query(params): Query<PageParams>,
) -> Result<Response, AppError> {
    let provider = state.providers.resolve(&provider, Route::Search)?;
    let page = params.page.unwrap_or(DEFAULT_PAGE);

    let key = CacheKey::new(provider.profile.name, "search")
        .param(&query)
        .param(page);
    let (mut results, status) = state
        .cached(provider, &key, SEARCH_TTL_SECS, || {
            provider.adapter.search(&query, page)
        })
        .await?;

    if let Some(limit) = provider.profile.search_limit {
        results.results.truncate(limit);
    }

    let enriched =
        enrichment::enrich_search(&state.inliner, results, provider.profile.poster_rewrite())
            .await;

    Ok(with_cache_status(Json(enriched), status))
}

pub async fn recent_shows(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<Response, AppError> {
    let provider = state.providers.resolve(&provider, Route::RecentShows)?;

    let key = CacheKey::new(provider.profile.name, "recent-shows");
    let (results, status) = state
        .cached(provider, &key, LISTING_TTL_SECS, || {
            provider.adapter.recent_shows()
        })
        .await?;

    let enriched =
        enrichment::enrich_list(&state.inliner, results, provider.profile.poster_rewrite()).await;

    Ok(with_cache_status(Json(enriched), status))
}

pub async fn recent_movies(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<Response, AppError> {
    let provider = state.providers.resolve(&provider, Route::RecentMovies)?;

    let key = CacheKey::new(provider.profile.name, "recent-movies");
    let (results, status) = state
        .cached(provider, &key, LISTING_TTL_SECS, || {
            provider.adapter.recent_movies()
        })
        .await?;

    let enriched =
        enrichment::enrich_list(&state.inliner, results, provider.profile.poster_rewrite()).await;

    Ok(with_cache_status(Json(enriched), status))
}

#[derive(Deserialize)]
pub struct TrendingParams {
    #[serde(rename = "type")]
    kind: Option<String>,
}

pub async fn trending(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(params): Query<TrendingParams>,
) -> Result<Response, AppError> {
    let provider = state.providers.resolve(&provider, Route::Trending)?;
    let rewrite = provider.profile.poster_rewrite();

    // Without a type the feed mixes the head of both lists and is never cached
    let Some(kind) = params.kind.filter(|k| !k.is_empty()) else {
        let (movies, shows) = tokio::try_join!(
            provider.adapter.trending_movies(),
            provider.adapter.trending_shows()
        )?;

        let mixed: Vec<_> = movies
            .into_iter()
            .take(TRENDING_MIX_PER_KIND)
            .chain(shows.into_iter().take(TRENDING_MIX_PER_KIND))
            .collect();
        let enriched = enrichment::enrich_list(&state.inliner, mixed, rewrite).await;

        return Ok(with_cache_status(Json(enriched), CacheStatus::Bypass));
    };

    let key = CacheKey::new(provider.profile.name, "trending").param(&kind);
    let (results, status) = state
        .cached(provider, &key, LISTING_TTL_SECS, || async {
            if kind == "tv" {
                provider.adapter.trending_shows().await
            } else {
                provider.adapter.trending_movies().await
            }
        })
        .await?;

    let enriched = enrichment::enrich_list(&state.inliner, results, rewrite).await;

    Ok(with_cache_status(Json(enriched), status))
}

#[derive(Deserialize)]
pub struct InfoParams {
    id: Option<String>,
}

pub async fn info(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(params): Query<InfoParams>,
) -> Result<Response, AppError> {
    let provider = state.providers.resolve(&provider, Route::Info)?;
    let id = params
        .id
        .ok_or_else(|| AppError::BadRequest("id is required".into()))?;

    let key = CacheKey::new(provider.profile.name, "info").param(&id);
    let (info, status) = state
        .cached(provider, &key, LISTING_TTL_SECS, || provider.adapter.info(&id))
        .await?;

    let inlined =
        enrichment::inline_info(&state.inliner, info, provider.profile.poster_rewrite()).await;

    Ok(with_cache_status(Json(inlined), status))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeParams {
    episode_id: Option<String>,
    media_id: Option<String>,
    server: Option<String>,
}

fn parse_server(server: Option<&str>) -> Result<Option<StreamingServer>, AppError> {
    match server.filter(|s| !s.is_empty()) {
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest("Invalid server query".into())),
        None => Ok(None),
    }
}

pub async fn watch(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(params): Query<EpisodeParams>,
) -> Result<Response, AppError> {
    let provider = state.providers.resolve(&provider, Route::Watch)?;
    let episode_id = params
        .episode_id
        .ok_or_else(|| AppError::BadRequest("episodeId is required".into()))?;
    let media_id = match params.media_id {
        Some(media_id) => media_id,
        None if provider.profile.watch_requires_media_id => {
            return Err(AppError::BadRequest("mediaId is required".into()));
        }
        None => String::new(),
    };
    let server = parse_server(params.server.as_deref())?;

    let key = CacheKey::new(provider.profile.name, "watch")
        .param(&episode_id)
        .param(&media_id)
        .opt_param(server);
    let (sources, status) = state
        .cached(provider, &key, EPISODE_TTL_SECS, || {
            provider.adapter.episode_sources(&episode_id, &media_id, server)
        })
        .await?;

    Ok(with_cache_status(Json(sources), status))
}

pub async fn servers(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(params): Query<EpisodeParams>,
) -> Result<Response, AppError> {
    let provider = state.providers.resolve(&provider, Route::Servers)?;
    let episode_id = params
        .episode_id
        .ok_or_else(|| AppError::BadRequest("episodeId is required".into()))?;
    let media_id = params
        .media_id
        .ok_or_else(|| AppError::BadRequest("mediaId is required".into()))?;

    let key = CacheKey::new(provider.profile.name, "servers")
        .param(&episode_id)
        .param(&media_id);
    let (servers, status) = state
        .cached(provider, &key, EPISODE_TTL_SECS, || {
            provider.adapter.episode_servers(&episode_id, &media_id)
        })
        .await?;

    Ok(with_cache_status(Json(servers), status))
}

pub async fn by_country(
    State(state): State<AppState>,
    Path((provider, country)): Path<(String, String)>,
    Query(params): Query<PageParams>,
) -> Result<Response, AppError> {
    let provider = state.providers.resolve(&provider, Route::Country)?;
    let page = params.page.unwrap_or(DEFAULT_PAGE);

    let key = CacheKey::new(provider.profile.name, "country")
        .param(&country)
        .param(page);
    let (results, status) = state
        .cached(provider, &key, LISTING_TTL_SECS, || {
            provider.adapter.by_country(&country, page)
        })
        .await?;

    Ok(with_cache_status(Json(results), status))
}

pub async fn by_genre(
    State(state): State<AppState>,
    Path((provider, genre)): Path<(String, String)>,
    Query(params): Query<PageParams>,
) -> Result<Response, AppError> {
    let provider = state.providers.resolve(&provider, Route::Genre)?;
    let page = params.page.unwrap_or(DEFAULT_PAGE);

    let key = CacheKey::new(provider.profile.name, "genre")
        .param(&genre)
        .param(page);
    let (results, status) = state
        .cached(provider, &key, LISTING_TTL_SECS, || {
            provider.adapter.by_genre(&genre, page)
        })
        .await?;

    Ok(with_cache_status(Json(results), status))
}
