//! Provider profiles and the registry the routes resolve against
//!
//! Every provider is served under `/movies/{name}`. Its profile decides which
//! routes exist, whether responses go through the cache and how poster URLs
//! are rewritten before inlining.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use image_inline::Rewrite;
use movie_provider::{MovieProvider, UpstreamProvider};

use crate::constants::{POSTER_FULL_SIZE, POSTER_THUMB_SIZE};
use crate::error::AppError;

/// A route a provider may expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Search,
    Info,
    Watch,
    Servers,
    RecentShows,
    RecentMovies,
    Trending,
    Country,
    Genre,
}

impl Route {
    /// Path as advertised by the provider intro
    pub fn path(self) -> &'static str {
        match self {
            Route::Search => "/:query",
            Route::Info => "/info",
            Route::Watch => "/watch",
            Route::Servers => "/servers",
            Route::RecentShows => "/recent-shows",
            Route::RecentMovies => "/recent-movies",
            Route::Trending => "/trending",
            Route::Country => "/country/:country",
            Route::Genre => "/genre/:genre",
        }
    }
}

#[derive(Debug)]
pub struct ProviderProfile {
    /// Path segment and cache key namespace
    pub name: &'static str,
    pub display_name: &'static str,
    pub website: &'static str,
    pub documentation: &'static str,
    pub routes: &'static [Route],
    /// Uncached providers always report `X-Cache: BYPASS`
    pub cached: bool,
    pub upscale_posters: bool,
    pub search_limit: Option<usize>,
    pub watch_requires_media_id: bool,
}

const FULL_ROUTES: &[Route] = &[
    Route::Search,
    Route::Info,
    Route::Watch,
    Route::RecentShows,
    Route::RecentMovies,
    Route::Trending,
    Route::Servers,
];

pub static PROFILES: [ProviderProfile; 5] = [
    ProviderProfile {
        name: "flixhq",
        display_name: "flixhq",
        website: "https://flixhq.to/",
        documentation: "https://docs.consumet.org/#tag/flixhq",
        routes: &[
            Route::Search,
            Route::Info,
            Route::Watch,
            Route::RecentShows,
            Route::RecentMovies,
            Route::Trending,
            Route::Servers,
            Route::Country,
            Route::Genre,
        ],
        cached: true,
        upscale_posters: true,
        search_limit: Some(10),
        watch_requires_media_id: true,
    },
    ProviderProfile {
        name: "movieshd",
        display_name: "MoviesHDWatch",
        website: "https://movieshd.to/",
        documentation: "https://docs.consumet.org/#tag/movieshd",
        routes: FULL_ROUTES,
        cached: true,
        upscale_posters: true,
        search_limit: None,
        watch_requires_media_id: true,
    },
    ProviderProfile {
        name: "kissasian",
        display_name: "kissasian",
        website: "https://kissasian.to/",
        documentation: "https://docs.consumet.org/#tag/kissasian",
        routes: &[Route::Search, Route::Info, Route::Watch, Route::Servers],
        cached: true,
        upscale_posters: false,
        search_limit: None,
        watch_requires_media_id: true,
    },
    ProviderProfile {
        name: "dramacool",
        display_name: "dramacool",
        website: "https://dramacool.com.pa/",
        documentation: "https://docs.consumet.org/#tag/dramacool",
        routes: &[Route::Search, Route::Info, Route::Watch],
        cached: false,
        upscale_posters: false,
        search_limit: None,
        watch_requires_media_id: false,
    },
    ProviderProfile {
        name: "viewasian",
        display_name: "viewAsian",
        website: "https://viewasian.co/",
        documentation: "https://docs.consumet.org/#tag/viewasian",
        routes: &[Route::Search, Route::Info, Route::Watch],
        cached: false,
        upscale_posters: false,
        search_limit: None,
        watch_requires_media_id: false,
    },
];

/// Ask the image host for the full-size poster instead of the thumbnail
pub fn upscale_poster(url: &str) -> String {
    url.replace(POSTER_THUMB_SIZE, POSTER_FULL_SIZE)
}

impl ProviderProfile {
    pub fn supports(&self, route: Route) -> bool {
        self.routes.contains(&route)
    }

    pub fn intro(&self) -> String {
        format!(
            "Welcome to the {} provider: check out the provider's website @ {}",
            self.display_name, self.website
        )
    }

    pub fn route_paths(&self) -> Vec<&'static str> {
        self.routes.iter().map(|r| r.path()).collect()
    }

    pub fn poster_rewrite(&self) -> Option<&'static Rewrite> {
        if !self.upscale_posters {
            return None;
        }
        let rewrite: &'static Rewrite = &upscale_poster;
        Some(rewrite)
    }
}

/// Look up a built-in profile by name
#[cfg(test)]
pub fn profile(name: &str) -> Option<&'static ProviderProfile> {
    PROFILES.iter().find(|p| p.name == name)
}

pub struct RegisteredProvider {
    pub profile: &'static ProviderProfile,
    pub adapter: Arc<dyn MovieProvider>,
}

/// Providers by name
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<&'static str, RegisteredProvider>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every built-in profile against the upstream provider API
    pub fn upstream(base_url: &str, timeout: Duration) -> Self {
        let mut registry = Self::new();
        for profile in &PROFILES {
            let adapter = UpstreamProvider::with_timeout(base_url, profile.name, timeout);
            registry.register(profile, Arc::new(adapter));
        }
        registry
    }

    pub fn register(&mut self, profile: &'static ProviderProfile, adapter: Arc<dyn MovieProvider>) {
        self.providers
            .insert(profile.name, RegisteredProvider { profile, adapter });
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredProvider> {
        self.providers.get(name)
    }

    /// Find a provider that exposes `route`, or answer 404
    pub fn resolve(&self, name: &str, route: Route) -> Result<&RegisteredProvider, AppError> {
        let provider = self
            .get(name)
            .ok_or_else(|| AppError::NotFound(format!("Unknown provider: {}", name)))?;

        if !provider.profile.supports(route) {
            return Err(AppError::NotFound(format!(
                "Route {} is not available for {}",
                route.path(),
                name
            )));
        }

        Ok(provider)
    }

    /// Registered provider names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.providers.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_have_unique_names() {
        let mut names: Vec<_> = PROFILES.iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PROFILES.len());
    }

    #[test]
    fn test_flixhq_profile() {
        let flixhq = profile("flixhq").unwrap();
        assert!(flixhq.cached);
        assert_eq!(flixhq.search_limit, Some(10));
        assert!(flixhq.supports(Route::Genre));
        assert_eq!(
            flixhq.intro(),
            "Welcome to the flixhq provider: check out the provider's website @ https://flixhq.to/"
        );
    }

    #[test]
    fn test_uncached_providers_expose_core_routes_only() {
        for name in ["dramacool", "viewasian"] {
            let p = profile(name).unwrap();
            assert!(!p.cached);
            assert_eq!(p.route_paths(), vec!["/:query", "/info", "/watch"]);
            assert!(!p.supports(Route::Trending));
        }
    }

    #[test]
    fn test_poster_rewrite() {
        let rewrite = profile("movieshd").unwrap().poster_rewrite().unwrap();
        assert_eq!(
            rewrite("https://img.movieshd.to/xxrz/250x400/379/a.jpg"),
            "https://img.movieshd.to/xxrz/1000x1600/379/a.jpg"
        );
        assert!(profile("kissasian").unwrap().poster_rewrite().is_none());
    }

    #[test]
    fn test_upstream_registry_resolves_routes() {
        let registry = ProviderRegistry::upstream("http://localhost:3100", Duration::from_secs(1));
        assert_eq!(
            registry.names(),
            vec!["dramacool", "flixhq", "kissasian", "movieshd", "viewasian"]
        );

        assert!(registry.resolve("flixhq", Route::Country).is_ok());
        assert!(matches!(
            registry.resolve("movieshd", Route::Country),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            registry.resolve("gogoanime", Route::Search),
            Err(AppError::NotFound(_))
        ));
    }
}
