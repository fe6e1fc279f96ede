use async_trait::async_trait;
use ember_player_client::client::ClientConfig;
use ember_player_models::{Playlist, SearchResults, Track};
use moka::future::{Cache, CacheBuilder};
use std::time::Duration;
use tracing::{instrument, warn};

use crate::{Result, Seeds, models, provider::CatalogProvider};

type CatalogClient = ember_player_client::client::Client;

const SEARCH_LIMIT: u32 = 10;
const DAY: Duration = Duration::from_secs(60 * 60 * 24);
const HOUR: Duration = Duration::from_secs(60 * 60);

/// HTTP catalog provider with in-memory caches. Only successful responses are cached.
pub struct Client {
    catalog: CatalogClient,
    search_cache: Cache<String, SearchResults>,
    recommendations_cache: Cache<Seeds, Vec<Track>>,
    playlist_cache: Cache<String, Playlist>,
    playlist_tracks_cache: Cache<(String, u32, u32), Vec<Track>>,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let catalog = ember_player_client::client::new(config)?;

        Ok(Self {
            catalog,
            search_cache: CacheBuilder::new(1000).time_to_live(DAY).build(),
            recommendations_cache: CacheBuilder::new(100).time_to_live(HOUR).build(),
            playlist_cache: CacheBuilder::new(1000).time_to_live(DAY).build(),
            playlist_tracks_cache: CacheBuilder::new(1000).time_to_live(DAY).build(),
        })
    }
}

#[async_trait]
impl CatalogProvider for Client {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<SearchResults> {
        if let Some(cache) = self.search_cache.get(query).await {
            return Ok(cache);
        }

        let results = self.catalog.search_multi(query, SEARCH_LIMIT, 0).await?;
        let results = models::parse_search_results(query, results);

        self.search_cache
            .insert(query.to_string(), results.clone())
            .await;
        Ok(results)
    }

    #[instrument(skip(self))]
    async fn recommendations(&self, seeds: &Seeds) -> Result<Vec<Track>> {
        if let Some(cache) = self.recommendations_cache.get(seeds).await {
            return Ok(cache);
        }

        let recommendations = self.catalog.recommendations(seeds).await?;
        let tracks = match recommendations.tracks {
            Some(tracks) => models::normalize_tracks(tracks.into_iter().flatten()),
            None => {
                warn!("recommendations response has no tracks");
                Vec::new()
            }
        };

        self.recommendations_cache
            .insert(seeds.clone(), tracks.clone())
            .await;
        Ok(tracks)
    }

    #[instrument(skip(self))]
    async fn playlist(&self, id: &str) -> Result<Playlist> {
        if let Some(cache) = self.playlist_cache.get(id).await {
            return Ok(cache);
        }

        let playlist = self.catalog.playlist(id).await?;
        let playlist = models::parse_playlist(id, playlist);

        self.playlist_cache
            .insert(id.to_string(), playlist.clone())
            .await;
        Ok(playlist)
    }

    #[instrument(skip(self))]
    async fn playlist_tracks(&self, id: &str, offset: u32, limit: u32) -> Result<Vec<Track>> {
        let key = (id.to_string(), offset, limit);
        if let Some(cache) = self.playlist_tracks_cache.get(&key).await {
            return Ok(cache);
        }

        let page = self.catalog.playlist_tracks(id, offset, limit).await?;
        let tracks = models::normalize_tracks(page.into_tracks());

        self.playlist_tracks_cache.insert(key, tracks.clone()).await;
        Ok(tracks)
    }
}
