use async_trait::async_trait;
use ember_player_models::{Cover, Playlist, SearchResults, Track};
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use crate::{Result, Seeds, error::Error, provider::CatalogProvider};

pub(crate) fn track(id: &str, duration_seconds: u32) -> Track {
    Track {
        id: id.to_string(),
        title: format!("Track {id}"),
        artist: "Daft Punk".to_string(),
        album: "Discovery".to_string(),
        duration_seconds,
        cover: Cover::Placeholder,
    }
}

/// In-memory catalog. Searches echo the query back as the result set.
#[derive(Default)]
pub(crate) struct FakeCatalog {
    failing_search: Option<String>,
    slow_search: Option<(String, Duration)>,
    playlists: HashMap<String, Vec<Track>>,
    failing_playlists: Vec<String>,
    slow_playlist: Option<(String, Duration)>,
    search_calls: AtomicUsize,
    playlist_calls: AtomicUsize,
}

impl FakeCatalog {
    pub(crate) fn failing_search(mut self, query: &str) -> Self {
        self.failing_search = Some(query.to_string());
        self
    }

    pub(crate) fn slow_search(mut self, query: &str, delay: Duration) -> Self {
        self.slow_search = Some((query.to_string(), delay));
        self
    }

    pub(crate) fn with_playlist(mut self, id: &str, tracks: Vec<Track>) -> Self {
        self.playlists.insert(id.to_string(), tracks);
        self
    }

    pub(crate) fn failing_playlist(mut self, id: &str) -> Self {
        self.failing_playlists.push(id.to_string());
        self
    }

    pub(crate) fn slow_playlist(mut self, id: &str, delay: Duration) -> Self {
        self.slow_playlist = Some((id.to_string(), delay));
        self
    }

    pub(crate) fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn playlist_calls(&self) -> usize {
        self.playlist_calls.load(Ordering::SeqCst)
    }

    fn unavailable() -> Error {
        Error::Client {
            message: "catalog unavailable".to_string(),
        }
    }
}

#[async_trait]
impl CatalogProvider for FakeCatalog {
    async fn search(&self, query: &str) -> Result<SearchResults> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        if let Some((slow, delay)) = &self.slow_search {
            if slow == query {
                tokio::time::sleep(*delay).await;
            }
        }

        if self.failing_search.as_deref() == Some(query) {
            return Err(Self::unavailable());
        }

        Ok(SearchResults {
            query: query.to_string(),
            tracks: vec![track(query, 180)],
            artists: vec![],
            albums: vec![],
        })
    }

    async fn recommendations(&self, _seeds: &Seeds) -> Result<Vec<Track>> {
        Ok(vec![track("recommended", 200)])
    }

    async fn playlist(&self, id: &str) -> Result<Playlist> {
        let tracks = self.playlists.get(id).ok_or_else(Self::unavailable)?;

        Ok(Playlist {
            id: id.to_string(),
            name: format!("Playlist {id}"),
            description: None,
            owner: None,
            cover: Cover::Placeholder,
            tracks_count: tracks.len() as u32,
        })
    }

    async fn playlist_tracks(&self, id: &str, offset: u32, limit: u32) -> Result<Vec<Track>> {
        self.playlist_calls.fetch_add(1, Ordering::SeqCst);

        if let Some((slow, delay)) = &self.slow_playlist {
            if slow == id {
                tokio::time::sleep(*delay).await;
            }
        }

        if self.failing_playlists.iter().any(|failing| failing == id) {
            return Err(Self::unavailable());
        }

        let tracks = self.playlists.get(id).ok_or_else(Self::unavailable)?;
        Ok(tracks
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
