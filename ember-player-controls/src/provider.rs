use async_trait::async_trait;
use ember_player_models::{Playlist, SearchResults, Track};

use crate::{Result, Seeds};

/// Read operations against a music catalog, returning normalized models.
///
/// Implementations surface every failure as [`crate::error::Error::Client`].
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResults>;

    async fn recommendations(&self, seeds: &Seeds) -> Result<Vec<Track>>;

    async fn playlist(&self, id: &str) -> Result<Playlist>;

    async fn playlist_tracks(&self, id: &str, offset: u32, limit: u32) -> Result<Vec<Track>>;
}
