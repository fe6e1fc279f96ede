use serde::{Deserialize, Serialize};

use super::track::TrackPayload;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Entries can be `null`.
    pub tracks: Option<Vec<Option<TrackPayload>>>,
    pub seeds: Option<Vec<serde_json::Value>>,
}

/// Seeds for a recommendation request. Each list is sent comma-joined.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seeds {
    pub tracks: Vec<String>,
    pub artists: Vec<String>,
    pub genres: Vec<String>,
    pub limit: u32,
}

impl Default for Seeds {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            artists: Vec::new(),
            genres: Vec::new(),
            limit: 20,
        }
    }
}

impl Seeds {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.artists.is_empty() && self.genres.is_empty()
    }
}
