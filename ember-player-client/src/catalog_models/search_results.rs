use serde::{Deserialize, Serialize};

use super::{ProfileItems, Sources, track::TrackPayload};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMultiResults {
    pub tracks: Option<Items<TrackPayload>>,
    pub artists: Option<Items<ArtistItem>>,
    pub albums: Option<Items<AlbumItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Items<T> {
    pub total_count: Option<u64>,
    /// Entries can be `null`; they are dropped by [`Items::into_items`].
    pub items: Option<Vec<Option<T>>>,
}

impl<T> Default for Items<T> {
    fn default() -> Self {
        Self {
            total_count: None,
            items: None,
        }
    }
}

impl<T> Items<T> {
    pub fn into_items(self) -> Vec<T> {
        self.items
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .collect()
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistItem {
    pub data: Option<ArtistData>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistData {
    pub uri: Option<String>,
    pub profile: Option<super::Profile>,
    pub visuals: Option<Visuals>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visuals {
    pub avatar_image: Option<Sources>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumItem {
    pub data: Option<AlbumData>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumData {
    pub uri: Option<String>,
    pub name: Option<String>,
    pub artists: Option<ProfileItems>,
    pub cover_art: Option<Sources>,
}
