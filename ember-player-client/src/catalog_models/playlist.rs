use serde::{Deserialize, Serialize};

use super::{ImageSource, RawId, track::TrackPayload};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTracks {
    /// Entries can be `null`, or carry a `null` track for removed or local files.
    pub items: Option<Vec<Option<PlaylistItem>>>,
    pub total: Option<u32>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub added_at: Option<String>,
    pub track: Option<TrackPayload>,
}

impl PlaylistTracks {
    pub fn into_tracks(self) -> impl Iterator<Item = TrackPayload> {
        self.items
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(|item| item.track)
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner: Option<Owner>,
    pub images: Option<Vec<ImageSource>>,
    pub tracks: Option<TrackTotal>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackTotal {
    pub total: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_items_and_null_tracks_are_dropped() {
        let tracks: PlaylistTracks = serde_json::from_str(
            r#"{"items": [null, {"track": null}, {"track": {"id": "a"}}, {}]}"#,
        )
        .unwrap();

        assert_eq!(tracks.into_tracks().count(), 1);
    }
}
