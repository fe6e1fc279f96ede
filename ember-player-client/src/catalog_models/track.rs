use serde::{Deserialize, Serialize};

use super::{ImageSource, ProfileItems, RawId, Sources};

/// A track record as the provider sends it. Search results wrap the track in a
/// `data` object with different field names; recommendations and playlists do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackPayload {
    Wrapped { data: WrappedTrack },
    Plain(PlainTrack),
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainTrack {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub artists: Option<Vec<NamedArtist>>,
    pub album: Option<PlainAlbum>,
    pub duration_ms: Option<f64>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedArtist {
    pub id: Option<RawId>,
    pub name: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainAlbum {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub images: Option<Vec<ImageSource>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedTrack {
    pub id: Option<RawId>,
    pub uri: Option<String>,
    pub name: Option<String>,
    pub artists: Option<ProfileItems>,
    pub album_of_track: Option<AlbumOfTrack>,
    pub duration: Option<TrackDuration>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumOfTrack {
    pub name: Option<String>,
    pub uri: Option<String>,
    pub cover_art: Option<Sources>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDuration {
    pub total_milliseconds: Option<f64>,
}
