//! Normalization of provider payloads into the provider-agnostic models.
//!
//! Every provider field is optional. Normalization never fails: gaps are
//! filled with defaults, and records without a usable id are marked
//! unrepresentable so callers can skip them.

use ember_player_client::catalog_models::{
    ProfileItem, first_url,
    playlist::Playlist as CatalogPlaylist,
    search_results::{AlbumItem, ArtistItem, SearchMultiResults},
    track::{PlainTrack, TrackPayload, WrappedTrack},
};
use ember_player_models::{
    Album, Artist, Cover, Playlist, SearchResults, Track, UNKNOWN_ALBUM, UNKNOWN_ARTIST,
    UNKNOWN_TITLE,
};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    Playable(Track),
    /// Defaults are filled in, but there is no id to play it by.
    Unrepresentable(Track),
}

impl Normalized {
    pub fn track(&self) -> &Track {
        match self {
            Normalized::Playable(track) | Normalized::Unrepresentable(track) => track,
        }
    }

    pub fn is_unrepresentable(&self) -> bool {
        matches!(self, Normalized::Unrepresentable(_))
    }

    pub fn into_playable(self) -> Option<Track> {
        match self {
            Normalized::Playable(track) => Some(track),
            Normalized::Unrepresentable(_) => None,
        }
    }
}

pub fn normalize(payload: TrackPayload) -> Normalized {
    match payload {
        TrackPayload::Wrapped { data } => normalize_wrapped(data),
        TrackPayload::Plain(track) => normalize_plain(track),
    }
}

/// Normalizes every payload and drops the unrepresentable ones.
pub fn normalize_tracks(payloads: impl IntoIterator<Item = TrackPayload>) -> Vec<Track> {
    payloads
        .into_iter()
        .filter_map(|payload| match normalize(payload) {
            Normalized::Playable(track) => Some(track),
            Normalized::Unrepresentable(track) => {
                debug!(title = %track.title, "skipping track without id");
                None
            }
        })
        .collect()
}

/// Recommendation and playlist shape.
fn normalize_plain(track: PlainTrack) -> Normalized {
    let id = track.id.and_then(|id| id.usable());
    let artist = join_names(
        track
            .artists
            .iter()
            .flatten()
            .map(|artist| artist.name.as_deref()),
    );
    let (album, cover) = match track.album {
        Some(album) => (album.name, first_url(album.images.as_deref())),
        None => (None, None),
    };

    classify(
        id,
        Track {
            id: String::new(),
            title: text_or(track.name, UNKNOWN_TITLE),
            artist: text_or(artist, UNKNOWN_ARTIST),
            album: text_or(album, UNKNOWN_ALBUM),
            duration_seconds: millis_to_seconds(track.duration_ms),
            cover: Cover::from_url(cover),
        },
    )
}

/// Search result shape, where the track sits under `data`.
fn normalize_wrapped(track: WrappedTrack) -> Normalized {
    let id = track.id.and_then(|id| id.usable());
    let artist = join_names(
        track
            .artists
            .iter()
            .flat_map(|artists| artists.items.iter().flatten())
            .map(ProfileItem::name),
    );
    let (album, cover) = match track.album_of_track {
        Some(album) => (
            album.name,
            album.cover_art.and_then(|art| art.first_url()),
        ),
        None => (None, None),
    };

    classify(
        id,
        Track {
            id: String::new(),
            title: text_or(track.name, UNKNOWN_TITLE),
            artist: text_or(artist, UNKNOWN_ARTIST),
            album: text_or(album, UNKNOWN_ALBUM),
            duration_seconds: millis_to_seconds(
                track.duration.and_then(|duration| duration.total_milliseconds),
            ),
            cover: Cover::from_url(cover),
        },
    )
}

fn classify(id: Option<String>, track: Track) -> Normalized {
    match id {
        Some(id) => Normalized::Playable(Track { id, ..track }),
        None => Normalized::Unrepresentable(track),
    }
}

fn text_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

fn join_names<'a>(names: impl Iterator<Item = Option<&'a str>>) -> Option<String> {
    let names: Vec<&str> = names
        .flatten()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

/// Whole seconds, truncated toward zero. Unknown, negative or non-finite input is 0.
pub fn millis_to_seconds(milliseconds: Option<f64>) -> u32 {
    match milliseconds {
        Some(ms) if ms.is_finite() && ms > 0.0 => (ms / 1000.0).trunc() as u32,
        _ => 0,
    }
}

pub fn parse_search_results(query: &str, results: SearchMultiResults) -> SearchResults {
    SearchResults {
        query: query.to_string(),
        tracks: normalize_tracks(results.tracks.map(|t| t.into_items()).unwrap_or_default()),
        artists: results
            .artists
            .map(|a| a.into_items())
            .unwrap_or_default()
            .into_iter()
            .filter_map(parse_artist)
            .collect(),
        albums: results
            .albums
            .map(|a| a.into_items())
            .unwrap_or_default()
            .into_iter()
            .filter_map(parse_album)
            .collect(),
    }
}

fn parse_artist(item: ArtistItem) -> Option<Artist> {
    let data = item.data?;
    let id = data.uri.filter(|uri| !uri.trim().is_empty())?;

    Some(Artist {
        id,
        name: text_or(data.profile.and_then(|p| p.name), UNKNOWN_ARTIST),
        image: data
            .visuals
            .and_then(|v| v.avatar_image)
            .and_then(|image| image.first_url()),
    })
}

fn parse_album(item: AlbumItem) -> Option<Album> {
    let data = item.data?;
    let id = data.uri.filter(|uri| !uri.trim().is_empty())?;
    let artist = data
        .artists
        .and_then(|artists| artists.items)
        .and_then(|items| items.into_iter().next())
        .and_then(|item| item.profile)
        .and_then(|profile| profile.name);

    Some(Album {
        id,
        title: text_or(data.name, UNKNOWN_ALBUM),
        artist: text_or(artist, UNKNOWN_ARTIST),
        cover: Cover::from_url(data.cover_art.and_then(|art| art.first_url())),
    })
}

pub fn parse_playlist(id: &str, playlist: CatalogPlaylist) -> Playlist {
    Playlist {
        id: playlist
            .id
            .and_then(|id| id.usable())
            .unwrap_or_else(|| id.to_string()),
        name: text_or(playlist.name, &format!("Playlist {id}")),
        description: playlist.description.filter(|d| !d.trim().is_empty()),
        owner: playlist.owner.and_then(|owner| owner.display_name),
        cover: Cover::from_url(first_url(playlist.images.as_deref())),
        tracks_count: playlist.tracks.and_then(|t| t.total).unwrap_or(0),
    }
}
