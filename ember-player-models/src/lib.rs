pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum Cover {
    Url(String),
    /// No artwork; the renderer draws a generated placeholder.
    #[default]
    Placeholder,
}

impl Cover {
    pub fn from_url(url: Option<String>) -> Self {
        match url {
            Some(url) if !url.trim().is_empty() => Cover::Url(url),
            _ => Cover::Placeholder,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Cover::Url(url) => Some(url),
            Cover::Placeholder => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration_seconds: u32,
    pub cover: Cover,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: UNKNOWN_TITLE.to_string(),
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            duration_seconds: 0,
            cover: Cover::Placeholder,
        }
    }
}

impl Track {
    pub fn is_playable(&self) -> bool {
        !self.id.trim().is_empty()
    }

    pub fn duration(&self) -> String {
        format_seconds(self.duration_seconds)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub cover: Cover,
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub query: String,
    pub tracks: Vec<Track>,
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.artists.is_empty() && self.albums.is_empty()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub cover: Cover,
    pub tracks_count: u32,
}

/// Formats whole seconds as `m:ss`.
pub fn format_seconds(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_seconds(0), "0:00");
        assert_eq!(format_seconds(9), "0:09");
        assert_eq!(format_seconds(225), "3:45");
        assert_eq!(format_seconds(3600), "60:00");
    }

    #[test]
    fn default_track_is_not_playable() {
        let track = Track::default();

        assert!(!track.is_playable());
        assert_eq!(track.title, UNKNOWN_TITLE);
        assert_eq!(track.artist, UNKNOWN_ARTIST);
        assert_eq!(track.album, UNKNOWN_ALBUM);
        assert_eq!(track.cover, Cover::Placeholder);
    }

    #[test]
    fn blank_cover_url_is_placeholder() {
        assert_eq!(Cover::from_url(Some("  ".into())), Cover::Placeholder);
        assert_eq!(Cover::from_url(None), Cover::Placeholder);
        assert_eq!(
            Cover::from_url(Some("https://img/1.jpg".into())).url(),
            Some("https://img/1.jpg")
        );
    }
}
