use crate::{
    Error, Result,
    catalog_models::{
        playlist::{Playlist, PlaylistTracks},
        recommendations::{Recommendations, Seeds},
        search_results::SearchMultiResults,
        track::PlainTrack,
    },
};
use reqwest::{
    Method, Response,
    header::{HeaderMap, HeaderValue},
};
use serde::Deserialize;
use std::fmt::Display;
use tracing::{debug, error, instrument, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://spotify23.p.rapidapi.com/";
pub const DEFAULT_API_HOST: &str = "spotify23.p.rapidapi.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_host: String,
    pub api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_host: DEFAULT_API_HOST.to_string(),
            api_key: None,
        }
    }
}

#[derive(Clone)]
pub struct Client {
    base_url: Url,
    api_host: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("api_host", &self.api_host)
            .field("api_key", &self.api_key.as_ref().map(|_| "**HIDDEN**"))
            .finish()
    }
}

/// Builds a client. A missing api key is not an error here; every call checks it
/// before touching the network.
pub fn new(config: ClientConfig) -> Result<Client> {
    let base_url = parse_base_url(&config.base_url)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        "User-Agent",
        HeaderValue::from_static(concat!("ember-player/", env!("CARGO_PKG_VERSION"))),
    );

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .build()?;

    if config.api_key.is_none() {
        warn!("no catalog api key configured, catalog requests will fail");
    }

    Ok(Client {
        base_url,
        api_host: config.api_host,
        api_key: config.api_key,
        client,
    })
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    let with_slash = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    };

    Url::parse(&with_slash).map_err(|error| Error::InvalidUrl {
        url: base_url.to_string(),
        message: error.to_string(),
    })
}

#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Search,
    Recommendations,
    Playlist,
    PlaylistTracks,
    Tracks,
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let endpoint = match self {
            Endpoint::Search => "search/",
            Endpoint::Recommendations => "recommendations/",
            Endpoint::Playlist => "playlist/",
            Endpoint::PlaylistTracks => "playlist_tracks/",
            Endpoint::Tracks => "tracks/",
        };

        f.write_str(endpoint)
    }
}

macro_rules! get {
    ($self:ident, $endpoint:expr, $params:expr) => {
        match $self.make_get_call($endpoint, $params).await {
            Ok(response) => match serde_json::from_str(response.as_str()) {
                Ok(item) => Ok(item),
                Err(error) => Err(Error::DeserializeJSON {
                    message: error.to_string(),
                }),
            },
            Err(error) => Err(error),
        }
    };
}

#[derive(Debug, Default, Deserialize)]
struct TracksResponse {
    tracks: Option<Vec<Option<PlainTrack>>>,
}

impl Client {
    #[instrument(skip(self))]
    pub async fn search_multi(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<SearchMultiResults> {
        let limit = limit.to_string();
        let offset = offset.to_string();
        let params = vec![
            ("type", "multi"),
            ("offset", offset.as_str()),
            ("limit", limit.as_str()),
            ("numberOfTopResults", "5"),
            ("q", query),
        ];

        get!(self, Endpoint::Search, &params)
    }

    #[instrument(skip(self))]
    pub async fn recommendations(&self, seeds: &Seeds) -> Result<Recommendations> {
        let limit = seeds.limit.to_string();
        let seed_tracks = seeds.tracks.join(",");
        let seed_artists = seeds.artists.join(",");
        let seed_genres = seeds.genres.join(",");

        let params = vec![
            ("limit", limit.as_str()),
            ("seed_tracks", seed_tracks.as_str()),
            ("seed_artists", seed_artists.as_str()),
            ("seed_genres", seed_genres.as_str()),
        ];

        get!(self, Endpoint::Recommendations, &params)
    }

    #[instrument(skip(self))]
    pub async fn playlist(&self, playlist_id: &str) -> Result<Playlist> {
        let params = vec![("id", playlist_id)];

        get!(self, Endpoint::Playlist, &params)
    }

    #[instrument(skip(self))]
    pub async fn playlist_tracks(
        &self,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<PlaylistTracks> {
        let offset = offset.to_string();
        let limit = limit.to_string();
        let params = vec![
            ("id", playlist_id),
            ("offset", offset.as_str()),
            ("limit", limit.as_str()),
        ];

        get!(self, Endpoint::PlaylistTracks, &params)
    }

    /// Batch lookup. Unknown ids come back as `null` and are dropped.
    #[instrument(skip(self))]
    pub async fn tracks(&self, track_ids: &[&str]) -> Result<Vec<PlainTrack>> {
        let ids = track_ids.join(",");
        let params = vec![("ids", ids.as_str())];

        let response: Result<TracksResponse> = get!(self, Endpoint::Tracks, &params);

        response.map(|res| res.tracks.unwrap_or_default().into_iter().flatten().collect())
    }

    fn api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(Error::MissingApiKey),
        }
    }

    fn client_headers(&self, api_key: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        let key = HeaderValue::from_str(api_key).map_err(|_| Error::Api {
            message: "api key contains characters not allowed in a header".to_string(),
        })?;
        headers.insert("x-rapidapi-key", key);

        let host = HeaderValue::from_str(&self.api_host).map_err(|_| Error::Api {
            message: format!("invalid api host: {}", self.api_host),
        })?;
        headers.insert("x-rapidapi-host", host);

        Ok(headers)
    }

    async fn make_get_call(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<String> {
        let api_key = self.api_key()?;
        let headers = self.client_headers(api_key)?;

        let url = self
            .base_url
            .join(&endpoint.to_string())
            .map_err(|error| Error::InvalidUrl {
                url: format!("{}{endpoint}", self.base_url),
                message: error.to_string(),
            })?;

        debug!("calling {} endpoint, with params {params:?}", url);
        let response = self
            .client
            .request(Method::GET, url)
            .headers(headers)
            .query(params)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> Result<String> {
        let status = response.status();

        if status.is_success() {
            Ok(response.text().await?)
        } else {
            error!("catalog responded with {status}");
            Err(Error::Api {
                message: status.to_string(),
            })
        }
    }
}
