use std::sync::Arc;

use clap::{Parser, Subcommand};
use ember_player_client::client::{DEFAULT_API_HOST, DEFAULT_BASE_URL};
use ember_player_controls::{
    ClientConfig, Seeds, Session, Status,
    client::Client,
    controls::ControlCommand,
    notification::{Notification, NotificationBroadcast},
    player::Player,
    provider::CatalogProvider,
    search::Search,
    volume::{DEFAULT_VOLUME, VolumeLevel},
};
use ember_player_models::{SearchResults, Track};
use snafu::prelude::*;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::Subscriber;
use tracing_subscriber::{fmt::MakeWriter, util::SubscriberInitExt};

const PLAYLIST_LIMIT: u32 = 100;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(long, env = "EMBER_API_KEY", hide_env_values = true)]
    /// Catalog api key.
    api_key: Option<String>,

    #[clap(long, env = "EMBER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    /// Catalog base url.
    base_url: String,

    #[clap(long, env = "EMBER_API_HOST", default_value = DEFAULT_API_HOST)]
    /// Value sent as the api host header.
    api_host: String,

    #[clap(long, default_value_t = DEFAULT_VOLUME)]
    /// Starting volume, 0 to 100.
    volume: u8,

    #[clap(short, long)]
    /// Log level
    verbosity: Option<tracing::Level>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog for tracks, artists and albums
    Search { query: String },
    /// Recommend tracks from seed tracks, artists or genres
    Recommendations {
        #[clap(long, value_delimiter = ',')]
        seed_tracks: Vec<String>,
        #[clap(long, value_delimiter = ',')]
        seed_artists: Vec<String>,
        #[clap(long, value_delimiter = ',')]
        seed_genres: Vec<String>,
        #[clap(long, default_value_t = 20)]
        limit: u32,
    },
    /// List the tracks of a playlist
    Playlist { id: String },
    /// Play a playlist, controlled from stdin
    Play { id: String },
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{error}"))]
    ClientError { error: String },
    #[snafu(display("{error}"))]
    PlayerError { error: String },
    #[snafu(display("{error}"))]
    Io { error: String },
}

impl From<ember_player_controls::error::Error> for Error {
    fn from(error: ember_player_controls::error::Error) -> Self {
        match error {
            ember_player_controls::error::Error::Client { message } => {
                Error::ClientError { error: message }
            }
            error => Error::PlayerError {
                error: error.to_string(),
            },
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io {
            error: error.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(error: tokio::task::JoinError) -> Self {
        Error::PlayerError {
            error: error.to_string(),
        }
    }
}

/// Logs go to `writer`, keeping stdout for command output.
fn log_subscriber<W>(verbosity: Option<tracing::Level>, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_max_level(verbosity)
        .with_target(false)
        .compact()
        .with_writer(writer)
        .finish()
}

pub async fn run() -> Result<(), Error> {
    let cli = Cli::parse();

    log_subscriber(cli.verbosity, std::io::stderr).init();

    let client = Arc::new(Client::new(ClientConfig {
        base_url: cli.base_url,
        api_host: cli.api_host,
        api_key: cli.api_key,
    })?);

    match cli.command {
        Commands::Search { query } => {
            let search = Search::new(client);
            search.submit(&query).await;

            let state = search.current();
            if let Some(error) = state.error {
                return Err(Error::ClientError { error });
            }
            if let Some(results) = state.results {
                print_search_results(&results);
            }
            Ok(())
        }
        Commands::Recommendations {
            seed_tracks,
            seed_artists,
            seed_genres,
            limit,
        } => {
            let seeds = Seeds {
                tracks: seed_tracks,
                artists: seed_artists,
                genres: seed_genres,
                limit,
            };
            if seeds.is_empty() {
                return Err(Error::ClientError {
                    error: "Provide at least one seed track, artist or genre.".to_string(),
                });
            }

            let tracks = client.recommendations(&seeds).await?;
            if tracks.is_empty() {
                println!("No recommendations found.");
            }
            for track in &tracks {
                println!("{}", track_line(track));
            }
            Ok(())
        }
        Commands::Playlist { id } => {
            let playlist = client.playlist(&id).await?;
            let tracks = client.playlist_tracks(&id, 0, PLAYLIST_LIMIT).await?;

            match playlist.owner {
                Some(owner) => println!("{} by {owner}", playlist.name),
                None => println!("{}", playlist.name),
            }
            if let Some(description) = playlist.description.filter(|d| !d.is_empty()) {
                println!("{description}");
            }
            println!("{} tracks", playlist.tracks_count);

            for (index, track) in tracks.iter().enumerate() {
                println!("{:>3}. {}", index + 1, track_line(track));
            }
            Ok(())
        }
        Commands::Play { id } => play(client, &id, cli.volume).await,
    }
}

async fn play(client: Arc<Client>, playlist_id: &str, volume: u8) -> Result<(), Error> {
    let notifications = Arc::new(NotificationBroadcast::new());
    let mut messages = notifications.subscribe();
    let (mut player, controls) = Player::new(client, notifications, volume);
    let mut state = player.state();

    let player_handle = tokio::spawn(async move { player.player_loop().await });

    tokio::spawn(async move {
        while state.changed().await.is_ok() {
            let session = state.borrow_and_update().clone();
            println!("{}", player_bar(&session));
        }
    });

    tokio::spawn(async move {
        loop {
            match messages.recv().await {
                Ok(notification) => print_notification(notification),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    });

    controls.play_playlist(playlist_id);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Some(ControlCommand::Quit) => break,
            Some(command) => controls.send(command),
            None if line.trim().is_empty() => {}
            None => println!("Unknown command: {}", line.trim()),
        }
    }

    controls.quit();
    player_handle.await??;
    Ok(())
}

fn parse_command(line: &str) -> Option<ControlCommand> {
    let mut parts = line.split_whitespace();
    let command = match parts.next()? {
        "p" => ControlCommand::PlayPause,
        "s" => ControlCommand::Seek {
            fraction: parts.next()?.parse().ok()?,
        },
        "v" => ControlCommand::SetVolume {
            percent: parts.next()?.parse().ok()?,
        },
        "m" => ControlCommand::ToggleMute,
        "shuffle" => ControlCommand::ToggleShuffle,
        "repeat" => ControlCommand::ToggleRepeat,
        "like" => ControlCommand::ToggleLiked,
        "back" => ControlCommand::SkipBack,
        "next" => ControlCommand::SkipForward,
        "q" => ControlCommand::Quit,
        _ => return None,
    };

    Some(command)
}

fn print_notification(notification: Notification) {
    match notification {
        Notification::TrackLoaded { track } => println!("Now playing: {}", track_line(&track)),
        Notification::TrackFinished { .. } => println!("Finished."),
        Notification::Error(message) => println!("Error: {message}"),
        Notification::Warning(message) => println!("Warning: {message}"),
    }
}

fn print_search_results(results: &SearchResults) {
    if results.is_empty() {
        println!("No results found for \"{}\".", results.query);
        return;
    }

    if !results.tracks.is_empty() {
        println!("Tracks");
        for track in &results.tracks {
            println!("  {}", track_line(track));
        }
    }

    if !results.artists.is_empty() {
        println!("Artists");
        for artist in &results.artists {
            println!("  {}", artist.name);
        }
    }

    if !results.albums.is_empty() {
        println!("Albums");
        for album in &results.albums {
            println!("  {} - {}", album.title, album.artist);
        }
    }
}

fn track_line(track: &Track) -> String {
    format!(
        "{} - {} ({})",
        track.title,
        track.artist,
        track.duration()
    )
}

fn player_bar(session: &Session) -> String {
    let Some(track) = session.current_track() else {
        return "Nothing playing".to_string();
    };

    let status = match session.status() {
        Status::Playing => ">",
        Status::Paused => "||",
        Status::Stopped => "[]",
    };

    let volume = match session.volume_level() {
        VolumeLevel::Muted => "muted".to_string(),
        VolumeLevel::Low | VolumeLevel::High => format!("vol {}%", session.effective_volume()),
    };

    let mut flags = Vec::new();
    if session.is_liked() {
        flags.push("liked");
    }
    if session.is_shuffle() {
        flags.push("shuffle");
    }
    if session.is_repeat() {
        flags.push("repeat");
    }

    let mut bar = format!(
        "{status} {} - {}  {} / {}  {volume}",
        track.title,
        track.artist,
        session.elapsed(),
        track.duration()
    );
    if !flags.is_empty() {
        bar.push_str(&format!("  [{}]", flags.join(" ")));
    }

    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_player_models::Cover;

    fn track() -> Track {
        Track {
            id: "4uLU6hMCjMI75M1A2tKUQC".to_string(),
            title: "One More Time".to_string(),
            artist: "Daft Punk".to_string(),
            album: "Discovery".to_string(),
            duration_seconds: 320,
            cover: Cover::Placeholder,
        }
    }

    #[test]
    fn parses_stdin_commands() {
        assert!(matches!(parse_command("p"), Some(ControlCommand::PlayPause)));
        assert!(matches!(
            parse_command("s 0.5"),
            Some(ControlCommand::Seek { fraction }) if fraction == 0.5
        ));
        assert!(matches!(
            parse_command("v 120"),
            Some(ControlCommand::SetVolume { percent: 120 })
        ));
        assert!(matches!(parse_command(" next "), Some(ControlCommand::SkipForward)));
        assert!(matches!(parse_command("q"), Some(ControlCommand::Quit)));
    }

    #[test]
    fn rejects_unknown_or_incomplete_commands() {
        assert!(parse_command("").is_none());
        assert!(parse_command("dance").is_none());
        assert!(parse_command("s").is_none());
        assert!(parse_command("v loud").is_none());
    }

    #[test]
    fn player_bar_without_track() {
        assert_eq!(player_bar(&Session::default()), "Nothing playing");
    }

    #[test]
    fn player_bar_shows_progress_and_flags() {
        let mut session = Session::default();
        session.load(track()).unwrap();
        session.seek(0.5);
        session.toggle_liked();

        assert_eq!(
            player_bar(&session),
            "> One More Time - Daft Punk  2:40 / 5:20  vol 70%  [liked]"
        );

        session.toggle_mute();
        session.toggle_play_pause();
        assert_eq!(
            player_bar(&session),
            "|| One More Time - Daft Punk  2:40 / 5:20  muted  [liked]"
        );
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn logs_are_written_to_the_given_writer() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = log_subscriber(Some(tracing::Level::INFO), move || writer.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("catalog ready");
            tracing::debug!("below the level");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("catalog ready"));
        assert!(!output.contains("below the level"));
    }

    #[test]
    fn track_line_formats_duration() {
        assert_eq!(track_line(&track()), "One More Time - Daft Punk (5:20)");
    }
}
