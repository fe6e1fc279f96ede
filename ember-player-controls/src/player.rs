use ember_player_models::Track;
use std::sync::Arc;
use tokio::{
    select,
    sync::{
        mpsc::{self, UnboundedReceiver, UnboundedSender},
        watch,
    },
};
use tracing::{debug, error, instrument, warn};

use crate::{
    Result,
    controls::{ControlCommand, Controls},
    notification::{Notification, NotificationBroadcast},
    provider::CatalogProvider,
    session::{Session, Status, Tick},
    timer::Ticker,
    volume::Volume,
};

const PLAYLIST_PAGE_SIZE: u32 = 50;
const RESERVED_PLAYLISTS: [&str; 2] = ["liked", "podcast"];
const PLAYLIST_EMPTY: &str = "This playlist appears to be empty or contains no playable tracks.";
const PLAYLIST_FAILED: &str = "An error occurred while trying to play the playlist.";

/// Result of a playlist fetch, sent back to the loop by the fetching task.
#[derive(Debug)]
struct PlaylistLoaded {
    request: u64,
    id: String,
    result: Result<Vec<Track>>,
}

pub struct Player {
    session: Session,
    ticker: Ticker,
    provider: Arc<dyn CatalogProvider>,
    notifications: Arc<NotificationBroadcast>,
    commands: UnboundedReceiver<ControlCommand>,
    state: watch::Sender<Session>,
    // Bumped by every play request; only the fetch carrying the latest value is applied.
    play_request: u64,
    playlists_tx: UnboundedSender<PlaylistLoaded>,
    playlists_rx: UnboundedReceiver<PlaylistLoaded>,
}

impl Player {
    pub fn new(
        provider: Arc<dyn CatalogProvider>,
        notifications: Arc<NotificationBroadcast>,
        volume: u8,
    ) -> (Self, Controls) {
        let (tx, commands) = mpsc::unbounded_channel();
        let (playlists_tx, playlists_rx) = mpsc::unbounded_channel();
        let session = Session::new(Volume::new(volume));
        let (state, _) = watch::channel(session.clone());

        let player = Self {
            session,
            ticker: Ticker::default(),
            provider,
            notifications,
            commands,
            state,
            play_request: 0,
            playlists_tx,
            playlists_rx,
        };

        (player, Controls::new(tx))
    }

    pub fn state(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    fn publish(&self) {
        self.state.send_replace(self.session.clone());
    }

    fn sync_ticker(&mut self) {
        self.ticker.sync(self.session.status() == Status::Playing);
    }

    fn load(&mut self, track: Track) {
        match self.session.load(track.clone()) {
            Ok(()) => {
                self.ticker.disarm();
                self.notifications
                    .send_or_log(Notification::TrackLoaded { track });
            }
            Err(error) => debug!(%error, "ignoring load request"),
        }
    }

    fn on_tick(&mut self) {
        match self.session.tick() {
            Tick::Idle => return,
            Tick::Advanced => {}
            Tick::Finished => {
                self.ticker.disarm();
                if let Some(track) = self.session.current_track() {
                    self.notifications.send_or_log(Notification::TrackFinished {
                        track_id: track.id.clone(),
                    });
                }
            }
        }

        self.publish();
    }

    /// Starts fetching the playlist in the background. The loop keeps ticking
    /// and handling commands until the tracks arrive.
    #[instrument(skip(self))]
    fn play_playlist(&mut self, id: String) {
        if RESERVED_PLAYLISTS.contains(&id.as_str()) {
            self.notifications
                .warning(format!("Playing '{id}' is not supported yet."));
            return;
        }

        self.play_request += 1;
        let request = self.play_request;
        let provider = self.provider.clone();
        let tx = self.playlists_tx.clone();

        tokio::spawn(async move {
            let result = provider.playlist_tracks(&id, 0, PLAYLIST_PAGE_SIZE).await;
            if tx.send(PlaylistLoaded { request, id, result }).is_err() {
                debug!("player stopped before playlist arrived");
            }
        });
    }

    #[instrument(skip(self, loaded), fields(id = %loaded.id))]
    fn on_playlist_loaded(&mut self, loaded: PlaylistLoaded) {
        if loaded.request != self.play_request {
            debug!("discarding superseded playlist");
            return;
        }

        let tracks = match loaded.result {
            Ok(tracks) => tracks,
            Err(error) => {
                error!(%error, "unable to fetch playlist tracks");
                self.notifications.error(PLAYLIST_FAILED);
                return;
            }
        };

        let mut playable = tracks.into_iter().filter(Track::is_playable);
        let Some(first) = playable.next() else {
            warn!("playlist has no playable tracks");
            self.notifications.warning(PLAYLIST_EMPTY);
            return;
        };

        self.load(first);
        self.session.set_queue(playable.collect());
        self.sync_ticker();
        self.publish();
    }

    /// Applies one command. Returns `true` when the loop should stop.
    fn handle_command(&mut self, command: ControlCommand) -> bool {
        match command {
            ControlCommand::Load { track } => {
                self.play_request += 1;
                self.load(track);
            }
            ControlCommand::PlayPlaylist { id } => self.play_playlist(id),
            ControlCommand::PlayPause => self.session.toggle_play_pause(),
            ControlCommand::Seek { fraction } => self.session.seek(fraction),
            ControlCommand::SetVolume { percent } => self.session.set_volume(percent),
            ControlCommand::ToggleMute => self.session.toggle_mute(),
            ControlCommand::ToggleShuffle => self.session.toggle_shuffle(),
            ControlCommand::ToggleRepeat => self.session.toggle_repeat(),
            ControlCommand::ToggleLiked => self.session.toggle_liked(),
            ControlCommand::SkipBack => self.session.skip_back(),
            ControlCommand::SkipForward => self.session.skip_forward(),
            ControlCommand::Quit => return true,
        }

        self.sync_ticker();
        self.publish();
        false
    }

    /// Runs until [`Controls::quit`] is called or every [`Controls`] handle is dropped.
    pub async fn player_loop(&mut self) -> Result<()> {
        loop {
            select! {
                _ = self.ticker.tick() => {
                    self.on_tick();
                }

                Some(loaded) = self.playlists_rx.recv() => {
                    self.on_playlist_loaded(loaded);
                }

                command = self.commands.recv() => {
                    let Some(command) = command else {
                        debug!("all controls dropped, stopping player");
                        break;
                    };

                    if self.handle_command(command) {
                        break;
                    }
                }
            }
        }

        self.ticker.disarm();
        Ok(())
    }
}
