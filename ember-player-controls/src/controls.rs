use ember_player_models::Track;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug)]
pub enum ControlCommand {
    Load { track: Track },
    PlayPlaylist { id: String },
    PlayPause,
    Seek { fraction: f64 },
    SetVolume { percent: i32 },
    ToggleMute,
    ToggleShuffle,
    ToggleRepeat,
    ToggleLiked,
    SkipBack,
    SkipForward,
    Quit,
}

/// Cloneable handle for driving a running [`crate::player::Player`].
#[derive(Debug, Clone)]
pub struct Controls {
    tx: UnboundedSender<ControlCommand>,
}

impl Controls {
    pub(crate) fn new(tx: UnboundedSender<ControlCommand>) -> Self {
        Self { tx }
    }

    pub fn send(&self, command: ControlCommand) {
        if let Err(error) = self.tx.send(command) {
            tracing::warn!(command = ?error.0, "player loop has stopped, dropping command");
        }
    }

    pub fn load(&self, track: Track) {
        self.send(ControlCommand::Load { track });
    }

    pub fn play_playlist(&self, id: &str) {
        self.send(ControlCommand::PlayPlaylist { id: id.to_string() });
    }

    pub fn play_pause(&self) {
        self.send(ControlCommand::PlayPause);
    }

    pub fn seek(&self, fraction: f64) {
        self.send(ControlCommand::Seek { fraction });
    }

    pub fn set_volume(&self, percent: i32) {
        self.send(ControlCommand::SetVolume { percent });
    }

    pub fn toggle_mute(&self) {
        self.send(ControlCommand::ToggleMute);
    }

    pub fn toggle_shuffle(&self) {
        self.send(ControlCommand::ToggleShuffle);
    }

    pub fn toggle_repeat(&self) {
        self.send(ControlCommand::ToggleRepeat);
    }

    pub fn toggle_liked(&self) {
        self.send(ControlCommand::ToggleLiked);
    }

    pub fn skip_back(&self) {
        self.send(ControlCommand::SkipBack);
    }

    pub fn skip_forward(&self) {
        self.send(ControlCommand::SkipForward);
    }

    pub fn quit(&self) {
        self.send(ControlCommand::Quit);
    }
}
