use crate::Result;
use ember_player_models::Track;
use tokio::sync::broadcast::{self, Receiver, Sender};

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    TrackLoaded { track: Track },
    TrackFinished { track_id: String },
    Error(String),
    Warning(String),
}

/// Fan-out of player events and user-facing messages.
#[derive(Debug)]
pub struct NotificationBroadcast {
    tx: Sender<Notification>,
    // Kept so sending never fails for lack of subscribers.
    rx: Receiver<Notification>,
}

impl NotificationBroadcast {
    pub fn new() -> Self {
        let (tx, rx) = broadcast::channel(20);
        Self { tx, rx }
    }

    pub fn send(&self, notification: Notification) -> Result<()> {
        self.tx.send(notification)?;
        Ok(())
    }

    pub fn subscribe(&self) -> Receiver<Notification> {
        self.rx.resubscribe()
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send_or_log(Notification::Error(message.into()));
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.send_or_log(Notification::Warning(message.into()));
    }

    pub(crate) fn send_or_log(&self, notification: Notification) {
        if let Err(error) = self.send(notification) {
            tracing::warn!(%error, "dropping notification");
        }
    }
}

impl Default for NotificationBroadcast {
    fn default() -> Self {
        Self::new()
    }
}
