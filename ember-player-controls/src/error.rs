use crate::notification::Notification;
use snafu::prelude::*;

#[derive(Snafu, Debug)]
pub enum Error {
    #[snafu(display("{message}"))]
    Client { message: String },
    #[snafu(display("Track {title:?} has no usable id and cannot be played"))]
    InvalidTrack { title: String },
    #[snafu(display("Unable to broadcast notification"))]
    Notification,
}

impl From<ember_player_client::Error> for Error {
    fn from(value: ember_player_client::Error) -> Self {
        Error::Client {
            message: value.to_string(),
        }
    }
}

impl From<tokio::sync::broadcast::error::SendError<Notification>> for Error {
    fn from(_value: tokio::sync::broadcast::error::SendError<Notification>) -> Self {
        Self::Notification
    }
}
