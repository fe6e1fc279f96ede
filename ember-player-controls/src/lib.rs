use error::Error;

pub use ember_player_client::{catalog_models::recommendations::Seeds, client::ClientConfig};
pub use session::{Session, Status, Tick};

pub mod client;
pub mod controls;
pub mod error;
pub mod models;
pub mod notification;
pub mod player;
pub mod provider;
pub mod search;
pub mod session;
pub mod timer;
pub mod volume;

#[cfg(test)]
mod testing;

pub type Result<T, E = Error> = std::result::Result<T, E>;
