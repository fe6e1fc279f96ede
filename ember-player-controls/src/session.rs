//! The playback session: what is loaded, the simulated transport clock and the
//! listener's preferences.
//!
//! The session is plain state. It is owned by [`crate::player::Player`], which
//! drives [`Session::tick`] once per second while playing.

use ember_player_models::{Track, format_seconds};
use tracing::warn;

use crate::{
    Result,
    error::Error,
    volume::{Volume, VolumeLevel},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Status {
    Playing,
    Paused,
    #[default]
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not playing; nothing changed.
    Idle,
    Advanced,
    /// The track reached its end and playback stopped.
    Finished,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Session {
    current_track: Option<Track>,
    status: Status,
    elapsed_seconds: u32,
    volume: Volume,
    liked: bool,
    shuffle: bool,
    repeat: bool,
    queue: Vec<Track>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Volume::default())
    }
}

impl Session {
    pub fn new(volume: Volume) -> Self {
        Self {
            current_track: None,
            status: Status::Stopped,
            elapsed_seconds: 0,
            volume,
            liked: false,
            shuffle: false,
            repeat: false,
            queue: Vec::new(),
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    pub fn is_liked(&self) -> bool {
        self.liked
    }

    pub fn is_shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    fn duration_seconds(&self) -> u32 {
        self.current_track
            .as_ref()
            .map_or(0, |track| track.duration_seconds)
    }

    /// Loads `track` and starts playing it from the beginning.
    ///
    /// A track without a usable id is rejected and the session is left as it was.
    pub fn load(&mut self, track: Track) -> Result<()> {
        if !track.is_playable() {
            warn!(title = %track.title, "refusing to load a track without an id");
            return Err(Error::InvalidTrack { title: track.title });
        }

        self.current_track = Some(track);
        self.elapsed_seconds = 0;
        self.liked = false;
        self.status = Status::Playing;

        Ok(())
    }

    /// Only `load` leaves `Stopped`, so this does nothing while stopped.
    pub fn toggle_play_pause(&mut self) {
        if self.current_track.is_none() {
            return;
        }

        self.status = match self.status {
            Status::Playing => Status::Paused,
            Status::Paused => Status::Playing,
            Status::Stopped => Status::Stopped,
        };
    }

    pub fn tick(&mut self) -> Tick {
        if self.status != Status::Playing || self.current_track.is_none() {
            return Tick::Idle;
        }

        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);

        if self.elapsed_seconds >= self.duration_seconds() {
            self.status = Status::Stopped;
            self.elapsed_seconds = 0;
            Tick::Finished
        } else {
            Tick::Advanced
        }
    }

    /// Moves to `fraction` of the track, as clicked on the progress bar.
    pub fn seek(&mut self, fraction: f64) {
        if self.current_track.is_none() {
            return;
        }

        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };

        let duration = self.duration_seconds();
        let position = (fraction * f64::from(duration)).floor() as u32;
        self.elapsed_seconds = position.min(duration);
    }

    pub fn set_volume(&mut self, percent: i32) {
        self.volume.set_level(percent);
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
    }

    /// Flag only; playback order is unaffected.
    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    /// Flag only; a finished track does not restart.
    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
    }

    pub fn toggle_liked(&mut self) {
        self.liked = !self.liked;
    }

    pub fn skip_back(&mut self) {
        self.elapsed_seconds = 0;
    }

    // TODO: advance through `queue` once next/previous semantics are decided.
    pub fn skip_forward(&mut self) {
        self.elapsed_seconds = 0;
        self.status = Status::Stopped;
    }

    pub fn set_queue(&mut self, tracks: Vec<Track>) {
        self.queue = tracks.into_iter().filter(Track::is_playable).collect();
    }

    /// Position on the progress bar, from 0 to 1.
    pub fn progress(&self) -> f64 {
        match self.duration_seconds() {
            0 => 0.0,
            duration => f64::from(self.elapsed_seconds) / f64::from(duration),
        }
    }

    pub fn elapsed(&self) -> String {
        format_seconds(self.elapsed_seconds)
    }

    pub fn effective_volume(&self) -> u8 {
        self.volume.effective()
    }

    pub fn volume_level(&self) -> VolumeLevel {
        self.volume.indicator()
    }
}
