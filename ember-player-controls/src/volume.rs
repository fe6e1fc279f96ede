//! Volume and mute state for the player bar.
//!
//! Mute is independent of the stored level so that unmuting restores it.

pub const DEFAULT_VOLUME: u8 = 70;

/// Level restored when unmuting while the stored level is 0.
pub const DEFAULT_UNMUTE_VOLUME: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum VolumeLevel {
    Muted,
    Low,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Volume {
    level: u8,
    muted: bool,
}

impl Volume {
    /// Starts unmuted at `level`, capped at 100.
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Clamps to 0..=100. A level of 0 mutes, anything else unmutes.
    pub fn set_level(&mut self, percent: i32) {
        let level = percent.clamp(0, 100) as u8;
        self.level = level;
        self.muted = level == 0;
    }

    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.muted = false;
            if self.level == 0 {
                self.level = DEFAULT_UNMUTE_VOLUME;
            }
        } else {
            self.muted = true;
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// What the volume bar shows: 0 while muted.
    pub fn effective(&self) -> u8 {
        if self.muted { 0 } else { self.level }
    }

    pub fn indicator(&self) -> VolumeLevel {
        if self.muted || self.level == 0 {
            VolumeLevel::Muted
        } else if self.level < 50 {
            VolumeLevel::Low
        } else {
            VolumeLevel::High
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_mutes_and_nonzero_unmutes() {
        let mut volume = Volume::default();

        volume.set_level(0);
        assert!(volume.is_muted());

        volume.set_level(30);
        assert!(!volume.is_muted());
        assert_eq!(volume.level(), 30);
    }

    #[test]
    fn set_level_clamps() {
        let mut volume = Volume::default();

        volume.set_level(250);
        assert_eq!(volume.level(), 100);

        volume.set_level(-20);
        assert_eq!(volume.level(), 0);
        assert!(volume.is_muted());
    }

    #[test]
    fn mute_preserves_level() {
        let mut volume = Volume::new(80);

        volume.toggle_mute();
        assert!(volume.is_muted());
        assert_eq!(volume.level(), 80);
        assert_eq!(volume.effective(), 0);

        volume.toggle_mute();
        assert!(!volume.is_muted());
        assert_eq!(volume.effective(), 80);
    }

    #[test]
    fn unmuting_silence_restores_default_level() {
        let mut volume = Volume::new(0);
        assert!(!volume.is_muted());

        volume.toggle_mute();
        assert!(volume.is_muted());
        assert_eq!(volume.level(), 0);

        volume.toggle_mute();
        assert!(!volume.is_muted());
        assert_eq!(volume.level(), DEFAULT_UNMUTE_VOLUME);
    }

    #[test]
    fn indicator_follows_level() {
        assert_eq!(Volume::new(0).indicator(), VolumeLevel::Muted);
        assert_eq!(Volume::new(49).indicator(), VolumeLevel::Low);
        assert_eq!(Volume::new(50).indicator(), VolumeLevel::High);

        let mut muted = Volume::new(90);
        muted.toggle_mute();
        assert_eq!(muted.indicator(), VolumeLevel::Muted);
    }
}
