//! Game settings
//!
//! The same values the options menu edits. They can be preloaded from JSON; anything missing
//! takes its default.

use serde::{Deserialize, Serialize};

use crate::queue::Randomizer;
use crate::types::{MAX_VOLUME, VOLUME_TABLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bag randomizer when true, uniform rolls when false
    pub random_bag: bool,
    /// Sound effect volume setting, `0..=11`
    pub sfx_volume: u8,
    /// Music volume setting, `0..=11`
    pub music_volume: u8,
    /// Fixed RNG seed; taken from the frame counter at the title screen when absent
    pub seed: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            random_bag: true,
            sfx_volume: MAX_VOLUME,
            music_volume: 5,
            seed: None,
        }
    }
}

impl Config {
    /// Clamp out-of-range volumes, logging what changed
    pub fn sanitized(mut self) -> Self {
        if self.sfx_volume > MAX_VOLUME {
            log::warn!("sfx_volume {} out of range, using {}", self.sfx_volume, MAX_VOLUME);
            self.sfx_volume = MAX_VOLUME;
        }
        if self.music_volume > MAX_VOLUME {
            log::warn!("music_volume {} out of range, using {}", self.music_volume, MAX_VOLUME);
            self.music_volume = MAX_VOLUME;
        }
        self
    }

    pub fn randomizer(&self) -> Randomizer {
        if self.random_bag {
            Randomizer::Bag
        } else {
            Randomizer::Uniform
        }
    }

    /// Device volume for sound effects
    pub fn sfx_level(&self) -> u16 {
        volume_level(self.sfx_volume)
    }

    /// Device volume for music
    pub fn music_level(&self) -> u16 {
        volume_level(self.music_volume)
    }
}

/// Map a `0..=11` setting onto the device volume table
pub fn volume_level(setting: u8) -> u16 {
    VOLUME_TABLE[setting.min(MAX_VOLUME) as usize]
}
