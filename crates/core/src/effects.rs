//! Side effects produced by one frame
//!
//! The core never touches audio itself. Each update returns an [`Effects`] list that the
//! caller hands to an [`crate::audio::AudioDispatcher`].

use arrayvec::ArrayVec;

use crate::types::Sample;

/// Maximum number of effects recorded per frame
pub const MAX_EFFECTS: usize = 32;

/// A sample together with the volume it plays at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleHandle {
    pub sample: Sample,
    pub volume: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Fire-and-forget sound effect
    Play(SampleHandle),
    /// Start the background music on its own channel
    PlayMusic(SampleHandle),
    StopMusic,
    /// Re-pitch the music channel
    SetMusicRate(u32),
}

/// Effects of one frame, plus the volumes new samples are created with
#[derive(Debug, Clone)]
pub struct Effects {
    list: ArrayVec<Effect, MAX_EFFECTS>,
    sfx_volume: u16,
    music_volume: u16,
}

impl Effects {
    pub fn new(sfx_volume: u16, music_volume: u16) -> Self {
        Self {
            list: ArrayVec::new(),
            sfx_volume,
            music_volume,
        }
    }

    /// Volumes for samples queued from now on
    pub fn set_volumes(&mut self, sfx_volume: u16, music_volume: u16) {
        self.sfx_volume = sfx_volume;
        self.music_volume = music_volume;
    }

    pub fn push(&mut self, effect: Effect) {
        if self.list.try_push(effect).is_err() {
            log::warn!("effect list full, dropping {:?}", effect);
        }
    }

    /// Queue a sound effect at the sfx volume
    pub fn sfx(&mut self, sample: Sample) {
        let volume = self.sfx_volume;
        self.push(Effect::Play(SampleHandle { sample, volume }));
    }

    /// Queue a sound effect at the music volume
    pub fn sfx_at_music_volume(&mut self, sample: Sample) {
        let volume = self.music_volume;
        self.push(Effect::Play(SampleHandle { sample, volume }));
    }

    pub fn start_music(&mut self, sample: Sample) {
        let volume = self.music_volume;
        self.push(Effect::PlayMusic(SampleHandle { sample, volume }));
    }

    pub fn stop_music(&mut self) {
        self.push(Effect::StopMusic);
    }

    pub fn set_music_rate(&mut self, rate: u32) {
        self.push(Effect::SetMusicRate(rate));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.list.iter()
    }

    pub fn as_slice(&self) -> &[Effect] {
        &self.list
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Whether a sound effect for `sample` was queued
    pub fn contains_sfx(&self, sample: Sample) -> bool {
        self.list
            .iter()
            .any(|e| matches!(e, Effect::Play(h) if h.sample == sample))
    }
}

impl Default for Effects {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
