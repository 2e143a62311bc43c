//! SilentAudio: an audio device that only logs.
//!
//! Terminals have no mixer, so sample playback is recorded at debug level. Channel handles
//! are still handed out so music stop and re-pitch requests can be followed in the log.

use crate::core::{AudioDevice, ChannelHandle, SampleHandle};

#[derive(Debug, Default)]
pub struct SilentAudio {
    next_channel: u32,
    /// Samples requested so far
    played: u64,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioDevice for SilentAudio {
    fn play(&mut self, sample: SampleHandle) -> ChannelHandle {
        let channel = ChannelHandle(self.next_channel);
        self.next_channel = self.next_channel.wrapping_add(1);
        self.played += 1;
        log::debug!(
            "play {} at volume {:#06x} on channel {}",
            sample.sample.as_str(),
            sample.volume,
            channel.0
        );
        channel
    }

    fn stop(&mut self, channel: ChannelHandle) {
        log::debug!("stop channel {}", channel.0);
    }

    fn set_playback_rate(&mut self, channel: ChannelHandle, rate: u32) {
        log::debug!("channel {} rate {} Hz", channel.0, rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AudioDispatcher, Effects};
    use crate::types::Sample;

    #[test]
    fn dispatch_counts_samples() {
        let mut fx = Effects::new(0x3FFF, 0x1FFF);
        fx.start_music(Sample::Theme);
        fx.sfx(Sample::Click);
        fx.stop_music();

        let mut device = SilentAudio::new();
        let mut dispatcher = AudioDispatcher::new();
        dispatcher.dispatch(&fx, &mut device);
        assert_eq!(device.played(), 2);
        assert_eq!(dispatcher.music_channel(), None);
    }
}
