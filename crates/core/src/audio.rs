//! Audio device seam
//!
//! [`AudioDevice`] is what a platform backend implements. [`AudioDispatcher`] replays a
//! frame's [`Effects`] onto a device and remembers which channel carries the music so it can
//! be stopped or re-pitched later.

use crate::effects::{Effect, Effects, SampleHandle};

/// Opaque id of a playing channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelHandle(pub u32);

pub trait AudioDevice {
    /// Start a sample and return the channel it plays on
    fn play(&mut self, sample: SampleHandle) -> ChannelHandle;

    fn stop(&mut self, channel: ChannelHandle);

    fn set_playback_rate(&mut self, channel: ChannelHandle, rate: u32);
}

#[derive(Debug, Clone, Default)]
pub struct AudioDispatcher {
    music: Option<ChannelHandle>,
}

impl AudioDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch<A: AudioDevice>(&mut self, effects: &Effects, device: &mut A) {
        for effect in effects.iter() {
            match *effect {
                Effect::Play(handle) => {
                    device.play(handle);
                }
                Effect::PlayMusic(handle) => {
                    if let Some(old) = self.music.take() {
                        device.stop(old);
                    }
                    self.music = Some(device.play(handle));
                }
                Effect::StopMusic => {
                    if let Some(channel) = self.music.take() {
                        device.stop(channel);
                    }
                }
                Effect::SetMusicRate(rate) => match self.music {
                    Some(channel) => device.set_playback_rate(channel, rate),
                    None => log::debug!("music rate {} requested with no music playing", rate),
                },
            }
        }
    }

    pub fn music_channel(&self) -> Option<ChannelHandle> {
        self.music
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sample;

    #[derive(Default)]
    struct RecordingDevice {
        next: u32,
        log: Vec<String>,
    }

    impl AudioDevice for RecordingDevice {
        fn play(&mut self, sample: SampleHandle) -> ChannelHandle {
            self.next += 1;
            self.log.push(format!("play {} on {}", sample.sample.as_str(), self.next));
            ChannelHandle(self.next)
        }

        fn stop(&mut self, channel: ChannelHandle) {
            self.log.push(format!("stop {}", channel.0));
        }

        fn set_playback_rate(&mut self, channel: ChannelHandle, rate: u32) {
            self.log.push(format!("rate {} {}", channel.0, rate));
        }
    }

    #[test]
    fn music_channel_is_tracked() {
        let mut device = RecordingDevice::default();
        let mut dispatcher = AudioDispatcher::new();

        let mut fx = Effects::new(1, 2);
        fx.start_music(Sample::Theme);
        fx.sfx(Sample::Click);
        fx.set_music_rate(23152);
        fx.stop_music();
        fx.set_music_rate(22050);
        dispatcher.dispatch(&fx, &mut device);

        assert_eq!(
            device.log,
            vec!["play theme on 1", "play click on 2", "rate 1 23152", "stop 1"]
        );
        assert_eq!(dispatcher.music_channel(), None);
    }
}
