/// Channel abstraction
///
/// The host mixer is reached only through [`AudioChannel`]. [`VirtualChannel`]
/// is an in-memory implementation used for headless runs and tests; the rodio
/// implementation lives in `player.rs` behind the `rodio_backend` feature.

use std::sync::Arc;

use parking_lot::Mutex;

use super::clip::AudioClip;
use super::source::ChannelId;

/// Output path capable of holding one clip and a volume level
pub trait AudioChannel: Send {
    /// Assign `clip` and start it from the beginning, cutting off whatever was playing
    fn play(&mut self, clip: &AudioClip);

    /// Stop the main clip. The clip stays assigned.
    fn stop(&mut self);

    fn set_volume(&mut self, volume: f32);

    fn volume(&self) -> f32;

    fn is_playing(&self) -> bool;

    fn set_loop(&mut self, looping: bool);

    fn is_looping(&self) -> bool;

    /// Currently assigned clip, if any
    fn clip(&self) -> Option<AudioClip>;

    /// Fire-and-forget playback that overlaps other one-shots on this channel.
    /// Loudness is the channel volume scaled by `volume_scale`.
    fn play_one_shot(&mut self, clip: &AudioClip, volume_scale: f32);

    /// Number of one-shots still sounding
    fn active_one_shots(&self) -> usize;

    /// Per-frame housekeeping (pruning finished one-shots)
    fn update(&mut self) {}
}

/// The three channels owned by the manager
pub struct ChannelSet {
    music_a: Box<dyn AudioChannel>,
    music_b: Box<dyn AudioChannel>,
    sfx: Box<dyn AudioChannel>,
}

impl ChannelSet {
    /// Take ownership of the channels and apply default loop flags
    pub fn new(
        mut music_a: Box<dyn AudioChannel>,
        mut music_b: Box<dyn AudioChannel>,
        mut sfx: Box<dyn AudioChannel>,
    ) -> Self {
        music_a.set_loop(ChannelId::MusicA.loops_by_default());
        music_b.set_loop(ChannelId::MusicB.loops_by_default());
        sfx.set_loop(ChannelId::Sfx.loops_by_default());

        Self {
            music_a,
            music_b,
            sfx,
        }
    }

    pub fn get(&self, id: ChannelId) -> &dyn AudioChannel {
        match id {
            ChannelId::MusicA => self.music_a.as_ref(),
            ChannelId::MusicB => self.music_b.as_ref(),
            ChannelId::Sfx => self.sfx.as_ref(),
        }
    }

    pub fn get_mut(&mut self, id: ChannelId) -> &mut (dyn AudioChannel + 'static) {
        match id {
            ChannelId::MusicA => self.music_a.as_mut(),
            ChannelId::MusicB => self.music_b.as_mut(),
            ChannelId::Sfx => self.sfx.as_mut(),
        }
    }

    /// Run per-frame housekeeping on every channel
    pub fn update(&mut self) {
        self.music_a.update();
        self.music_b.update();
        self.sfx.update();
    }
}

/// Record of one fired one-shot
#[derive(Debug, Clone, PartialEq)]
pub struct OneShot {
    pub clip: AudioClip,
    /// Scale passed by the caller
    pub volume_scale: f32,
    /// Channel volume at the time it fired
    pub base_volume: f32,
}

impl OneShot {
    /// Loudness the mixer would apply
    pub fn effective_volume(&self) -> f32 {
        self.base_volume * self.volume_scale
    }
}

#[derive(Debug, Clone)]
struct VirtualState {
    clip: Option<AudioClip>,
    volume: f32,
    playing: bool,
    looping: bool,
    play_count: u32,
    one_shots: Vec<OneShot>,
    sounding: usize,
}

impl Default for VirtualState {
    fn default() -> Self {
        Self {
            clip: None,
            volume: 1.0,
            playing: false,
            looping: false,
            play_count: 0,
            one_shots: Vec::new(),
            sounding: 0,
        }
    }
}

/// In-memory channel that records every state change
///
/// State is shared with any [`ChannelProbe`] handed out, so a test can keep
/// observing a channel after it has been moved into the manager.
#[derive(Debug, Default)]
pub struct VirtualChannel {
    state: Arc<Mutex<VirtualState>>,
}

impl VirtualChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a channel with the loop flag preset
    pub fn looping(looping: bool) -> Self {
        let channel = Self::new();
        channel.state.lock().looping = looping;
        channel
    }

    /// Observer sharing this channel's state
    pub fn probe(&self) -> ChannelProbe {
        ChannelProbe {
            state: Arc::clone(&self.state),
        }
    }
}

impl AudioChannel for VirtualChannel {
    fn play(&mut self, clip: &AudioClip) {
        let mut state = self.state.lock();
        state.clip = Some(clip.clone());
        state.playing = true;
        state.play_count += 1;
    }

    fn stop(&mut self) {
        self.state.lock().playing = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.state.lock().volume = volume;
    }

    fn volume(&self) -> f32 {
        self.state.lock().volume
    }

    fn is_playing(&self) -> bool {
        self.state.lock().playing
    }

    fn set_loop(&mut self, looping: bool) {
        self.state.lock().looping = looping;
    }

    fn is_looping(&self) -> bool {
        self.state.lock().looping
    }

    fn clip(&self) -> Option<AudioClip> {
        self.state.lock().clip.clone()
    }

    fn play_one_shot(&mut self, clip: &AudioClip, volume_scale: f32) {
        let mut state = self.state.lock();
        let base_volume = state.volume;
        state.one_shots.push(OneShot {
            clip: clip.clone(),
            volume_scale,
            base_volume,
        });
        state.sounding += 1;
    }

    fn active_one_shots(&self) -> usize {
        self.state.lock().sounding
    }
}

/// Read-only view into a [`VirtualChannel`] plus hooks to simulate the mixer
#[derive(Debug, Clone)]
pub struct ChannelProbe {
    state: Arc<Mutex<VirtualState>>,
}

impl ChannelProbe {
    pub fn volume(&self) -> f32 {
        self.state.lock().volume
    }

    pub fn is_playing(&self) -> bool {
        self.state.lock().playing
    }

    pub fn is_looping(&self) -> bool {
        self.state.lock().looping
    }

    pub fn clip(&self) -> Option<AudioClip> {
        self.state.lock().clip.clone()
    }

    /// How many times `play` was called
    pub fn play_count(&self) -> u32 {
        self.state.lock().play_count
    }

    /// Every one-shot fired so far, oldest first
    pub fn one_shots(&self) -> Vec<OneShot> {
        self.state.lock().one_shots.clone()
    }

    /// Simulate the main clip running out. Looping channels never finish.
    pub fn finish(&self) {
        let mut state = self.state.lock();
        if !state.looping {
            state.playing = false;
        }
    }

    /// Simulate all sounding one-shots running out
    pub fn finish_one_shots(&self) {
        self.state.lock().sounding = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_channel_defaults() {
        let channel = VirtualChannel::new();
        assert!(!channel.is_playing());
        assert_eq!(channel.volume(), 1.0);
        assert!(channel.clip().is_none());
        assert!(!channel.is_looping());
    }

    #[test]
    fn test_play_and_stop_keeps_clip() {
        let mut channel = VirtualChannel::new();
        let clip = AudioClip::silent("theme");

        channel.play(&clip);
        assert!(channel.is_playing());

        channel.stop();
        assert!(!channel.is_playing());
        assert_eq!(channel.clip(), Some(clip));
    }

    #[test]
    fn test_one_shots_overlap() {
        let mut channel = VirtualChannel::new();
        let probe = channel.probe();
        let click = AudioClip::silent("click");

        channel.set_volume(0.5);
        channel.play_one_shot(&click, 1.0);
        channel.play_one_shot(&click, 0.4);

        let shots = probe.one_shots();
        assert_eq!(shots.len(), 2);
        assert_eq!(channel.active_one_shots(), 2);
        assert!((shots[0].effective_volume() - 0.5).abs() < 1e-6);
        assert!((shots[1].effective_volume() - 0.2).abs() < 1e-6);
        assert!(!channel.is_playing()); // one-shots don't touch the main clip

        probe.finish_one_shots();
        assert_eq!(channel.active_one_shots(), 0);
    }

    #[test]
    fn test_finish_respects_loop() {
        let mut channel = VirtualChannel::looping(true);
        let probe = channel.probe();
        channel.play(&AudioClip::silent("loop"));

        probe.finish();
        assert!(probe.is_playing());

        channel.set_loop(false);
        probe.finish();
        assert!(!probe.is_playing());
    }
}
