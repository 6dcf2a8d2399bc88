/// Audio manager
///
/// Owns the two music decks and the effects channel, and drives every fade
/// from the host's per-frame tick.

use std::sync::OnceLock;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;

use super::channel::{AudioChannel, ChannelSet, VirtualChannel};
use super::clip::AudioClip;
use super::clock::FrameClock;
use super::effects::{validate_duration, VolumePolicy};
use super::scheduler::{FadeScheduler, Transition};
use super::source::ChannelId;
use crate::config::{
    AudioConfig, ChannelSelection, CrossFadeMode, DEFAULT_MAX_FRAME_DELTA_SECS,
};
use crate::error::AudioError;
use crate::messaging::{AudioCommand, AudioHandle};

static GLOBAL: OnceLock<Mutex<AudioManager>> = OnceLock::new();

/// Two-deck music and one-shot effects manager
///
/// All methods are meant to be called from the update thread. Playback
/// operations never fail: invalid durations and ambiguous deck selection are
/// recovered with a hard cut and logged.
pub struct AudioManager {
    config: AudioConfig,
    volume_policy: VolumePolicy,
    channels: ChannelSet,
    scheduler: FadeScheduler,
    /// Deck made current by the last music operation (used by `ChannelSelection::Tracked`)
    current: ChannelId,
    command_tx: Sender<AudioCommand>,
    command_rx: Receiver<AudioCommand>,
}

impl AudioManager {
    /// Create a manager over host-provided channels
    pub fn new(
        config: AudioConfig,
        music_a: Box<dyn AudioChannel>,
        music_b: Box<dyn AudioChannel>,
        sfx: Box<dyn AudioChannel>,
    ) -> Self {
        let (command_tx, command_rx) = unbounded();

        tracing::info!(
            "Audio manager initialized (selection={:?}, cross_fade={:?}, clamp_volumes={})",
            config.channel_selection,
            config.cross_fade_mode,
            config.clamp_volumes
        );

        Self {
            volume_policy: VolumePolicy::from_clamp(config.clamp_volumes),
            config,
            channels: ChannelSet::new(music_a, music_b, sfx),
            scheduler: FadeScheduler::new(),
            current: ChannelId::MusicA,
            command_tx,
            command_rx,
        }
    }

    /// Create a manager over silent in-memory channels.
    ///
    /// Useful for testing or headless operation.
    pub fn headless(config: AudioConfig) -> Self {
        Self::new(
            config,
            Box::new(VirtualChannel::new()),
            Box::new(VirtualChannel::new()),
            Box::new(VirtualChannel::new()),
        )
    }

    /// Create a manager playing through a rodio output device
    #[cfg(feature = "rodio_backend")]
    pub fn with_rodio(config: AudioConfig, output: &super::player::RodioOutput) -> Self {
        Self::new(
            config,
            Box::new(output.channel(true)),
            Box::new(output.channel(true)),
            Box::new(output.channel(false)),
        )
    }

    /// Process-wide manager, created headless on first access if none was installed
    pub fn global() -> &'static Mutex<AudioManager> {
        GLOBAL.get_or_init(|| {
            tracing::info!("No audio manager installed, spawning a headless one");
            Mutex::new(AudioManager::headless(AudioConfig::default()))
        })
    }

    /// Install `manager` as the process-wide instance. Succeeds at most once,
    /// and only before the first call to [`AudioManager::global`].
    pub fn install_global(manager: AudioManager) -> Result<(), AudioError> {
        GLOBAL
            .set(Mutex::new(manager))
            .map_err(|_| AudioError::AlreadyInitialized)
    }

    /// Which music deck an operation would target right now
    fn select_active(&self) -> Result<ChannelId, AudioError> {
        match self.config.channel_selection {
            ChannelSelection::Tracked => Ok(self.current),
            ChannelSelection::Polling => {
                let a = self.channels.get(ChannelId::MusicA).is_playing();
                let b = self.channels.get(ChannelId::MusicB).is_playing();
                match (a, b) {
                    (true, true) => Err(AudioError::NoActiveChannel),
                    (false, true) => Ok(ChannelId::MusicB),
                    _ => Ok(ChannelId::MusicA),
                }
            }
        }
    }

    /// Play `clip` on `channel` at full volume with no ramp; the other deck is stopped
    fn hard_cut(&mut self, channel: ChannelId, clip: &AudioClip) {
        let other = channel.other();
        if self.channels.get(other).is_playing() {
            self.channels.get_mut(other).stop();
        }

        let target = self.channels.get_mut(channel);
        target.set_volume(1.0);
        target.play(clip);
        self.current = channel;

        tracing::debug!("Hard cut to {} on {}", clip, channel);
    }

    /// Active deck, or `None` after a selection failure has already been
    /// recovered by a hard cut onto deck A
    fn active_or_recover(&mut self, clip: &AudioClip) -> Option<ChannelId> {
        match self.select_active() {
            Ok(channel) => Some(channel),
            Err(e) => {
                tracing::warn!("{}; hard cut onto {}", e, ChannelId::MusicA);
                self.hard_cut(ChannelId::MusicA, clip);
                None
            }
        }
    }

    /// Play music immediately on the active deck at full volume
    pub fn play_music(&mut self, clip: AudioClip) {
        let channel = self.select_active().unwrap_or_else(|e| {
            tracing::warn!("{}; using {}", e, ChannelId::MusicA);
            ChannelId::MusicA
        });
        self.hard_cut(channel, &clip);
    }

    /// Fade the active deck out, swap to `clip`, and fade back in, each half
    /// lasting `transition_secs`.
    ///
    /// A non-positive duration swaps immediately and leaves the volume untouched.
    pub fn play_music_with_fade(&mut self, clip: AudioClip, transition_secs: f32) {
        let Some(channel) = self.active_or_recover(&clip) else {
            return;
        };

        match validate_duration(transition_secs) {
            Ok(duration) => {
                tracing::debug!("Fading {} to {} over {}s", channel, clip, duration);
                self.scheduler
                    .schedule_fade_swap(&mut self.channels, channel, clip, duration);
            }
            Err(e) => {
                tracing::warn!("{}; swapping {} immediately", e, channel);
                let target = self.channels.get_mut(channel);
                target.stop();
                target.play(&clip);
            }
        }
        self.current = channel;
    }

    /// [`play_music_with_fade`](Self::play_music_with_fade) with the configured default length
    pub fn play_music_with_default_fade(&mut self, clip: AudioClip) {
        let secs = self.config.default_transition_secs;
        self.play_music_with_fade(clip, secs);
    }

    /// Cross-fade between the decks over `transition_secs`. Which deck gets
    /// `clip` depends on [`CrossFadeMode`].
    pub fn play_music_with_cross_fade(&mut self, clip: AudioClip, transition_secs: f32) {
        let Some(active) = self.active_or_recover(&clip) else {
            return;
        };
        let other = active.other();
        let mode = self.config.cross_fade_mode;

        let duration = match validate_duration(transition_secs) {
            Ok(duration) => duration,
            Err(e) => {
                tracing::warn!("{}; hard cut instead of cross-fade", e);
                match mode {
                    CrossFadeMode::Legacy => self.hard_cut(active, &clip),
                    CrossFadeMode::Handoff => self.hard_cut(other, &clip),
                }
                return;
            }
        };

        // Legacy puts the new clip on the deck that is about to fade out and stop.
        let target = match mode {
            CrossFadeMode::Legacy => active,
            CrossFadeMode::Handoff => other,
        };
        self.channels.get_mut(target).play(&clip);

        tracing::debug!(
            "Cross-fading {} -> {} over {}s ({:?}, {} on {})",
            active,
            other,
            duration,
            mode,
            clip,
            target
        );

        self.scheduler
            .schedule_cross_fade(&mut self.channels, active, other, duration);
        self.current = other;
    }

    /// [`play_music_with_cross_fade`](Self::play_music_with_cross_fade) with the configured
    /// default length
    pub fn play_music_with_default_cross_fade(&mut self, clip: AudioClip) {
        let secs = self.config.default_transition_secs;
        self.play_music_with_cross_fade(clip, secs);
    }

    /// Fire a one-shot at the effects channel's base volume
    pub fn play_sfx(&mut self, clip: AudioClip) {
        self.channels.get_mut(ChannelId::Sfx).play_one_shot(&clip, 1.0);
    }

    /// Fire a one-shot scaled by `volume`
    pub fn play_sfx_with_volume(&mut self, clip: AudioClip, volume: f32) {
        let volume = self.volume_policy.apply(volume);
        self.channels
            .get_mut(ChannelId::Sfx)
            .play_one_shot(&clip, volume);
    }

    /// Write both music decks' volume. In-flight fades overwrite it on their next tick.
    pub fn set_music_volume(&mut self, volume: f32) {
        let volume = self.volume_policy.apply(volume);
        for id in ChannelId::MUSIC {
            self.channels.get_mut(id).set_volume(volume);
        }
    }

    /// Set the effects channel base volume
    pub fn set_sfx_volume(&mut self, volume: f32) {
        let volume = self.volume_policy.apply(volume);
        self.channels.get_mut(ChannelId::Sfx).set_volume(volume);
    }

    /// Stop both music decks and drop in-flight transitions
    pub fn stop_music(&mut self) {
        let dropped = self.scheduler.cancel_all();
        for id in ChannelId::MUSIC {
            self.channels.get_mut(id).stop();
        }
        tracing::debug!("Stopped music ({} transition(s) cancelled)", dropped);
    }

    /// Stop every channel, including the effects channel's main clip
    pub fn stop_all(&mut self) {
        self.stop_music();
        self.channels.get_mut(ChannelId::Sfx).stop();
    }

    /// Advance by one frame of `delta`
    pub fn tick(&mut self, delta: Duration) {
        self.tick_secs(delta.as_secs_f32());
    }

    /// Advance by one frame of `delta_secs` seconds (call once per frame).
    ///
    /// Applies queued commands first, then steps transitions.
    pub fn tick_secs(&mut self, delta_secs: f32) {
        self.drain_commands();
        self.scheduler.tick(delta_secs, &mut self.channels);
        self.channels.update();
    }

    /// Tick using real elapsed time from `clock`
    pub fn update_with_clock(&mut self, clock: &mut FrameClock) {
        let delta = clock.delta();
        self.tick(delta);
    }

    /// Clock capped by this manager's configured frame delta limit.
    ///
    /// A cap that is not a representable duration falls back to the default.
    pub fn frame_clock(&self) -> FrameClock {
        let secs = self.config.max_frame_delta_secs;
        let max_delta = match Duration::try_from_secs_f32(secs) {
            Ok(max_delta) if !max_delta.is_zero() => max_delta,
            _ => {
                tracing::warn!(
                    "Invalid max_frame_delta_secs {}, using {}s",
                    secs,
                    DEFAULT_MAX_FRAME_DELTA_SECS
                );
                Duration::from_secs_f32(DEFAULT_MAX_FRAME_DELTA_SECS)
            }
        };
        FrameClock::new(max_delta)
    }

    /// Apply every queued command. Returns how many were applied.
    pub fn drain_commands(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.command_rx.try_recv() {
            self.apply(command);
            applied += 1;
        }
        applied
    }

    /// Apply a command immediately
    pub fn apply(&mut self, command: AudioCommand) {
        tracing::debug!("Applying command: {}", command.description());

        match command {
            AudioCommand::PlayMusic { clip } => self.play_music(clip),
            AudioCommand::PlayMusicWithFade { clip, transition_secs } => {
                let secs = transition_secs.unwrap_or(self.config.default_transition_secs);
                self.play_music_with_fade(clip, secs);
            }
            AudioCommand::PlayMusicWithCrossFade { clip, transition_secs } => {
                let secs = transition_secs.unwrap_or(self.config.default_transition_secs);
                self.play_music_with_cross_fade(clip, secs);
            }
            AudioCommand::PlaySfx { clip, volume } => match volume {
                Some(volume) => self.play_sfx_with_volume(clip, volume),
                None => self.play_sfx(clip),
            },
            AudioCommand::SetMusicVolume(volume) => self.set_music_volume(volume),
            AudioCommand::SetSfxVolume(volume) => self.set_sfx_volume(volume),
            AudioCommand::StopMusic => self.stop_music(),
            AudioCommand::StopAll => self.stop_all(),
        }
    }

    /// Sender for queuing commands from other threads
    pub fn handle(&self) -> AudioHandle {
        AudioHandle::new(self.command_tx.clone())
    }

    /// Read-only view of one channel
    pub fn channel(&self, id: ChannelId) -> &dyn AudioChannel {
        self.channels.get(id)
    }

    /// Deck the next music operation would target, or `None` if selection is ambiguous
    pub fn active_music_channel(&self) -> Option<ChannelId> {
        self.select_active().ok()
    }

    /// In-flight transitions in scheduling order
    pub fn transitions(&self) -> &[Transition] {
        self.scheduler.transitions()
    }

    /// Whether any fade or cross-fade is still running
    pub fn is_transitioning(&self) -> bool {
        !self.scheduler.is_empty()
    }

    /// Configuration this manager was created with
    pub fn config(&self) -> &AudioConfig {
        &self.config
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::headless(AudioConfig::default())
    }
}
