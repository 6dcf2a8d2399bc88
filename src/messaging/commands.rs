/// Audio commands
///
/// Commands are requests queued from anywhere and applied by the manager on
/// its next tick, on the update thread.
use crossbeam_channel::Sender;

use crate::audio_system::AudioClip;

/// Requests mirroring the manager's playback operations
#[derive(Debug, Clone)]
pub enum AudioCommand {
    PlayMusic {
        clip: AudioClip,
    },

    /// `None` uses the configured default transition length
    PlayMusicWithFade {
        clip: AudioClip,
        transition_secs: Option<f32>,
    },

    PlayMusicWithCrossFade {
        clip: AudioClip,
        transition_secs: Option<f32>,
    },

    /// `None` plays at the channel's base volume
    PlaySfx {
        clip: AudioClip,
        volume: Option<f32>,
    },

    SetMusicVolume(f32),

    SetSfxVolume(f32),

    StopMusic,

    StopAll,
}

impl AudioCommand {
    /// Get a human-readable description of the command
    pub fn description(&self) -> String {
        match self {
            AudioCommand::PlayMusic { clip } => format!("Play music: {}", clip),
            AudioCommand::PlayMusicWithFade { clip, transition_secs } => match transition_secs {
                Some(secs) => format!("Fade music to {} over {}s", clip, secs),
                None => format!("Fade music to {}", clip),
            },
            AudioCommand::PlayMusicWithCrossFade { clip, transition_secs } => {
                match transition_secs {
                    Some(secs) => format!("Cross-fade music to {} over {}s", clip, secs),
                    None => format!("Cross-fade music to {}", clip),
                }
            }
            AudioCommand::PlaySfx { clip, volume } => match volume {
                Some(volume) => format!("Play sfx: {} at {}", clip, volume),
                None => format!("Play sfx: {}", clip),
            },
            AudioCommand::SetMusicVolume(volume) => format!("Set music volume: {}", volume),
            AudioCommand::SetSfxVolume(volume) => format!("Set sfx volume: {}", volume),
            AudioCommand::StopMusic => "Stop music".to_string(),
            AudioCommand::StopAll => "Stop all audio".to_string(),
        }
    }
}

/// Cloneable, thread-safe sender of [`AudioCommand`]s
///
/// Sends never block. They fail only when the manager has been dropped,
/// in which case the command is discarded and `false` is returned.
#[derive(Debug, Clone)]
pub struct AudioHandle {
    sender: Sender<AudioCommand>,
}

impl AudioHandle {
    pub(crate) fn new(sender: Sender<AudioCommand>) -> Self {
        Self { sender }
    }

    /// Queue an arbitrary command
    pub fn send(&self, command: AudioCommand) -> bool {
        match self.sender.send(command) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Audio manager gone, dropping command: {}", e.0.description());
                false
            }
        }
    }

    pub fn play_music(&self, clip: AudioClip) -> bool {
        self.send(AudioCommand::PlayMusic { clip })
    }

    pub fn play_music_with_fade(&self, clip: AudioClip, transition_secs: f32) -> bool {
        self.send(AudioCommand::PlayMusicWithFade {
            clip,
            transition_secs: Some(transition_secs),
        })
    }

    pub fn play_music_with_cross_fade(&self, clip: AudioClip, transition_secs: f32) -> bool {
        self.send(AudioCommand::PlayMusicWithCrossFade {
            clip,
            transition_secs: Some(transition_secs),
        })
    }

    pub fn play_sfx(&self, clip: AudioClip) -> bool {
        self.send(AudioCommand::PlaySfx { clip, volume: None })
    }

    pub fn play_sfx_with_volume(&self, clip: AudioClip, volume: f32) -> bool {
        self.send(AudioCommand::PlaySfx {
            clip,
            volume: Some(volume),
        })
    }

    pub fn set_music_volume(&self, volume: f32) -> bool {
        self.send(AudioCommand::SetMusicVolume(volume))
    }

    pub fn set_sfx_volume(&self, volume: f32) -> bool {
        self.send(AudioCommand::SetSfxVolume(volume))
    }
}
