pub mod channel;
pub mod clip;
pub mod clock;
pub mod effects;
pub mod manager;
#[cfg(feature = "rodio_backend")]
pub mod player;
pub mod scheduler;
/// Audio system module
///
/// Two music decks and one effects channel behind a single manager, with
/// volume transitions driven by the host's frame tick.
///
/// ## Architecture
///
/// ```text
/// AudioManager
///   ├── ChannelSet
///   │     ├── Music A  ─┐ one "active" deck,
///   │     ├── Music B  ─┘ the other used for cross-fades
///   │     └── SFX        (overlapping one-shots)
///   └── FadeScheduler
///         ├── Transition::FadeSwap   (out, swap, in)
///         └── Transition::CrossFade  (out + in together)
/// ```
///
/// Channels are trait objects ([`AudioChannel`]): [`VirtualChannel`] for
/// headless use, `RodioChannel` with the `rodio_backend` feature.
///
/// ## Usage
///
/// ```rust,ignore
/// use game_audio::audio_system::{AudioManager, AudioClip};
///
/// let mut manager = AudioManager::headless(AudioConfig::default());
/// manager.play_music(AudioClip::from_file(Path::new("menu.ogg"))?);
/// manager.play_music_with_cross_fade(battle_theme, 2.0);
///
/// // Once per frame:
/// manager.tick(frame_delta);
/// ```
pub mod source;

// Re-export commonly used types
pub use channel::{AudioChannel, ChannelProbe, ChannelSet, OneShot, VirtualChannel};
pub use clip::AudioClip;
pub use clock::FrameClock;
pub use effects::{Fade, VolumePolicy};
pub use manager::AudioManager;
#[cfg(feature = "rodio_backend")]
pub use player::{RodioChannel, RodioOutput};
pub use scheduler::{FadePhase, FadeScheduler, Transition};
pub use source::ChannelId;
