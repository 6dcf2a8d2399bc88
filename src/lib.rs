//! Game audio manager.
//!
//! Two looping music decks and one effects channel owned by a single
//! [`AudioManager`], with fades and cross-fades advanced by the host's
//! per-frame tick. Decoding and mixing stay with the channel backend.
//!
//! # Architecture
//!
//! - [`AudioManager`] - play / fade / cross-fade / one-shot operations
//! - [`AudioChannel`] - host mixer interface, see [`VirtualChannel`]
//! - [`AudioClip`] - opaque handle to encoded audio
//! - [`AudioConfig`] - transition defaults and compatibility switches
//! - [`AudioHandle`] - queue commands from other threads
//!
//! # Example
//!
//! ```ignore
//! let mut audio = AudioManager::headless(AudioConfig::default());
//! audio.play_music(menu_theme);
//! audio.play_music_with_fade(battle_theme, 2.0);
//! loop {
//!     audio.tick(frame_delta);
//! }
//! ```

pub mod audio_system;
pub mod config;
pub mod error;
pub mod logging;
pub mod messaging;

pub use audio_system::{
    AudioChannel, AudioClip, AudioManager, ChannelId, FrameClock, Transition, VirtualChannel,
};
pub use config::{AudioConfig, ChannelSelection, CrossFadeMode};
pub use error::{AppResult, AudioError, ConfigError};
pub use messaging::{AudioCommand, AudioHandle};
