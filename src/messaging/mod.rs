/// Messaging module
///
/// Commands let code that doesn't own the manager (other threads, UI callbacks)
/// request playback. They are queued on an unbounded channel and drained by
/// `AudioManager::tick`.
///
/// ## Usage
///
/// ```rust,ignore
/// let handle = manager.handle();
/// std::thread::spawn(move || {
///     handle.play_sfx(click.clone());
/// });
///
/// // Later, on the update thread:
/// manager.tick(frame_delta);
/// ```

pub mod commands;

pub use commands::{AudioCommand, AudioHandle};
