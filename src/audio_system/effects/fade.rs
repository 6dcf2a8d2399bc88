/// Linear volume ramps
///
/// A [`Fade`] is a plain value advanced by the scheduler once per tick.

use crate::audio_system::source::ChannelId;
use crate::error::AudioError;

/// Check a transition length in seconds. Zero, negative and non-finite values are rejected.
pub fn validate_duration(secs: f32) -> Result<f32, AudioError> {
    if secs.is_finite() && secs > 0.0 {
        Ok(secs)
    } else {
        Err(AudioError::InvalidTransitionDuration(secs))
    }
}

/// In-flight linear ramp on one channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub channel: ChannelId,
    pub start_volume: f32,
    pub end_volume: f32,
    /// Seconds advanced so far
    pub elapsed: f32,
    /// Total length in seconds
    pub duration: f32,
}

impl Fade {
    /// Create a new fade
    pub fn new(channel: ChannelId, start_volume: f32, end_volume: f32, duration: f32) -> Self {
        Self {
            channel,
            start_volume,
            end_volume,
            elapsed: 0.0,
            duration,
        }
    }

    /// Ramp from full volume to silence
    pub fn fade_out(channel: ChannelId, duration: f32) -> Self {
        Self::new(channel, 1.0, 0.0, duration)
    }

    /// Ramp from silence to full volume
    pub fn fade_in(channel: ChannelId, duration: f32) -> Self {
        Self::new(channel, 0.0, 1.0, duration)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Fraction of the ramp completed, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Volume at the current position. A finished fade reports its end volume exactly.
    pub fn volume(&self) -> f32 {
        if self.is_finished() {
            return self.end_volume;
        }
        self.start_volume + (self.end_volume - self.start_volume) * self.progress()
    }

    /// Move forward by `delta` seconds and return the new volume
    pub fn advance(&mut self, delta: f32) -> f32 {
        self.elapsed += delta.max(0.0);
        self.volume()
    }

    /// Seconds of `delta` that went past the end of the ramp
    pub fn overshoot(&self) -> f32 {
        (self.elapsed - self.duration).max(0.0)
    }
}
