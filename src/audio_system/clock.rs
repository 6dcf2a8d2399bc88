/// Real-time frame clock
///
/// Hosts that don't already track frame time can use this to feed `tick`.

use std::time::{Duration, Instant};

/// Measures wall-clock time between successive ticks
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    max_delta: Duration,
}

impl FrameClock {
    /// Start the clock now. Deltas longer than `max_delta` are capped.
    pub fn new(max_delta: Duration) -> Self {
        Self {
            last: Instant::now(),
            max_delta,
        }
    }

    /// Time since the previous call (or since creation), capped
    pub fn delta(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;

        if elapsed > self.max_delta {
            tracing::debug!(
                "Frame delta {:?} exceeds cap, clamping to {:?}",
                elapsed,
                self.max_delta
            );
            self.max_delta
        } else {
            elapsed
        }
    }

    pub fn max_delta(&self) -> Duration {
        self.max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_is_capped() {
        let mut clock = FrameClock::new(Duration::from_millis(5));
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(clock.delta(), Duration::from_millis(5));
    }

    #[test]
    fn test_delta_resets() {
        let mut clock = FrameClock::new(Duration::from_secs(10));
        std::thread::sleep(Duration::from_millis(2));
        let first = clock.delta();
        assert!(first >= Duration::from_millis(2));
        assert!(clock.delta() < first + Duration::from_secs(1));
    }
}
