//! Discrete logical clock
//!
//! Every timed state machine owns one of these and reacts to the ticks it
//! reports. Nothing here suspends: waiting is always a counter compared
//! against a threshold by the owner.

use serde::{Deserialize, Serialize};

use crate::consts::{LOGIC_RATE, TARGET_FPS};

/// Seconds counter wraps back to zero after this value
pub const SECONDS_WRAP: u32 = 59;

/// One logical second elapsed. A tick reporting 0 seconds marks the minute
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    /// Elapsed seconds after this tick (0..=59)
    pub seconds: u32,
}

/// Converts per-frame updates into logical-second ticks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    frames: u32,
    seconds: u32,
    period: u32,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(LOGIC_RATE)
    }
}

impl Clock {
    /// Clock firing `rate` times per real second of rendered frames
    pub fn new(rate: u32) -> Self {
        assert!(rate > 0 && rate <= TARGET_FPS, "clock rate {rate} out of range");
        Self {
            frames: 0,
            seconds: 0,
            period: TARGET_FPS / rate,
        }
    }

    /// Advance one rendered frame. Returns a tick when a logical second elapsed.
    pub fn tick(&mut self) -> Option<ClockTick> {
        self.frames += 1;
        if self.frames < self.period {
            return None;
        }
        self.frames = 0;

        self.seconds = if self.seconds == SECONDS_WRAP {
            0
        } else {
            self.seconds + 1
        };
        Some(ClockTick { seconds: self.seconds })
    }

    /// Elapsed logical seconds (0..=59)
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Frames per logical second
    pub fn period(&self) -> u32 {
        self.period
    }

    pub fn reset(&mut self) {
        self.frames = 0;
        self.seconds = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_fires_every_period() {
        let mut clock = Clock::default();
        assert_eq!(clock.period(), 12);

        for _ in 0..11 {
            assert!(clock.tick().is_none());
        }
        let tick = clock.tick().expect("12th frame ticks");
        assert_eq!(tick.seconds, 1);
    }

    #[test]
    fn test_wrap_reports_instead_of_incrementing() {
        let mut clock = Clock::default();
        let mut ticks = Vec::new();
        for _ in 0..(60 * clock.period()) {
            if let Some(t) = clock.tick() {
                ticks.push(t);
            }
        }

        assert_eq!(ticks.len(), 60);
        assert_eq!(ticks[58].seconds, 59);
        assert_eq!(ticks[59], ClockTick { seconds: 0 });
        assert_eq!(ticks.iter().filter(|t| t.seconds == 0).count(), 1);
    }

    #[test]
    fn test_reset() {
        let mut clock = Clock::default();
        for _ in 0..30 {
            clock.tick();
        }
        assert_eq!(clock.seconds(), 2);
        clock.reset();
        assert_eq!(clock.seconds(), 0);
        for _ in 0..11 {
            assert!(clock.tick().is_none());
        }
        assert!(clock.tick().is_some());
    }
}
