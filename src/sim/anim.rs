//! Per-visual animation timing
//!
//! Renderers draw whatever `frame()` says; the simulation only cares about
//! loop completion (enemy attack resolution, defeat countdown).

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ANIM_RATE, TARGET_FPS};

/// Frame timer for one animated visual
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationClock {
    frame_count: u32,
    rate: u32,
    timer: u32,
    frame: u32,
    /// Paused animations keep their timer running but hold the current frame
    pub paused: bool,
}

impl AnimationClock {
    pub fn new(frame_count: u32, rate: u32) -> Self {
        assert!(frame_count > 0, "animation needs at least one frame");
        assert!(rate > 0 && rate <= TARGET_FPS, "animation rate {rate} out of range");
        Self {
            frame_count,
            rate,
            timer: 0,
            frame: 0,
            paused: false,
        }
    }

    /// Animation at the default logic-rate cadence
    pub fn with_frames(frame_count: u32) -> Self {
        Self::new(frame_count, DEFAULT_ANIM_RATE)
    }

    /// Advance one rendered frame; true when this step wrapped back to frame 0
    pub fn advance(&mut self) -> bool {
        self.timer += 1;
        if self.timer < TARGET_FPS / self.rate {
            return false;
        }
        self.timer = 0;
        if self.paused {
            return false;
        }
        self.frame += 1;
        if self.frame >= self.frame_count {
            self.frame = 0;
            return true;
        }
        false
    }

    /// Current frame index for drawing
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Change frame-advance speed (walk vs. run cycle)
    pub fn set_rate(&mut self, rate: u32) {
        assert!(rate > 0 && rate <= TARGET_FPS, "animation rate {rate} out of range");
        self.rate = rate;
    }

    /// Jump back to the first frame immediately
    pub fn reset(&mut self) {
        self.frame = 0;
        self.timer = 0;
    }

    /// Rendered frames needed for one full loop
    pub fn loop_frames(&self) -> u32 {
        (TARGET_FPS / self.rate) * self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_reported_once_per_cycle() {
        let mut anim = AnimationClock::new(2, 3);
        assert_eq!(anim.loop_frames(), 40);

        let loops: Vec<u32> = (1..=120).filter(|_| anim.advance()).collect();
        assert_eq!(loops.len(), 3);
        assert_eq!(anim.frame(), 0);
    }

    #[test]
    fn test_first_loop_lands_on_exact_frame() {
        let mut anim = AnimationClock::with_frames(2);
        for _ in 0..23 {
            assert!(!anim.advance());
        }
        assert!(anim.advance());
    }

    #[test]
    fn test_paused_holds_frame() {
        let mut anim = AnimationClock::new(4, 6);
        for _ in 0..10 {
            anim.advance();
        }
        assert_eq!(anim.frame(), 1);

        anim.paused = true;
        for _ in 0..100 {
            assert!(!anim.advance());
        }
        assert_eq!(anim.frame(), 1);
    }

    #[test]
    fn test_reset_and_rate_change() {
        let mut anim = AnimationClock::new(2, 3);
        for _ in 0..25 {
            anim.advance();
        }
        assert_eq!(anim.frame(), 1);
        anim.reset();
        assert_eq!(anim.frame(), 0);

        anim.set_rate(5);
        assert_eq!(anim.loop_frames(), 24);
    }
}
