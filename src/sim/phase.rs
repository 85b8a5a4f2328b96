//! Title and stage-preview screens

use serde::{Deserialize, Serialize};

use super::anim::AnimationClock;
use super::clock::Clock;
use crate::consts::{INTRO_BLINKS, PREVIEW_SECONDS};

/// What the intro screen wants after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroSignal {
    /// Prompt started blinking; music should start
    Started,
    /// Blink countdown finished
    Done,
}

/// Title screen: wait for Confirm, blink the prompt, then move on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroScreen {
    /// Confirm was released since the screen was entered
    pub can_proceed: bool,
    pub blinking: bool,
    pub blink_count: u32,
    pub blink: AnimationClock,
}

impl Default for IntroScreen {
    fn default() -> Self {
        Self {
            can_proceed: true,
            blinking: false,
            blink_count: 0,
            blink: AnimationClock::with_frames(2),
        }
    }
}

impl IntroScreen {
    /// Back to the waiting state; `can_proceed` is kept
    pub fn reset(&mut self) {
        self.blinking = false;
        self.blink_count = 0;
        self.blink.reset();
    }

    /// Prompt visible this frame
    pub fn prompt_visible(&self) -> bool {
        !self.blinking || self.blink.frame() == 1
    }

    pub fn update(&mut self, confirm_down: bool, confirm_released: bool) -> Option<IntroSignal> {
        let mut signal = None;
        if confirm_released {
            self.can_proceed = true;
        } else if confirm_down && self.can_proceed && !self.blinking {
            self.blinking = true;
            signal = Some(IntroSignal::Started);
        }

        if self.blinking && self.blink.advance() {
            if self.blink_count == INTRO_BLINKS {
                self.reset();
                return Some(IntroSignal::Done);
            }
            self.blink_count += 1;
        }
        signal
    }
}

/// Stage preview: a fixed wait before play
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewScreen {
    pub clock: Clock,
}

impl PreviewScreen {
    /// True when the wait is over
    pub fn update(&mut self) -> bool {
        match self.clock.tick() {
            Some(tick) if tick.seconds == PREVIEW_SECONDS => {
                self.clock.reset();
                true
            }
            _ => false,
        }
    }
}
