//! Input snapshots and the demo autopilot

use crate::sim::{GamePhase, GameState, Keys, TickInput};

/// Tracks held keys between frames so releases can be reported
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardState {
    held: Keys,
}

impl KeyboardState {
    /// Snapshot for a frame where exactly `held` is down
    pub fn update(&mut self, held: Keys) -> TickInput {
        let released = self.held.difference(held);
        self.held = held;
        TickInput { held, released }
    }

    pub fn held(&self) -> Keys {
        self.held
    }
}

/// Scripted player for headless runs. Output depends only on the state it
/// is shown, so a seeded run replays exactly.
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Frame at which Quit is pressed
    pub quit_after: Option<u64>,
    /// Horizontal gap at which the autopilot stops walking and attacks
    pub strike_gap: i32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            quit_after: None,
            strike_gap: 22,
        }
    }
}

impl Autopilot {
    pub fn new(quit_after: Option<u64>) -> Self {
        Self {
            quit_after,
            ..Self::default()
        }
    }

    /// Keys to hold for the next frame of `state`
    pub fn keys(&self, state: &GameState) -> Keys {
        let frame = state.frame;
        if self.quit_after.is_some_and(|last| frame >= last) {
            return Keys::QUIT;
        }

        // Press-and-release rhythm so edge-triggered actions re-arm
        let pulse = |period: u64| frame % period < period / 2;

        match state.session.phase {
            GamePhase::Intro if pulse(30) => Keys::CONFIRM,
            GamePhase::Intro | GamePhase::Preview => Keys::empty(),
            GamePhase::Play if state.round.is_game_over() => {
                if pulse(30) {
                    Keys::CONFIRM
                } else {
                    Keys::empty()
                }
            }
            GamePhase::Play => self.fight(state, frame),
        }
    }

    fn fight(&self, state: &GameState, frame: u64) -> Keys {
        let gap = state.enemy.pos.x - state.player.pos.x;
        let toward = if gap > 0 { Keys::RIGHT } else { Keys::LEFT };

        if gap.abs() > self.strike_gap {
            if frame % 240 < 4 {
                return Keys::UP | toward;
            }
            return toward;
        }

        let beat = frame / 16;
        if beat % 2 == 1 {
            return Keys::empty();
        }
        match (beat / 2) % 3 {
            0 => Keys::PUNCH,
            1 => Keys::KICK,
            _ => Keys::DOWN | Keys::KICK,
        }
    }
}
