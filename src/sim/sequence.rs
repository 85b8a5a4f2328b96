//! End-of-round choreography
//!
//! Both sequencers are pure state machines. On each due clock tick they
//! return a beat describing what the round should do; `tick` applies it.
//! Steps only ever move forward, and `GameOver` is absorbing.

use serde::{Deserialize, Serialize};

use super::player::PlayerAction;
use crate::consts::{HALT_LONG, HALT_SHORT};

/// Victory choreography step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VictoryStep {
    #[default]
    Start,
    PlayWinSound,
    ShowPunch,
    ShowLowKick1,
    ShowHighKick1,
    ShowHighKick2,
    ShowLowKick2,
    ShowPunch2,
    Smile,
    CountLife,
    Transition,
    GameOver,
}

impl VictoryStep {
    fn next(self) -> Self {
        use VictoryStep::*;
        match self {
            Start => PlayWinSound,
            PlayWinSound => ShowPunch,
            ShowPunch => ShowLowKick1,
            ShowLowKick1 => ShowHighKick1,
            ShowHighKick1 => ShowHighKick2,
            ShowHighKick2 => ShowLowKick2,
            ShowLowKick2 => ShowPunch2,
            ShowPunch2 => Smile,
            Smile => CountLife,
            CountLife => Transition,
            Transition | GameOver => GameOver,
        }
    }

    /// Player pose for the choreography steps: (action, flip, attack sound)
    fn pose(self) -> Option<(PlayerAction, bool, bool)> {
        use VictoryStep::*;
        match self {
            ShowPunch => Some((PlayerAction::PunchStand, false, true)),
            ShowLowKick1 | ShowLowKick2 => Some((PlayerAction::KickCrouch, true, true)),
            ShowHighKick1 | ShowHighKick2 => Some((PlayerAction::KickHigh, true, true)),
            ShowPunch2 => Some((PlayerAction::PunchStand, true, true)),
            Smile => Some((PlayerAction::Smile, true, false)),
            _ => None,
        }
    }
}

/// What the round should do for one victory step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VictoryBeat {
    /// Enemy collapses
    EnemyDown,
    WinJingle,
    Pose {
        action: PlayerAction,
        flip: bool,
        sound: bool,
    },
    /// Convert one remaining health point into score
    CountLife,
    /// Next level
    Advance,
    /// Final level cleared
    GameOver,
}

/// Victory sequence, run while the enemy is down
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VictorySequence {
    step: VictoryStep,
    halt: u32,
    threshold: u32,
}

impl Default for VictorySequence {
    fn default() -> Self {
        Self {
            step: VictoryStep::Start,
            halt: 0,
            threshold: HALT_LONG,
        }
    }
}

impl VictorySequence {
    pub fn step(&self) -> VictoryStep {
        self.step
    }

    /// The choreography has taken over the player
    pub fn started(&self) -> bool {
        self.step != VictoryStep::Start
    }

    pub fn is_game_over(&self) -> bool {
        self.step == VictoryStep::GameOver
    }

    /// Clock tick. `player_health` is what is left to count, `final_level`
    /// decides between advancing and ending the game.
    pub fn on_second(&mut self, player_health: u8, final_level: bool) -> Option<VictoryBeat> {
        self.halt += 1;
        if self.halt < self.threshold {
            return None;
        }
        self.halt = 0;
        self.advance(player_health, final_level)
    }

    fn advance(&mut self, player_health: u8, final_level: bool) -> Option<VictoryBeat> {
        let current = self.step;
        log::debug!("victory step {current:?}");

        if let Some((action, flip, sound)) = current.pose() {
            self.step = current.next();
            return Some(VictoryBeat::Pose {
                action,
                flip,
                sound,
            });
        }

        match current {
            VictoryStep::Start => {
                self.step = current.next();
                Some(VictoryBeat::EnemyDown)
            }
            VictoryStep::PlayWinSound => {
                self.step = current.next();
                Some(VictoryBeat::WinJingle)
            }
            VictoryStep::CountLife => {
                self.threshold = HALT_SHORT;
                if player_health > 0 {
                    return Some(VictoryBeat::CountLife);
                }
                self.step = current.next();
                None
            }
            VictoryStep::Transition => {
                self.threshold = HALT_LONG;
                if final_level {
                    self.step = VictoryStep::GameOver;
                    return Some(VictoryBeat::GameOver);
                }
                Some(VictoryBeat::Advance)
            }
            _ => None,
        }
    }
}

/// Defeat choreography step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum DefeatStep {
    #[default]
    Start,
    LieDown,
    MoveFeet,
    Transition,
    GameOver,
}

/// What the round should do for one defeat step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatBeat {
    /// Enemy freezes, music stops
    Collapse,
    LieDown,
    /// Spend a life and replay the level
    Retry,
    GameOver,
}

/// Defeat sequence, run while the player is down and the enemy is not
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefeatSequence {
    step: DefeatStep,
    halt: u32,
}

impl DefeatSequence {
    pub fn step(&self) -> DefeatStep {
        self.step
    }

    pub fn is_game_over(&self) -> bool {
        self.step == DefeatStep::GameOver
    }

    /// The defeat animation finished its last loop
    pub fn feet_stopped(&mut self) {
        if self.step == DefeatStep::MoveFeet {
            self.step = DefeatStep::Transition;
        }
    }

    pub fn on_second(&mut self, lives: u8) -> Option<DefeatBeat> {
        self.halt += 1;
        if self.halt < HALT_LONG {
            return None;
        }
        self.halt = 0;

        log::debug!("defeat step {:?}", self.step);
        match self.step {
            DefeatStep::Start => {
                self.step = DefeatStep::LieDown;
                Some(DefeatBeat::Collapse)
            }
            DefeatStep::LieDown => {
                self.step = DefeatStep::MoveFeet;
                Some(DefeatBeat::LieDown)
            }
            DefeatStep::MoveFeet | DefeatStep::GameOver => None,
            DefeatStep::Transition => {
                if lives > 0 {
                    return Some(DefeatBeat::Retry);
                }
                self.step = DefeatStep::GameOver;
                Some(DefeatBeat::GameOver)
            }
        }
    }
}
