//! Enemy AI state machine
//!
//! The enemy advances on its own cadence (`ENEMY_AI_RATE` steps per second),
//! independent of the logical clock. `MoveState` decides what the AI is
//! doing; `EnemyAction` decides which animation plays.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::anim::AnimationClock;
use super::hitbox::{ENEMY_ATTACK_FRAMES, EnemyProfile, Rect, enemy_attack_box, enemy_profile};
use crate::Tuning;
use crate::consts::*;

/// Enemy animation/action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyAction {
    #[default]
    Idle,
    MoveLeft,
    MoveRight,
    Defeated,
    Punch,
    Kick,
    Special,
    /// Holds the last attack frame
    Pause,
}

impl EnemyAction {
    pub fn is_attack(&self) -> bool {
        matches!(self, EnemyAction::Punch | EnemyAction::Kick)
    }
}

/// What the AI is currently deciding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveState {
    #[default]
    FollowPlayer,
    ChargeAttack,
    RetreatRunningLeft,
    RetreatRunningRight,
}

impl MoveState {
    pub fn is_retreating(&self) -> bool {
        matches!(self, MoveState::RetreatRunningLeft | MoveState::RetreatRunningRight)
    }
}

/// Basic attack picked when the player is in range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyAttack {
    Kick,
    Punch,
}

impl EnemyAttack {
    const CHOICES: [EnemyAttack; 2] = [EnemyAttack::Kick, EnemyAttack::Punch];

    pub fn action(&self) -> EnemyAction {
        match self {
            EnemyAttack::Kick => EnemyAction::Kick,
            EnemyAttack::Punch => EnemyAction::Punch,
        }
    }
}

/// Level-3 hazard carried alongside the enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinningChain {
    pub pos: IVec2,
    pub anim: AnimationClock,
}

/// The enemy fighter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub level: u8,
    pub pos: IVec2,
    /// Facing right (base sprite faces left)
    pub flipped: bool,
    pub health: u8,
    pub action: EnemyAction,
    pub move_state: MoveState,
    pub attack: Option<EnemyAttack>,
    ai_frames: u32,
    run_distance: u32,
    pub body_anim: AnimationClock,
    pub kick_anim: AnimationClock,
    pub punch_anim: AnimationClock,
    pub chain: Option<SpinningChain>,
}

impl Enemy {
    pub fn new(level: u8) -> Self {
        let profile = enemy_profile(level);
        let chain = (level == CHAIN_LEVEL).then(|| SpinningChain {
            pos: ENEMY_START + CHAIN_OFFSET,
            anim: AnimationClock::new(8, CHAIN_ANIM_RATE),
        });
        Self {
            level,
            pos: ENEMY_START,
            flipped: false,
            health: DEFAULT_HEALTH,
            action: EnemyAction::Idle,
            move_state: MoveState::FollowPlayer,
            attack: None,
            ai_frames: 0,
            run_distance: 0,
            body_anim: AnimationClock::new(profile.idle_frames, ENEMY_WALK_ANIM_RATE),
            kick_anim: AnimationClock::new(ENEMY_ATTACK_FRAMES, ENEMY_WALK_ANIM_RATE),
            punch_anim: AnimationClock::new(ENEMY_ATTACK_FRAMES, ENEMY_WALK_ANIM_RATE),
            chain,
        }
    }

    /// Fresh round against the archetype of `level`
    pub fn reset(&mut self, level: u8) {
        *self = Self::new(level);
    }

    pub fn profile(&self) -> &'static EnemyProfile {
        enemy_profile(self.level)
    }

    pub fn hurtbox(&self) -> Rect {
        self.profile().body.place(self.pos, self.flipped)
    }

    /// World-space box of the attack being performed, if any
    pub fn attack_box(&self) -> Option<Rect> {
        let profile = self.profile();
        let hitbox = match self.action {
            EnemyAction::Kick => &profile.kick,
            EnemyAction::Punch => &profile.punch,
            _ => return None,
        };
        Some(enemy_attack_box(profile, hitbox, self.pos, self.flipped))
    }

    /// Translate horizontally, carrying the chain along
    pub fn shift_x(&mut self, delta: i32) {
        self.pos.x += delta;
        if let Some(chain) = self.chain.as_mut() {
            chain.pos.x += delta;
        }
    }

    /// Mirror the enemy; the chain sprite origin shifts with it
    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
        if let Some(chain) = self.chain.as_mut() {
            chain.pos.x += if self.flipped {
                -CHAIN_FLIP_SHIFT
            } else {
                CHAIN_FLIP_SHIFT
            };
        }
    }

    /// Advance the AI cadence; runs one decision step when due
    pub fn tick_ai<R: Rng + ?Sized>(&mut self, player_x: i32, rng: &mut R, tuning: &Tuning) {
        self.ai_frames += 1;
        if self.ai_frames < TARGET_FPS / ENEMY_AI_RATE {
            return;
        }
        self.ai_frames = 0;
        self.step_ai(player_x, rng, tuning);
    }

    /// One decision step of the move-state machine
    pub fn step_ai<R: Rng + ?Sized>(&mut self, player_x: i32, rng: &mut R, tuning: &Tuning) {
        match self.move_state {
            MoveState::ChargeAttack => {}
            MoveState::RetreatRunningLeft => self.run(false, tuning),
            MoveState::RetreatRunningRight => self.run(true, tuning),
            MoveState::FollowPlayer => {
                self.pursue(player_x);
                if self.in_range(player_x, tuning) {
                    self.begin_attack(rng);
                }
            }
        }
    }

    fn pursue(&mut self, player_x: i32) {
        if self.pos.x > player_x {
            self.action = EnemyAction::MoveLeft;
            self.shift_x(-ENEMY_WALK_SPEED);
        } else if self.pos.x < player_x {
            self.action = EnemyAction::MoveRight;
            self.shift_x(ENEMY_WALK_SPEED);
        } else {
            self.action = EnemyAction::Idle;
        }
    }

    /// Player within engagement range on the side the enemy faces
    pub fn in_range(&self, player_x: i32, tuning: &Tuning) -> bool {
        let reach = tuning.player_frame_width + tuning.engagement_padding;
        (self.flipped && self.pos.x >= player_x - reach)
            || (!self.flipped && self.pos.x <= player_x + reach)
    }

    fn begin_attack<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let attack = EnemyAttack::CHOICES[rng.random_range(0..EnemyAttack::CHOICES.len())];
        log::debug!("enemy {} charges {:?}", self.profile().archetype.name(), attack);
        self.move_state = MoveState::ChargeAttack;
        self.attack = Some(attack);
        self.action = attack.action();
    }

    fn run(&mut self, going_right: bool, tuning: &Tuning) {
        if self.run_distance > tuning.retreat_distance {
            self.move_state = MoveState::FollowPlayer;
            self.body_anim.set_rate(ENEMY_WALK_ANIM_RATE);
            return;
        }

        let (left_limit, right_limit) = tuning.enemy_run_limits();

        if going_right && self.pos.x < right_limit {
            self.action = EnemyAction::MoveRight;
            self.shift_x(tuning.enemy_run_step);
            self.run_distance += 1;
        } else if !going_right && self.pos.x > left_limit {
            self.action = EnemyAction::MoveLeft;
            self.shift_x(-tuning.enemy_run_step);
            self.run_distance += 1;
        } else {
            self.move_state = if going_right {
                MoveState::RetreatRunningLeft
            } else {
                MoveState::RetreatRunningRight
            };
        }
    }

    /// Took damage: run away from the side the enemy faces at run-cycle speed
    pub fn start_retreat(&mut self) {
        if self.move_state.is_retreating() {
            return;
        }
        self.run_distance = 0;
        self.move_state = if self.flipped {
            MoveState::RetreatRunningLeft
        } else {
            MoveState::RetreatRunningRight
        };
        self.body_anim.set_rate(ENEMY_RUN_ANIM_RATE);
    }

    /// Back to pursuit after an attack finished
    pub fn reset_move(&mut self) {
        self.action = EnemyAction::Idle;
        self.move_state = MoveState::FollowPlayer;
        match self.attack {
            Some(EnemyAttack::Kick) => self.kick_anim.reset(),
            Some(EnemyAttack::Punch) => self.punch_anim.reset(),
            None => {}
        }
    }

    /// Attack connected: hold the last frame and step back from the player
    pub fn land_hit(&mut self) {
        self.action = EnemyAction::Pause;
        self.shift_x(if self.flipped {
            -ENEMY_WALK_SPEED
        } else {
            ENEMY_WALK_SPEED
        });
    }

    /// Advance the visible animation. Returns the attack whose animation just
    /// completed a loop, which is when the attack is resolved.
    pub fn animate(&mut self, paused: bool) -> Option<EnemyAttack> {
        match self.action {
            EnemyAction::Kick | EnemyAction::Punch => {
                let attack = self.attack?;
                let anim = match attack {
                    EnemyAttack::Kick => &mut self.kick_anim,
                    EnemyAttack::Punch => &mut self.punch_anim,
                };
                anim.paused = paused;
                anim.advance().then_some(attack)
            }
            EnemyAction::Idle | EnemyAction::MoveLeft | EnemyAction::MoveRight => {
                if let Some(chain) = self.chain.as_mut() {
                    chain.anim.paused = paused;
                    chain.anim.advance();
                }
                self.body_anim.paused = paused;
                self.body_anim.advance();
                None
            }
            EnemyAction::Defeated | EnemyAction::Special | EnemyAction::Pause => None,
        }
    }

    /// Turn toward the player, never mid-swing
    pub fn face_player(&mut self, player_x: i32) {
        if self.action.is_attack() {
            return;
        }
        if (self.pos.x < player_x && !self.flipped) || (self.pos.x > player_x && self.flipped) {
            self.flip();
        }
    }
}
