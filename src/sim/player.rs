//! Player action state machine
//!
//! Maps the per-frame input snapshot plus lock/cooldown state to a single
//! action, integrates the jump arc, and times the stun and attack cooldown
//! windows on the player's own clock.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::anim::AnimationClock;
use super::clock::Clock;
use super::hitbox::{
    HitBox, PLAYER_AIR_ATTACK, PLAYER_BODY, PLAYER_KICK_CROUCH, PLAYER_KICK_HIGH,
    PLAYER_KICK_STAND, PLAYER_PUNCH_CROUCH, PLAYER_PUNCH_STAND, Rect,
};
use super::tick::{Keys, TickInput};
use crate::Tuning;
use crate::consts::*;

/// Player action (drives which pose or animation is shown)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerAction {
    None,
    #[default]
    Idle,
    /// Alternate idle pose when pushing against the right edge
    IdleAtWall,
    WalkLeft,
    WalkRight,
    Crouch,
    PunchStand,
    PunchCrouch,
    KickStand,
    KickCrouch,
    /// Kick while moving
    KickHigh,
    JumpUp,
    JumpDown,
    Smile,
    Defeated,
    FullyDefeated,
}

impl PlayerAction {
    pub fn is_airborne(&self) -> bool {
        matches!(self, PlayerAction::JumpUp | PlayerAction::JumpDown)
    }

    pub fn is_attack(&self) -> bool {
        matches!(
            self,
            PlayerAction::PunchStand
                | PlayerAction::PunchCrouch
                | PlayerAction::KickStand
                | PlayerAction::KickCrouch
                | PlayerAction::KickHigh
        )
    }
}

/// Horizontal drift applied during a jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpDrift {
    #[default]
    None,
    Left,
    Right,
}

/// An attack placed in world space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub area: Rect,
    pub bonus: u32,
}

/// Result of resolving an attack at activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeOutcome {
    Miss(Strike),
    Hit(Strike),
}

/// Progress of the looping defeat animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatProgress {
    /// Another loop played
    Twitch,
    /// Final loop played; the pose is now terminal
    Finished,
}

/// The player fighter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: IVec2,
    /// Facing left (base sprite faces right)
    pub flipped: bool,
    pub health: u8,
    pub action: PlayerAction,
    pub prev_action: PlayerAction,
    /// Stunned, mid-attack or airborne
    pub controls_locked: bool,
    pub can_attack: bool,
    /// Hit effect is showing on the enemy
    pub show_hit: bool,
    /// Where the hit effect is drawn
    pub hit_effect_pos: IVec2,
    /// Shaking after being struck
    pub shaking: bool,
    shake_right: bool,
    /// X to restore when the shake ends
    anchor_x: i32,
    /// Defeat animation loops played so far
    pub defeat_loops: u32,
    pub drift: JumpDrift,
    pub flying_kick: bool,
    can_fly_kick: bool,
    cooldown_armed: bool,
    cooldown_ticks: u32,
    stun_ticks: u32,
    fly_kick_ticks: u32,
    jump_frames: u32,
    jump_accel: u32,
    pub clock: Clock,
    /// Two-frame walk cycle, only running while walking
    pub walk_anim: AnimationClock,
    pub defeat_anim: AnimationClock,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: PLAYER_START,
            flipped: false,
            health: DEFAULT_HEALTH,
            action: PlayerAction::Idle,
            prev_action: PlayerAction::None,
            controls_locked: false,
            can_attack: true,
            show_hit: false,
            hit_effect_pos: IVec2::ZERO,
            shaking: false,
            shake_right: false,
            anchor_x: PLAYER_START.x,
            defeat_loops: 0,
            drift: JumpDrift::None,
            flying_kick: false,
            can_fly_kick: true,
            cooldown_armed: false,
            cooldown_ticks: 0,
            stun_ticks: 0,
            fly_kick_ticks: 0,
            jump_frames: 0,
            jump_accel: 0,
            clock: Clock::default(),
            walk_anim: AnimationClock::new(2, PLAYER_ANIM_RATE),
            defeat_anim: AnimationClock::with_frames(2),
        }
    }

    /// Back to round-start state. Lives are owned by the session.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Commit a new action. Idle never overrides the defeat animation.
    pub fn set_action(&mut self, action: PlayerAction) {
        if self.action == PlayerAction::Defeated && action == PlayerAction::Idle {
            return;
        }
        self.prev_action = self.action;
        self.action = action;
    }

    pub fn is_airborne(&self) -> bool {
        self.action.is_airborne()
    }

    pub fn jump_accel(&self) -> u32 {
        self.jump_accel
    }

    /// Rightmost x the player may walk to
    pub fn right_limit(tuning: &Tuning) -> i32 {
        STAGE_WIDTH - STAGE_BOUNDARY - tuning.player_frame_width
    }

    /// Body hurtbox in world space
    pub fn hurtbox(&self) -> Rect {
        PLAYER_BODY.place(self.pos, self.flipped)
    }

    /// Attack box and score bonus for the current action
    pub fn strike(&self, tuning: &Tuning) -> Strike {
        let (hitbox, bonus): (HitBox, u32) = match self.action {
            PlayerAction::PunchCrouch => (PLAYER_PUNCH_CROUCH, tuning.punch_bonus),
            PlayerAction::KickStand => (PLAYER_KICK_STAND, tuning.punch_bonus),
            PlayerAction::KickCrouch => (PLAYER_KICK_CROUCH, tuning.punch_bonus),
            PlayerAction::KickHigh => (PLAYER_KICK_HIGH, tuning.high_kick_bonus),
            // Only the descent uses the air box; on the way up the standing punch applies
            PlayerAction::JumpDown => (PLAYER_AIR_ATTACK, tuning.air_attack_bonus),
            _ => (PLAYER_PUNCH_STAND, tuning.punch_bonus),
        };
        Strike {
            area: hitbox.place(self.pos, self.flipped),
            bonus,
        }
    }

    fn resolve_strike(&mut self, target: &Rect, tuning: &Tuning) -> StrikeOutcome {
        let strike = self.strike(tuning);
        if strike.area.overlaps(target) {
            self.show_hit = true;
            self.hit_effect_pos = strike.area.min;
            StrikeOutcome::Hit(strike)
        } else {
            StrikeOutcome::Miss(strike)
        }
    }

    fn begin_attack(&mut self, action: PlayerAction, target: &Rect, tuning: &Tuning) -> StrikeOutcome {
        self.controls_locked = true;
        self.can_attack = false;
        self.set_action(action);
        self.resolve_strike(target, tuning)
    }

    /// Process one frame of input against the enemy hurtbox `target`.
    ///
    /// The caller only invokes this during live play (both fighters standing,
    /// no hit-freeze, no enemy hit in progress). Attacks are resolved at
    /// activation; the returned outcome tells the caller what to apply.
    pub fn handle_input(
        &mut self,
        input: &TickInput,
        target: &Rect,
        tuning: &Tuning,
    ) -> Option<StrikeOutcome> {
        if self.is_airborne() {
            return self.try_flying_kick(input, target, tuning);
        }
        if self.controls_locked {
            return None;
        }

        let left = input.is_down(Keys::LEFT);
        let right = input.is_down(Keys::RIGHT);
        let down = input.is_down(Keys::DOWN);
        let right_limit = Self::right_limit(tuning);

        if self.pos.x > STAGE_BOUNDARY && left {
            self.set_action(PlayerAction::WalkLeft);
            self.pos.x -= PLAYER_SPEED;
        } else if self.pos.x < right_limit && right {
            self.set_action(PlayerAction::WalkRight);
            self.pos.x += PLAYER_SPEED;
        } else if right && self.pos.x >= right_limit {
            self.set_action(PlayerAction::IdleAtWall);
        } else {
            self.set_action(PlayerAction::Idle);
        }

        if down {
            self.set_action(PlayerAction::Crouch);
        }

        if input.is_down(Keys::UP) {
            self.drift = if left {
                JumpDrift::Left
            } else if right {
                JumpDrift::Right
            } else {
                JumpDrift::None
            };
            self.set_action(PlayerAction::JumpUp);
            self.controls_locked = true;
            self.jump_accel = JUMP_ACCEL;
        }

        let mut outcome = None;
        if input.is_down(Keys::PUNCH) && self.can_attack {
            let action = if down {
                PlayerAction::PunchCrouch
            } else {
                PlayerAction::PunchStand
            };
            outcome = Some(self.begin_attack(action, target, tuning));
        }
        if input.is_down(Keys::KICK) && self.can_attack && (left || right) {
            outcome = Some(self.begin_attack(PlayerAction::KickHigh, target, tuning));
        }
        if input.is_down(Keys::KICK) && self.can_attack {
            let action = if down {
                PlayerAction::KickCrouch
            } else {
                PlayerAction::KickStand
            };
            outcome = Some(self.begin_attack(action, target, tuning));
        }

        // Releasing an attack button starts the cooldown that re-arms attacks
        if input.was_released(Keys::PUNCH | Keys::KICK) && !self.cooldown_armed && !self.show_hit {
            self.cooldown_ticks = 0;
            self.cooldown_armed = true;
        }

        outcome
    }

    fn try_flying_kick(&mut self, input: &TickInput, target: &Rect, tuning: &Tuning) -> Option<StrikeOutcome> {
        let in_reach = self.pos.y <= JUMP_PEAK_Y + tuning.flying_kick_clearance;
        if !(input.is_down(Keys::KICK) && self.can_fly_kick && in_reach) {
            return None;
        }
        self.flying_kick = true;
        self.can_fly_kick = false;
        self.fly_kick_ticks = 0;
        Some(self.resolve_strike(target, tuning))
    }

    /// Clock-tick callback: stun release, flying-kick pose, attack cooldown.
    ///
    /// Lock timers are held while the enemy's hit on the player plays out.
    pub fn on_second(&mut self, down_held: bool, enemy_hit_window: bool) {
        if self.controls_locked && !enemy_hit_window {
            if !self.is_airborne() {
                self.stun_ticks += 1;
                if self.stun_ticks == STUN_TICKS {
                    self.controls_locked = false;
                    self.show_hit = false;
                    self.stun_ticks = 0;
                    self.cooldown_ticks = 0;
                    self.cooldown_armed = true;
                    if down_held && self.prev_action == PlayerAction::Crouch {
                        self.set_action(PlayerAction::Crouch);
                    } else {
                        self.set_action(PlayerAction::Idle);
                    }
                }
            } else if self.flying_kick {
                self.fly_kick_ticks += 1;
                if self.fly_kick_ticks == FLYING_KICK_TICKS {
                    self.flying_kick = false;
                    self.fly_kick_ticks = 0;
                }
            }
        }

        if self.cooldown_armed {
            self.cooldown_ticks += 1;
            if self.cooldown_ticks == ATTACK_COOLDOWN_TICKS {
                self.cooldown_ticks = 0;
                self.cooldown_armed = false;
                self.can_attack = true;
            }
        }
    }

    /// Start the attack cooldown after a freeze that interrupted a jump
    pub fn rearm_after_freeze(&mut self) {
        self.show_hit = false;
        self.cooldown_armed = true;
        self.cooldown_ticks = 0;
    }

    /// Per-frame jump integration. The caller skips it during any freeze.
    pub fn process_jump_step(&mut self, tuning: &Tuning) {
        if !self.is_airborne() || self.health == 0 {
            return;
        }

        self.jump_frames += 1;
        if self.jump_frames < TARGET_FPS / self.jump_accel.max(1) {
            return;
        }
        self.jump_frames = 0;

        match self.drift {
            JumpDrift::Left if self.pos.x > STAGE_BOUNDARY => self.pos.x -= JUMP_STEP,
            JumpDrift::Right if self.pos.x < Self::right_limit(tuning) => self.pos.x += JUMP_STEP,
            _ => {}
        }

        if self.action == PlayerAction::JumpUp {
            if self.pos.y > JUMP_PEAK_Y {
                self.jump_accel -= 1;
                self.pos.y -= JUMP_STEP;
            } else {
                self.set_action(PlayerAction::JumpDown);
            }
            return;
        }

        if self.pos.y < PLAYER_START.y {
            if self.jump_accel < JUMP_ACCEL {
                self.jump_accel += 1;
            }
            self.pos.y += JUMP_STEP;
            return;
        }

        self.pos.y = PLAYER_START.y;
        self.set_action(PlayerAction::Idle);
        self.controls_locked = false;
        self.flying_kick = false;
        self.can_fly_kick = true;
    }

    /// Struck by the enemy: start shaking around the current x, lose health
    pub fn take_hit(&mut self) -> u8 {
        self.anchor_x = self.pos.x;
        self.shake_right = true;
        self.shaking = true;
        self.health = self.health.saturating_sub(1);
        self.health
    }

    /// The enemy's hit finished playing: settle and drop stale movement poses
    pub fn recover_from_hit(&mut self, input: &TickInput) {
        self.pos.x = self.anchor_x;
        self.shaking = false;

        let stale = match self.action {
            PlayerAction::WalkRight => !input.is_down(Keys::RIGHT),
            PlayerAction::WalkLeft => !input.is_down(Keys::LEFT),
            PlayerAction::Crouch => !input.is_down(Keys::DOWN),
            _ => false,
        };
        if stale {
            self.set_action(PlayerAction::Idle);
        }
    }

    /// Per-frame shake displacement while struck
    pub fn apply_shake(&mut self) {
        if !self.shaking {
            return;
        }
        self.pos.x += if self.shake_right {
            PLAYER_SHAKE_FORCE
        } else {
            -PLAYER_SHAKE_FORCE
        };
        self.shake_right = !self.shake_right;
    }

    /// Lie down on the ground and restart the defeat animation
    pub fn lie_down(&mut self) {
        self.set_action(PlayerAction::Defeated);
        self.pos.y = PLAYER_START.y;
        self.defeat_anim.reset();
    }

    /// Advance the defeat animation while defeated
    pub fn advance_defeat(&mut self) -> Option<DefeatProgress> {
        if self.action != PlayerAction::Defeated || !self.defeat_anim.advance() {
            return None;
        }
        self.defeat_loops += 1;
        if self.defeat_loops == DEFEAT_LOOPS {
            self.set_action(PlayerAction::FullyDefeated);
            return Some(DefeatProgress::Finished);
        }
        Some(DefeatProgress::Twitch)
    }

    /// Per-frame animation stage: shake displacement, walk cycle, then the
    /// defeat loop. The walk cycle holds its frame while the player is struck.
    pub fn animate(&mut self, enemy_hit_window: bool) -> Option<DefeatProgress> {
        self.apply_shake();
        if matches!(self.action, PlayerAction::WalkLeft | PlayerAction::WalkRight) {
            self.walk_anim.paused = enemy_hit_window;
            self.walk_anim.advance();
        }
        self.advance_defeat()
    }

    /// Turn toward the enemy unless mid flying kick or `hold` is set
    pub fn face_enemy(&mut self, enemy_x: i32, hold: bool) {
        if self.flying_kick || hold {
            return;
        }
        let should_flip = enemy_x < self.pos.x;
        if should_flip != self.flipped {
            self.flipped = should_flip;
        }
    }

    /// Victory choreography beat
    pub fn pose(&mut self, action: PlayerAction, flip: bool) {
        if flip {
            self.flipped = !self.flipped;
        }
        self.set_action(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// A hurtbox far away from anything the player can reach
    fn far_target() -> Rect {
        Rect::new(IVec2::new(1000, 1000), IVec2::new(10, 10))
    }

    /// A hurtbox right in front of the default player
    fn near_target(player: &Player) -> Rect {
        Rect::new(IVec2::new(player.pos.x + 20, player.pos.y), IVec2::new(20, 40))
    }

    fn jump(player: &mut Player, tuning: &Tuning) {
        player.handle_input(&TickInput::holding(Keys::UP), &far_target(), tuning);
        assert_eq!(player.action, PlayerAction::JumpUp);
    }

    #[test]
    fn test_defeated_is_sticky() {
        let mut player = Player::new();
        player.set_action(PlayerAction::Defeated);
        player.set_action(PlayerAction::Idle);
        assert_eq!(player.action, PlayerAction::Defeated);

        player.set_action(PlayerAction::FullyDefeated);
        assert_eq!(player.action, PlayerAction::FullyDefeated);

        player.set_action(PlayerAction::Defeated);
        player.reset();
        assert_eq!(player.action, PlayerAction::Idle);
    }

    #[test]
    fn test_left_boundary_holds() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        player.pos.x = STAGE_BOUNDARY;

        player.handle_input(&TickInput::holding(Keys::LEFT), &far_target(), &tuning);
        assert_eq!(player.pos.x, STAGE_BOUNDARY);
        assert_eq!(player.action, PlayerAction::Idle);
    }

    #[test]
    fn test_right_boundary_selects_wall_pose() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        let limit = Player::right_limit(&tuning);
        player.pos.x = limit - 1;

        player.handle_input(&TickInput::holding(Keys::RIGHT), &far_target(), &tuning);
        assert_eq!(player.pos.x, limit);
        assert_eq!(player.action, PlayerAction::WalkRight);

        player.handle_input(&TickInput::holding(Keys::RIGHT), &far_target(), &tuning);
        assert_eq!(player.pos.x, limit);
        assert_eq!(player.action, PlayerAction::IdleAtWall);
    }

    #[test]
    fn test_down_overrides_walk() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        player.handle_input(&TickInput::holding(Keys::RIGHT | Keys::DOWN), &far_target(), &tuning);
        assert_eq!(player.action, PlayerAction::Crouch);
        assert_eq!(player.pos.x, PLAYER_START.x + 1);
    }

    #[test]
    fn test_attack_locks_and_resolves_immediately() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        let target = near_target(&player);

        let outcome = player.handle_input(&TickInput::holding(Keys::PUNCH), &target, &tuning);
        assert!(matches!(outcome, Some(StrikeOutcome::Hit(s)) if s.bonus == tuning.punch_bonus));
        assert!(player.controls_locked);
        assert!(!player.can_attack);
        assert!(player.show_hit);
        assert_eq!(player.action, PlayerAction::PunchStand);

        // Locked: further input is ignored
        let outcome = player.handle_input(&TickInput::holding(Keys::KICK), &target, &tuning);
        assert!(outcome.is_none());
        assert_eq!(player.action, PlayerAction::PunchStand);
    }

    #[test]
    fn test_high_kick_when_moving() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        let outcome = player.handle_input(&TickInput::holding(Keys::KICK | Keys::RIGHT), &far_target(), &tuning);
        assert!(matches!(outcome, Some(StrikeOutcome::Miss(s)) if s.bonus == tuning.high_kick_bonus));
        assert_eq!(player.action, PlayerAction::KickHigh);
        assert!(!player.show_hit);
    }

    #[test]
    fn test_stun_releases_after_three_ticks_then_cooldown() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        player.handle_input(&TickInput::holding(Keys::DOWN | Keys::PUNCH), &far_target(), &tuning);
        assert_eq!(player.action, PlayerAction::PunchCrouch);
        assert_eq!(player.prev_action, PlayerAction::Crouch);

        player.on_second(true, false);
        player.on_second(true, false);
        assert!(player.controls_locked);
        player.on_second(true, false);
        assert!(!player.controls_locked);
        assert_eq!(player.action, PlayerAction::Crouch);
        // Cooldown arms on release and counts its first tick immediately
        assert!(!player.can_attack);

        player.on_second(true, false);
        assert!(player.can_attack);
    }

    #[test]
    fn test_stun_holds_during_enemy_hit() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        player.handle_input(&TickInput::holding(Keys::PUNCH), &far_target(), &tuning);
        for _ in 0..10 {
            player.on_second(false, true);
        }
        assert!(player.controls_locked);
        for _ in 0..3 {
            player.on_second(false, false);
        }
        assert!(!player.controls_locked);
        assert_eq!(player.action, PlayerAction::Idle);
    }

    #[test]
    fn test_release_arms_cooldown() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        player.can_attack = false;
        let input = TickInput::default().releasing(Keys::KICK);
        player.handle_input(&input, &far_target(), &tuning);
        player.on_second(false, false);
        player.on_second(false, false);
        assert!(player.can_attack);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        jump(&mut player, &tuning);

        let mut peak = player.pos.y;
        for _ in 0..1000 {
            player.process_jump_step(&tuning);
            peak = peak.min(player.pos.y);
            if !player.is_airborne() {
                break;
            }
        }
        assert_eq!(peak, JUMP_PEAK_Y);
        assert_eq!(player.pos.y, PLAYER_START.y);
        assert_eq!(player.action, PlayerAction::Idle);
        assert!(!player.controls_locked);
        assert_eq!(player.jump_accel(), JUMP_ACCEL);
    }

    #[test]
    fn test_jump_drift_moves_toward_held_key() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        player.handle_input(&TickInput::holding(Keys::UP | Keys::RIGHT), &far_target(), &tuning);
        assert_eq!(player.drift, JumpDrift::Right);
        let start_x = player.pos.x;
        while player.is_airborne() {
            player.process_jump_step(&tuning);
        }
        assert!(player.pos.x > start_x);
    }

    #[test]
    fn test_flying_kick_once_per_jump() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        jump(&mut player, &tuning);

        // Too low to fly-kick right after take-off
        let kick = TickInput::holding(Keys::KICK);
        assert!(player.handle_input(&kick, &far_target(), &tuning).is_none());

        while player.pos.y > JUMP_PEAK_Y + tuning.flying_kick_clearance {
            player.process_jump_step(&tuning);
        }
        let outcome = player.handle_input(&kick, &far_target(), &tuning);
        assert!(outcome.is_some());
        assert!(player.flying_kick);
        assert!(player.handle_input(&kick, &far_target(), &tuning).is_none());

        while player.is_airborne() {
            player.process_jump_step(&tuning);
        }
        assert!(!player.flying_kick);

        jump(&mut player, &tuning);
        while player.pos.y > JUMP_PEAK_Y + tuning.flying_kick_clearance {
            player.process_jump_step(&tuning);
        }
        assert!(player.handle_input(&kick, &far_target(), &tuning).is_some());
    }

    #[test]
    fn test_flying_kick_box_depends_on_jump_direction() {
        let tuning = Tuning::default();
        let kick = TickInput::holding(Keys::KICK);

        // Still rising: standing-punch box and bonus
        let mut rising = Player::new();
        jump(&mut rising, &tuning);
        while rising.pos.y > JUMP_PEAK_Y + tuning.flying_kick_clearance {
            rising.process_jump_step(&tuning);
        }
        assert_eq!(rising.action, PlayerAction::JumpUp);
        let expected = Strike {
            area: PLAYER_PUNCH_STAND.place(rising.pos, rising.flipped),
            bonus: tuning.punch_bonus,
        };
        assert_eq!(
            rising.handle_input(&kick, &far_target(), &tuning),
            Some(StrikeOutcome::Miss(expected))
        );

        // Falling: air-attack box and bonus
        let mut falling = Player::new();
        jump(&mut falling, &tuning);
        while falling.action == PlayerAction::JumpUp {
            falling.process_jump_step(&tuning);
        }
        assert_eq!(falling.action, PlayerAction::JumpDown);
        let expected = Strike {
            area: PLAYER_AIR_ATTACK.place(falling.pos, falling.flipped),
            bonus: tuning.air_attack_bonus,
        };
        assert_eq!(
            falling.handle_input(&kick, &far_target(), &tuning),
            Some(StrikeOutcome::Miss(expected))
        );
    }

    #[test]
    fn test_flying_kick_pose_ends_after_two_ticks() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        jump(&mut player, &tuning);
        while player.pos.y > JUMP_PEAK_Y {
            player.process_jump_step(&tuning);
        }
        player.handle_input(&TickInput::holding(Keys::KICK), &far_target(), &tuning);
        assert!(player.flying_kick);
        player.on_second(false, false);
        assert!(player.flying_kick);
        player.on_second(false, false);
        assert!(!player.flying_kick);
    }

    #[test]
    fn test_take_hit_shakes_and_recovers() {
        let mut player = Player::new();
        player.set_action(PlayerAction::WalkRight);
        assert_eq!(player.take_hit(), DEFAULT_HEALTH - 1);

        player.apply_shake();
        assert_eq!(player.pos.x, PLAYER_START.x + PLAYER_SHAKE_FORCE);
        player.apply_shake();
        assert_eq!(player.pos.x, PLAYER_START.x);
        player.apply_shake();

        player.recover_from_hit(&TickInput::default());
        assert_eq!(player.pos.x, PLAYER_START.x);
        assert!(!player.shaking);
        assert_eq!(player.action, PlayerAction::Idle);
    }

    #[test]
    fn test_walk_cycle_runs_only_while_walking() {
        let tuning = Tuning::default();
        let mut player = Player::new();
        let period = TARGET_FPS / PLAYER_ANIM_RATE;

        for _ in 0..period {
            player.animate(false);
        }
        assert_eq!(player.walk_anim.frame(), 0);

        player.handle_input(&TickInput::holding(Keys::RIGHT), &far_target(), &tuning);
        for _ in 0..period {
            player.animate(false);
        }
        assert_eq!(player.walk_anim.frame(), 1);

        // Struck mid-stride: the frame holds
        for _ in 0..(3 * period) {
            player.animate(true);
        }
        assert_eq!(player.walk_anim.frame(), 1);

        for _ in 0..period {
            player.animate(false);
        }
        assert_eq!(player.walk_anim.frame(), 0);
    }

    #[test]
    fn test_defeat_loops_finish_on_third() {
        let mut player = Player::new();
        player.health = 0;
        player.lie_down();

        let mut progress = Vec::new();
        for _ in 0..(3 * player.defeat_anim.loop_frames()) {
            if let Some(p) = player.advance_defeat() {
                progress.push(p);
            }
        }
        assert_eq!(
            progress,
            vec![DefeatProgress::Twitch, DefeatProgress::Twitch, DefeatProgress::Finished]
        );
        assert_eq!(player.action, PlayerAction::FullyDefeated);
        assert!(player.advance_defeat().is_none());
    }

    #[test]
    fn test_faces_enemy_unless_held() {
        let mut player = Player::new();
        player.face_enemy(0, false);
        assert!(player.flipped);
        player.face_enemy(200, true);
        assert!(player.flipped);
        player.face_enemy(200, false);
        assert!(!player.flipped);
    }

    proptest! {
        #[test]
        fn prop_jump_accel_monotonic_and_capped(drift in 0u8..3, start_x in 10i32..214) {
            let tuning = Tuning::default();
            let mut player = Player::new();
            player.pos.x = start_x;
            let keys = match drift {
                0 => Keys::UP,
                1 => Keys::UP | Keys::LEFT,
                _ => Keys::UP | Keys::RIGHT,
            };
            player.handle_input(&TickInput::holding(keys), &far_target(), &tuning);
            prop_assert!(player.is_airborne());

            let mut last = player.jump_accel();
            let mut descending = false;
            for _ in 0..2000 {
                if !player.is_airborne() {
                    break;
                }
                player.process_jump_step(&tuning);
                let accel = player.jump_accel();
                if player.action == PlayerAction::JumpDown {
                    descending = true;
                }
                if descending {
                    prop_assert!(accel >= last);
                } else {
                    prop_assert!(accel <= last);
                }
                prop_assert!(accel <= JUMP_ACCEL);
                prop_assert!(player.pos.x >= STAGE_BOUNDARY - JUMP_STEP);
                last = accel;
            }
            prop_assert!(!player.is_airborne());
            prop_assert_eq!(player.pos.y, PLAYER_START.y);
        }
    }
}
