//! Kung-Fu Arcade - deterministic simulation core of a side-view fighter
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (player, enemy AI, hitboxes, round sequencers)
//! - `platform`: Input snapshot plumbing and the demo autopilot
//! - `persistence`: Save/load of the session record
//! - `audio`: Sound/music dispatch to a pluggable backend
//! - `tuning`: Data-driven gameplay constants
//! - `settings`: Application preferences

pub mod audio;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use glam::IVec2;

    /// Rendered frames per real second
    pub const TARGET_FPS: u32 = 60;
    /// Logical seconds per real second (clock cadence and default animation rate)
    pub const LOGIC_RATE: u32 = 5;

    /// Playfield dimensions
    pub const STAGE_WIDTH: i32 = 256;
    pub const STAGE_HEIGHT: i32 = 256;
    /// Horizontal padding from both stage edges
    pub const STAGE_BOUNDARY: i32 = 10;

    /// Starting health for both fighters
    pub const DEFAULT_HEALTH: u8 = 9;
    /// Health at which the warning sound plays
    pub const LOW_HEALTH: u8 = 4;
    /// Levels are 1-based; one enemy archetype per level
    pub const FIRST_LEVEL: u8 = 1;
    pub const FINAL_LEVEL: u8 = 5;

    /// Player defaults
    pub const PLAYER_START: IVec2 = IVec2::new(35, 160);
    pub const PLAYER_SPEED: i32 = 1;
    pub const PLAYER_LIVES: u8 = 2;
    pub const PLAYER_SHAKE_FORCE: i32 = 2;

    /// Jump arc: peak Y, pixels per step, starting (and maximum) acceleration
    pub const JUMP_PEAK_Y: i32 = 114;
    pub const JUMP_STEP: i32 = 2;
    pub const JUMP_ACCEL: u32 = 53;

    /// Player timers, in clock ticks
    pub const ATTACK_COOLDOWN_TICKS: u32 = 2;
    pub const STUN_TICKS: u32 = 3;
    pub const FLYING_KICK_TICKS: u32 = 2;
    /// Defeat animation loops before the defeat sequence may continue
    pub const DEFEAT_LOOPS: u32 = 3;

    /// Enemy defaults
    pub const ENEMY_START: IVec2 = IVec2::new(145, 152);
    pub const ENEMY_WALK_SPEED: i32 = 1;
    /// Enemy AI steps per real second
    pub const ENEMY_AI_RATE: u32 = 21;

    /// Spinning chain (level 3) offset from the enemy origin, and flip shift
    pub const CHAIN_OFFSET: IVec2 = IVec2::new(-10, 1);
    pub const CHAIN_FLIP_SHIFT: i32 = 17;
    pub const CHAIN_LEVEL: u8 = 3;

    /// Animation rates (frame advances per real second)
    pub const DEFAULT_ANIM_RATE: u32 = LOGIC_RATE;
    pub const PLAYER_ANIM_RATE: u32 = 12;
    pub const ENEMY_WALK_ANIM_RATE: u32 = 3;
    pub const ENEMY_RUN_ANIM_RATE: u32 = 5;
    pub const CHAIN_ANIM_RATE: u32 = 6;

    /// Round timers, in clock ticks
    pub const HIT_FREEZE_TICKS: u32 = 2;
    pub const ENEMY_HIT_TICKS: u32 = 4;
    pub const HALT_LONG: u32 = 2;
    pub const HALT_SHORT: u32 = 1;

    /// Phase screens
    pub const PREVIEW_SECONDS: u32 = 10;
    pub const INTRO_BLINKS: u32 = 4;
}
