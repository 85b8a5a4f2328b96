//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call per rendered frame)
//! - Seeded RNG only
//! - All waiting is counters compared against thresholds
//! - No rendering or platform dependencies

pub mod anim;
pub mod clock;
pub mod enemy;
pub mod hitbox;
pub mod phase;
pub mod player;
pub mod sequence;
pub mod state;
pub mod tick;

pub use anim::AnimationClock;
pub use clock::{Clock, ClockTick};
pub use enemy::{Enemy, EnemyAction, EnemyAttack, MoveState, SpinningChain};
pub use hitbox::{Archetype, EnemyProfile, HitBox, Rect, enemy_profile};
pub use phase::{IntroScreen, PreviewScreen};
pub use player::{JumpDrift, Player, PlayerAction, Strike, StrikeOutcome};
pub use sequence::{DefeatSequence, DefeatStep, VictorySequence, VictoryStep};
pub use state::{GameEvent, GamePhase, GameState, Round, Session};
pub use tick::{Keys, TickInput, tick};
