//! Game state and core simulation types
//!
//! Everything the frame driver mutates lives in one owned `GameState`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::enemy::Enemy;
use super::phase::{IntroScreen, PreviewScreen};
use super::player::Player;
use super::sequence::{DefeatSequence, VictorySequence};
use crate::Tuning;
use crate::audio::SoundEffect;
use crate::consts::*;

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen
    #[default]
    Intro,
    /// "Stage N" card before a round
    Preview,
    /// Active fight
    Play,
}

impl GamePhase {
    /// Code stored in the save record
    pub fn code(self) -> i32 {
        match self {
            GamePhase::Intro => 0,
            GamePhase::Preview => 1,
            GamePhase::Play => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(GamePhase::Intro),
            1 => Some(GamePhase::Preview),
            2 => Some(GamePhase::Play),
            _ => None,
        }
    }
}

/// Progress that outlives a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub phase: GamePhase,
    /// 1-based; selects the enemy archetype
    pub level: u8,
    pub score: u32,
    pub lives: u8,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: GamePhase::Intro,
            level: FIRST_LEVEL,
            score: 0,
            lives: PLAYER_LIVES,
        }
    }
}

/// Side effects requested by the simulation, drained by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundEffect),
    MusicStart,
    MusicStop,
    PhaseChanged(GamePhase),
}

/// Per-round transient state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Round {
    /// Round init has run for the current Play phase
    pub initialized: bool,
    pub clock: Clock,
    /// Player landed a hit; everything holds until it resolves
    pub hit_freeze: bool,
    freeze_ticks: u32,
    /// Enemy landed a hit; the player is shaking
    pub enemy_hit_window: bool,
    enemy_hit_ticks: u32,
    pub victory: VictorySequence,
    pub defeat: DefeatSequence,
}

impl Round {
    pub fn start_freeze(&mut self) {
        self.hit_freeze = true;
        self.freeze_ticks = 0;
    }

    /// Clock tick while frozen; true when the freeze just ended
    pub fn freeze_elapsed(&mut self) -> bool {
        if !self.hit_freeze {
            return false;
        }
        self.freeze_ticks += 1;
        if self.freeze_ticks < HIT_FREEZE_TICKS {
            return false;
        }
        self.freeze_ticks = 0;
        self.hit_freeze = false;
        true
    }

    pub fn open_hit_window(&mut self) {
        self.enemy_hit_window = true;
        self.enemy_hit_ticks = 0;
    }

    /// Clock tick during the enemy's hit; true when the window just closed
    pub fn hit_window_elapsed(&mut self) -> bool {
        if !self.enemy_hit_window {
            return false;
        }
        self.enemy_hit_ticks += 1;
        if self.enemy_hit_ticks < ENEMY_HIT_TICKS {
            return false;
        }
        self.enemy_hit_ticks = 0;
        self.enemy_hit_window = false;
        true
    }

    /// Either sequencer reached its terminal step
    pub fn is_game_over(&self) -> bool {
        self.victory.is_game_over() || self.defeat.is_game_over()
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub session: Session,
    /// Simulation frame counter
    pub frame: u64,
    pub intro: IntroScreen,
    pub preview: PreviewScreen,
    pub round: Round,
    pub player: Player,
    pub enemy: Enemy,
    /// Requests produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let session = Session::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            enemy: Enemy::new(session.level),
            session,
            frame: 0,
            intro: IntroScreen::default(),
            preview: PreviewScreen::default(),
            round: Round::default(),
            player: Player::new(),
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn play(&mut self, sound: SoundEffect) {
        self.emit(GameEvent::Sound(sound));
    }

    /// Take every event produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.session.phase == phase {
            return;
        }
        log::info!(
            "Phase {:?} -> {:?} (level {}, score {})",
            self.session.phase,
            phase,
            self.session.level,
            self.session.score
        );
        self.session.phase = phase;
        self.emit(GameEvent::PhaseChanged(phase));
    }

    /// Fresh fighters and timers for the current level. Lives and score stay.
    pub fn reset_round(&mut self) {
        self.player.reset();
        self.enemy.reset(self.session.level);
        self.round = Round::default();
        self.preview = PreviewScreen::default();
    }

    /// Restore a saved session: phase, level and score
    pub fn restore_session(&mut self, phase: GamePhase, level: u8, score: u32) {
        self.session.level = level;
        self.session.score = score;
        self.session.phase = phase;
        self.reset_round();
        log::info!("Restored session: {phase:?}, level {level}, score {score}");
    }

    /// Game-over restart back to the title screen
    pub fn restart(&mut self) {
        self.session.score = 0;
        self.session.level = FIRST_LEVEL;
        self.session.lives = PLAYER_LIVES;
        self.reset_round();
        self.intro.reset();
        self.intro.can_proceed = false;
        self.set_phase(GamePhase::Intro);
    }
}
