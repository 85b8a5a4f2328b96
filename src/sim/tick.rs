//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically, one rendered
//! frame per call.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyAction;
use super::phase::IntroSignal;
use super::player::{DefeatProgress, StrikeOutcome};
use super::sequence::{DefeatBeat, VictoryBeat};
use super::state::{GameEvent, GamePhase, GameState};
use crate::audio::SoundEffect;
use crate::consts::*;

bitflags! {
    /// Keys the game reads
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Keys: u8 {
        const LEFT    = 1 << 0;
        const RIGHT   = 1 << 1;
        const UP      = 1 << 2;
        const DOWN    = 1 << 3;
        const PUNCH   = 1 << 4;
        const KICK    = 1 << 5;
        const CONFIRM = 1 << 6;
        const QUIT    = 1 << 7;
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Keys held this frame
    pub held: Keys,
    /// Keys that went up since the previous frame
    pub released: Keys,
}

impl TickInput {
    pub fn holding(held: Keys) -> Self {
        Self {
            held,
            released: Keys::empty(),
        }
    }

    pub fn releasing(mut self, released: Keys) -> Self {
        self.released |= released;
        self
    }

    /// Every key in `keys` is held
    pub fn is_down(&self, keys: Keys) -> bool {
        self.held.contains(keys)
    }

    /// Any key in `keys` went up this frame
    pub fn was_released(&self, keys: Keys) -> bool {
        self.released.intersects(keys)
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.frame += 1;
    match state.session.phase {
        GamePhase::Intro => tick_intro(state, input),
        GamePhase::Preview => tick_preview(state),
        GamePhase::Play => tick_play(state, input),
    }
}

fn tick_intro(state: &mut GameState, input: &TickInput) {
    let signal = state
        .intro
        .update(input.is_down(Keys::CONFIRM), input.was_released(Keys::CONFIRM));
    match signal {
        Some(IntroSignal::Started) => state.emit(GameEvent::MusicStart),
        Some(IntroSignal::Done) => {
            state.reset_round();
            state.set_phase(GamePhase::Preview);
        }
        None => {}
    }
}

fn tick_preview(state: &mut GameState) {
    if state.preview.update() {
        state.set_phase(GamePhase::Play);
    }
}

fn tick_play(state: &mut GameState, input: &TickInput) {
    if !state.round.initialized {
        state.reset_round();
        state.round.initialized = true;
    }

    // Input
    let both_standing = state.player.health > 0 && state.enemy.health > 0;
    let frozen = state.round.hit_freeze || state.round.enemy_hit_window;
    if both_standing && !frozen {
        let target = state.enemy.hurtbox();
        if let Some(outcome) = state.player.handle_input(input, &target, &state.tuning) {
            resolve_player_strike(state, outcome);
        }
    }
    if state.round.is_game_over() && input.is_down(Keys::CONFIRM) {
        state.restart();
        return;
    }

    // Physics
    if !state.round.hit_freeze && !state.round.enemy_hit_window {
        state.player.process_jump_step(&state.tuning);
    }

    // Timers
    if state.round.clock.tick().is_some() {
        on_round_second(state, input);
        if state.session.phase != GamePhase::Play {
            return;
        }
    }
    if !state.round.hit_freeze && state.player.clock.tick().is_some() {
        state
            .player
            .on_second(input.is_down(Keys::DOWN), state.round.enemy_hit_window);
    }
    if !state.player.show_hit && state.player.health > 0 && state.enemy.health > 0 {
        state
            .enemy
            .tick_ai(state.player.pos.x, &mut state.rng, &state.tuning);
    }

    animate(state);
}

fn resolve_player_strike(state: &mut GameState, outcome: StrikeOutcome) {
    match outcome {
        StrikeOutcome::Hit(strike) => {
            log::debug!("player {:?} hit for {}", state.player.action, strike.bonus);
            state.session.score += strike.bonus;
            state.round.start_freeze();
            state.play(SoundEffect::Collision);
        }
        StrikeOutcome::Miss(_) => state.play(SoundEffect::Attack),
    }
}

/// Round timers, in fixed order: hit-freeze, victory, defeat, enemy hit
fn on_round_second(state: &mut GameState, input: &TickInput) {
    if state.round.freeze_elapsed() {
        if state.player.is_airborne() {
            state.player.rearm_after_freeze();
        }
        state.enemy.health = state.enemy.health.saturating_sub(1);
        if state.enemy.health == 0 {
            state.emit(GameEvent::MusicStop);
        } else {
            state.enemy.start_retreat();
        }
    }

    if state.enemy.health == 0 {
        let final_level = state.session.level == FINAL_LEVEL;
        if let Some(beat) = state.round.victory.on_second(state.player.health, final_level) {
            apply_victory_beat(state, beat);
            if state.session.phase != GamePhase::Play {
                return;
            }
        }
    }

    if state.enemy.health != 0 && state.player.health == 0 {
        if let Some(beat) = state.round.defeat.on_second(state.session.lives) {
            apply_defeat_beat(state, beat);
            if state.session.phase != GamePhase::Play {
                return;
            }
        }
    }

    if state.round.hit_window_elapsed() {
        state.enemy.reset_move();
        state.player.recover_from_hit(input);
        if state.player.health == 0 {
            state.enemy.action = EnemyAction::Pause;
        }
    }
}

fn apply_victory_beat(state: &mut GameState, beat: VictoryBeat) {
    match beat {
        VictoryBeat::EnemyDown => {
            state.enemy.action = EnemyAction::Defeated;
            state.play(SoundEffect::Defeated);
        }
        VictoryBeat::WinJingle => state.play(SoundEffect::Win),
        VictoryBeat::Pose {
            action,
            flip,
            sound,
        } => {
            state.player.pose(action, flip);
            if sound {
                state.play(SoundEffect::Attack);
            }
        }
        VictoryBeat::CountLife => {
            state.player.health = state.player.health.saturating_sub(1);
            state.session.score += state.tuning.count_bonus;
            state.play(SoundEffect::Counting);
        }
        VictoryBeat::Advance => {
            state.session.level += 1;
            log::info!("Level {} cleared", state.session.level - 1);
            state.reset_round();
            state.set_phase(GamePhase::Preview);
            state.emit(GameEvent::MusicStart);
        }
        VictoryBeat::GameOver => {
            log::info!("All levels cleared, final score {}", state.session.score);
            state.play(SoundEffect::GameOver);
        }
    }
}

fn apply_defeat_beat(state: &mut GameState, beat: DefeatBeat) {
    match beat {
        DefeatBeat::Collapse => {
            state.enemy.action = EnemyAction::Pause;
            state.emit(GameEvent::MusicStop);
            state.player.defeat_loops = 0;
        }
        DefeatBeat::LieDown => {
            state.player.lie_down();
            state.play(SoundEffect::Defeated);
        }
        DefeatBeat::Retry => {
            state.session.lives -= 1;
            log::info!("Player down, {} lives left", state.session.lives);
            state.reset_round();
            state.set_phase(GamePhase::Preview);
            state.emit(GameEvent::MusicStart);
        }
        DefeatBeat::GameOver => {
            log::info!("Game over, final score {}", state.session.score);
            state.play(SoundEffect::GameOver);
        }
    }
}

/// Animation stage: enemy attack resolution, shake, defeat loops, facing
fn animate(state: &mut GameState) {
    if state.enemy.animate(state.player.show_hit).is_some() {
        resolve_enemy_strike(state);
    }

    if let Some(progress) = state.player.animate(state.round.enemy_hit_window) {
        state.play(SoundEffect::TwitchFeet);
        if progress == DefeatProgress::Finished {
            state.round.defeat.feet_stopped();
        }
    }

    let player_x = state.player.pos.x;
    state.enemy.face_player(player_x);
    let enemy_x = state.enemy.pos.x;
    state.player.face_enemy(enemy_x, state.round.victory.started());
}

fn resolve_enemy_strike(state: &mut GameState) {
    let hurtbox = state.player.hurtbox();
    let hit = state
        .enemy
        .attack_box()
        .is_some_and(|area| area.overlaps(&hurtbox));
    if !hit {
        state.enemy.reset_move();
        return;
    }
    if state.player.health == 0 {
        return;
    }

    state.enemy.land_hit();
    state.round.open_hit_window();
    state.play(SoundEffect::EnemyImpact);
    if state.player.take_hit() == LOW_HEALTH {
        state.play(SoundEffect::HealthLow);
    }
}
