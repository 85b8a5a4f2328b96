//! Audio dispatch
//!
//! The simulation only requests sounds by emitting `GameEvent`s. The manager
//! checks the asset table once at start-up, applies volume and mute, and
//! forwards playback to whatever backend the platform provides.

use thiserror::Error;

use crate::sim::{GameEvent, GamePhase};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player swing that missed
    Attack,
    /// Player hit the enemy
    Collision,
    /// Enemy hit the player
    EnemyImpact,
    /// Someone went down
    Defeated,
    /// Round won
    Win,
    /// Remaining health converted to score
    Counting,
    /// Player health dropped to the warning level
    HealthLow,
    /// Defeat animation loop
    TwitchFeet,
    GameOver,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 9] = [
        SoundEffect::Attack,
        SoundEffect::Collision,
        SoundEffect::EnemyImpact,
        SoundEffect::Defeated,
        SoundEffect::Win,
        SoundEffect::Counting,
        SoundEffect::HealthLow,
        SoundEffect::TwitchFeet,
        SoundEffect::GameOver,
    ];

    /// Asset name
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Attack => "attack",
            SoundEffect::Collision => "collision",
            SoundEffect::EnemyImpact => "collision2",
            SoundEffect::Defeated => "defeated",
            SoundEffect::Win => "win",
            SoundEffect::Counting => "counting",
            SoundEffect::HealthLow => "health_low",
            SoundEffect::TwitchFeet => "twitch_feet",
            SoundEffect::GameOver => "game_over",
        }
    }
}

/// Background track asset name
pub const MAIN_MUSIC: &str = "main_music";

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("missing audio asset: {0}")]
    MissingAsset(&'static str),
}

/// Platform playback
pub trait AudioBackend {
    fn play_sound(&mut self, name: &str, volume: f32);
    fn play_music(&mut self, name: &str, volume: f32);
    fn stop_music(&mut self, name: &str);
}

/// Backend that only logs what it would play
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_sound(&mut self, name: &str, volume: f32) {
        log::debug!("sound {name} @ {volume:.2}");
    }

    fn play_music(&mut self, name: &str, volume: f32) {
        log::debug!("music {name} @ {volume:.2}");
    }

    fn stop_music(&mut self, name: &str) {
        log::debug!("music {name} stopped");
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    /// Fails if any sound the game can request is missing from `assets`
    pub fn new<'a>(backend: B, assets: impl IntoIterator<Item = &'a str>) -> Result<Self, AudioError> {
        let assets: Vec<&str> = assets.into_iter().collect();
        for effect in SoundEffect::ALL {
            if !assets.contains(&effect.name()) {
                return Err(AudioError::MissingAsset(effect.name()));
            }
        }
        if !assets.contains(&MAIN_MUSIC) {
            return Err(AudioError::MissingAsset(MAIN_MUSIC));
        }
        Ok(Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        })
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        self.backend.play_sound(effect.name(), vol);
    }

    /// Forward one simulation event
    pub fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Sound(effect) => self.play(*effect),
            GameEvent::MusicStart => {
                let vol = self.effective_volume(self.music_volume);
                self.backend.play_music(MAIN_MUSIC, vol);
            }
            GameEvent::MusicStop => self.backend.stop_music(MAIN_MUSIC),
            GameEvent::PhaseChanged(GamePhase::Intro) => self.backend.stop_music(MAIN_MUSIC),
            GameEvent::PhaseChanged(_) => {}
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
