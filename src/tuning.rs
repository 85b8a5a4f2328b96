//! Gameplay tuning data
//!
//! Values that shape how a fight feels but are not part of the frame timing.
//! Loaded from an optional JSON file; any missing field keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{STAGE_BOUNDARY, STAGE_WIDTH};
use crate::settings::ConfigError;

/// Simulation tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Width of a fighter sprite frame
    pub player_frame_width: i32,
    /// Extra reach added to the frame width before the enemy engages
    pub engagement_padding: i32,
    /// How far below the jump peak a flying kick may still start
    pub flying_kick_clearance: i32,
    /// Run steps the enemy takes before resuming pursuit
    pub retreat_distance: u32,
    /// Distance from the stage edges the retreat never crosses
    pub enemy_run_boundary: i32,
    /// Pixels per retreat step
    pub enemy_run_step: i32,

    // === Score ===
    pub punch_bonus: u32,
    pub high_kick_bonus: u32,
    pub air_attack_bonus: u32,
    /// Awarded per remaining health point after a win
    pub count_bonus: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_frame_width: 32,
            engagement_padding: 10,
            flying_kick_clearance: 23,
            retreat_distance: 10,
            enemy_run_boundary: 30,
            enemy_run_step: 5,

            punch_bonus: 100,
            high_kick_bonus: 200,
            air_attack_bonus: 250,
            count_bonus: 100,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall the AI or break the stage layout
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_frame_width <= 0 {
            return Err(ConfigError::Invalid("player_frame_width must be positive"));
        }
        if self.enemy_run_step <= 0 {
            return Err(ConfigError::Invalid("enemy_run_step must be positive"));
        }
        if self.retreat_distance == 0 {
            return Err(ConfigError::Invalid("retreat_distance must be positive"));
        }
        let (left, right) = self.enemy_run_limits();
        if left >= right {
            return Err(ConfigError::Invalid("enemy_run_boundary leaves no room to retreat"));
        }
        Ok(())
    }

    /// Leftmost and rightmost x the retreating enemy may run to
    pub fn enemy_run_limits(&self) -> (i32, i32) {
        let edge = STAGE_BOUNDARY + self.enemy_run_boundary;
        (edge, STAGE_WIDTH - edge - self.player_frame_width)
    }

    /// Load from `path`, falling back to defaults with a warning
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path)
            .map_err(ConfigError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}): {e}", path.display());
                Self::default()
            }
        }
    }
}
