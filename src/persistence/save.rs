//! Session record: three native-endian `i32` values {phase, level, score}

use std::path::Path;

use bytemuck::{Pod, Zeroable};
use thiserror::Error;

use crate::consts::{FINAL_LEVEL, FIRST_LEVEL};
use crate::sim::{GamePhase, GameState};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save io: {0}")]
    Io(#[from] std::io::Error),
    #[error("save record is {0} bytes, expected {expected}", expected = SaveRecord::SIZE)]
    Truncated(usize),
    #[error("save field {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i32 },
    #[error("score {0} does not fit the save record")]
    ScoreOverflow(u32),
}

/// On-disk layout
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct SaveRecord {
    pub phase: i32,
    pub level: i32,
    pub score: i32,
}

impl SaveRecord {
    pub const SIZE: usize = std::mem::size_of::<SaveRecord>();

    pub fn from_state(state: &GameState) -> Result<Self, SaveError> {
        let score = state.session.score;
        Ok(Self {
            phase: state.session.phase.code(),
            level: i32::from(state.session.level),
            score: i32::try_from(score).map_err(|_| SaveError::ScoreOverflow(score))?,
        })
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes.copy_from_slice(bytemuck::bytes_of(self));
        bytes
    }

    /// Decode a record; anything shorter than a full record is rejected
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SaveError> {
        let head = bytes
            .get(..Self::SIZE)
            .ok_or(SaveError::Truncated(bytes.len()))?;
        Ok(bytemuck::pod_read_unaligned(head))
    }

    /// Checked field values: (phase, level, score)
    pub fn validate(&self) -> Result<(GamePhase, u8, u32), SaveError> {
        let phase = GamePhase::from_code(self.phase).ok_or(SaveError::OutOfRange {
            field: "phase",
            value: self.phase,
        })?;
        let level = u8::try_from(self.level)
            .ok()
            .filter(|l| (FIRST_LEVEL..=FINAL_LEVEL).contains(l))
            .ok_or(SaveError::OutOfRange {
                field: "level",
                value: self.level,
            })?;
        let score = u32::try_from(self.score).map_err(|_| SaveError::OutOfRange {
            field: "score",
            value: self.score,
        })?;
        Ok((phase, level, score))
    }
}

/// Write the session to `path`. Nothing is written if the session does not fit.
pub fn save_session(state: &GameState, path: &Path) -> Result<(), SaveError> {
    let record = SaveRecord::from_state(state)?;
    std::fs::write(path, record.to_bytes())?;
    log::info!("Game saved (level {}, score {})", record.level, record.score);
    Ok(())
}

/// Restore the session from `path`. Any failure leaves `state` untouched.
pub fn load_session(state: &mut GameState, path: &Path) -> Result<(), SaveError> {
    let bytes = std::fs::read(path)?;
    let (phase, level, score) = SaveRecord::from_bytes(&bytes)?.validate()?;
    state.restore_session(phase, level, score);
    Ok(())
}
