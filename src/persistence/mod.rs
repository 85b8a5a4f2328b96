//! Save/load persistence
//!
//! Features:
//! - Fixed 12-byte binary session record
//! - Range validation before anything is restored
//! - Fail-soft loading (a bad save never blocks a new game)

pub mod save;

pub use save::{SaveError, SaveRecord, load_session, save_session};
