//! Platform abstraction layer
//!
//! Turns raw key state into per-frame `TickInput` snapshots and provides a
//! scripted player for headless runs.

pub mod input;

pub use input::{Autopilot, KeyboardState};
