//! Survival Arcade - browser mini-games with a deterministic simulation core
//!
//! Core modules:
//! - `sim`: Deterministic Survival simulation (movement, projectiles, collisions, leveling)
//! - `session`: Start/reset lifecycle and fixed-interval tick scheduling
//! - `clicker`: Incremental clicker sub-game
//! - `tuning`: Data-driven game balance
//! - `view`: Read-only snapshots for the presentation layer

pub mod clicker;
pub mod session;
pub mod sim;
pub mod tuning;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clicker::{Clicker, ClickerError, ClickerEvent, Upgrade};
pub use session::{Session, SessionState};
pub use tuning::{Tuning, TuningError};

/// Engine constants that are not part of game balance
pub mod consts {
    /// Arena is a normalized square: [0, ARENA_SIZE] on both axes
    pub const ARENA_SIZE: f32 = 100.0;
    /// Maximum ticks run per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted by `advance` (ms); longer gaps are dropped
    pub const MAX_FRAME_MS: f64 = 250.0;
    /// Player starting position (arena center)
    pub const PLAYER_START: (f32, f32) = (50.0, 50.0);
    /// Player starting health
    pub const PLAYER_MAX_HEALTH: u32 = 100;
}
