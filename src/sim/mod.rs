//! Deterministic simulation module
//!
//! All Survival gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected RNG only
//! - Stable iteration order (insertion order, by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod geometry;
pub mod input;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use geometry::{clamp, clamp_to_arena, direction, distance, in_arena, point_on_circle};
pub use input::{InputState, MoveKey};
pub use state::{Enemy, GameEvent, GamePhase, Player, Projectile, Weapon, World};
pub use tick::tick;
