//! Idle/demo mode - AI plays the Survival game
//!
//! Produces the keys a cautious player would hold: run from nearby enemies,
//! otherwise drift back toward the arena center where there is room to dodge.

use glam::Vec2;

use super::geometry::distance;
use super::input::{InputState, MoveKey};
use super::state::World;
use crate::consts::ARENA_SIZE;

/// Enemies closer than this are considered threats
const THREAT_RADIUS: f32 = 25.0;
/// Don't bother re-centering when this close to the middle
const CENTER_DEADZONE: f32 = 10.0;
/// Axis component below this is ignored (avoids jitter on diagonals)
const AXIS_THRESHOLD: f32 = 0.3;

/// Choose movement keys for the current world
pub fn autopilot_input(world: &World) -> InputState {
    let player = world.player.pos;

    // Sum of pushes away from each threat, stronger when closer
    let flee = world
        .enemies
        .iter()
        .filter_map(|e| {
            let d = distance(player, e.pos);
            (d < THREAT_RADIUS).then(|| (player - e.pos).normalize_or_zero() * (THREAT_RADIUS - d))
        })
        .fold(Vec2::ZERO, |acc, v| acc + v);

    let center = Vec2::splat(ARENA_SIZE / 2.0);
    let heading = if flee != Vec2::ZERO {
        // Walls pull the flee vector back inward so we don't get pinned in a corner
        let to_center = center - player;
        (flee.normalize() + to_center / ARENA_SIZE).normalize_or_zero()
    } else if distance(player, center) > CENTER_DEADZONE {
        (center - player).normalize_or_zero()
    } else {
        Vec2::ZERO
    };

    let mut input = InputState::default();
    if heading.x > AXIS_THRESHOLD {
        input.press(MoveKey::Right);
    } else if heading.x < -AXIS_THRESHOLD {
        input.press(MoveKey::Left);
    }
    if heading.y > AXIS_THRESHOLD {
        input.press(MoveKey::Down);
    } else if heading.y < -AXIS_THRESHOLD {
        input.press(MoveKey::Up);
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_idle_at_center() {
        let world = World::new(&Tuning::default());
        assert!(autopilot_input(&world).is_empty());
    }

    #[test]
    fn test_flees_from_enemy() {
        let mut world = World::new(&Tuning::default());
        world.spawn_enemy(Vec2::new(60.0, 50.0), 40);
        let input = autopilot_input(&world);
        assert!(input.is_held(MoveKey::Left));
        assert!(!input.is_held(MoveKey::Right));
    }

    #[test]
    fn test_returns_to_center() {
        let mut world = World::new(&Tuning::default());
        world.player.pos = Vec2::new(90.0, 10.0);
        let input = autopilot_input(&world);
        assert!(input.is_held(MoveKey::Left));
        assert!(input.is_held(MoveKey::Down));
    }

    #[test]
    fn test_ignores_distant_enemies() {
        let mut world = World::new(&Tuning::default());
        world.spawn_enemy(Vec2::new(50.0, 95.0), 40);
        assert!(autopilot_input(&world).is_empty());
    }
}
