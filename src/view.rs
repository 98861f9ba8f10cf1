//! Read-only snapshots for the presentation layer
//!
//! Positions are expressed as percentages of the viewport so the page can place
//! entities with `left: x%; top: y%` regardless of its pixel size.

use serde::Serialize;

use crate::consts::ARENA_SIZE;
use crate::sim::World;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentPos {
    pub x: f32,
    pub y: f32,
}

impl PercentPos {
    fn of(pos: glam::Vec2) -> Self {
        Self {
            x: pos.x / ARENA_SIZE * 100.0,
            y: pos.y / ARENA_SIZE * 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: PercentPos,
    pub health: u32,
    pub max_health: u32,
    /// Health bar fill, 0-1
    pub health_fraction: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub pos: PercentPos,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeaponView {
    pub name: String,
    pub damage: u32,
    pub cooldown_ms: u64,
}

/// Everything the HUD and arena overlay need for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub player: PercentPos,
    pub health: u32,
    pub level: u32,
    pub experience: f32,
    pub experience_to_level: f32,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub weapons: Vec<WeaponView>,
}

impl Snapshot {
    pub fn of(world: &World) -> Self {
        Self {
            player: PercentPos::of(world.player.pos),
            health: world.player.health,
            level: world.level,
            experience: world.experience,
            experience_to_level: world.experience_to_level,
            enemies: world
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: PercentPos::of(e.pos),
                    health: e.health,
                    max_health: e.max_health,
                    health_fraction: if e.max_health > 0 {
                        e.health as f32 / e.max_health as f32
                    } else {
                        0.0
                    },
                })
                .collect(),
            projectiles: world
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    pos: PercentPos::of(p.pos),
                })
                .collect(),
            weapons: world
                .weapons
                .iter()
                .map(|w| WeaponView {
                    name: w.name.clone(),
                    damage: w.damage,
                    cooldown_ms: w.cooldown_ms,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;

    #[test]
    fn test_snapshot_percentages() {
        let mut world = World::new(&Tuning::default());
        world.player.pos = Vec2::new(25.0, 75.0);
        world.spawn_enemy(Vec2::new(10.0, 20.0), 40);
        world.enemies[0].health = 10;

        let snap = Snapshot::of(&world);
        assert_eq!(snap.player, PercentPos { x: 25.0, y: 75.0 });
        assert_eq!(snap.enemies.len(), 1);
        assert!((snap.enemies[0].health_fraction - 0.25).abs() < 1e-6);
        assert_eq!(snap.weapons[0].name, "Toilet Paper Roll");
    }

    #[test]
    fn test_snapshot_json() {
        let world = World::new(&Tuning::default());
        let json = Snapshot::of(&world).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["health"], 100);
        assert_eq!(value["level"], 1);
        assert!(value["enemies"].as_array().unwrap().is_empty());
    }
}
