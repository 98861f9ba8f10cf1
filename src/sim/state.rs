//! World state and core simulation types
//!
//! Everything one Survival run needs lives in [`World`]; the session owns it and
//! only the tick mutates it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Player health reached zero; the session resets on seeing this
    GameOver,
}

/// Discrete notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    LevelUp {
        level: u32,
    },
    WeaponUnlocked {
        name: String,
        damage: u32,
        cooldown_ms: u64,
    },
    GameOver {
        experience: f32,
        level: u32,
    },
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub health: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START.0, PLAYER_START.1),
            health: PLAYER_MAX_HEALTH,
        }
    }
}

/// A hostile entity chasing the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage, saturating at zero. Returns true if this hit killed it.
    pub fn take_damage(&mut self, damage: u32) -> bool {
        let was_alive = self.is_alive();
        self.health = self.health.saturating_sub(damage);
        was_alive && !self.is_alive()
    }
}

/// An auto-targeted shot travelling in a straight line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Unit vector, or zero if fired at a target on top of the player
    pub dir: Vec2,
    pub damage: u32,
    /// Tick timestamp (ms) the projectile was fired
    pub spawned_at: u64,
}

/// An area weapon that damages everything near the player on cooldown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub damage: u32,
    pub cooldown_ms: u64,
    /// `None` until first fired; a fresh weapon is ready immediately
    pub last_fired: Option<u64>,
}

impl Weapon {
    pub fn starting(tuning: &Tuning) -> Self {
        Self {
            name: "Toilet Paper Roll".to_string(),
            damage: tuning.starting_weapon_damage,
            cooldown_ms: tuning.starting_weapon_cooldown_ms,
            last_fired: None,
        }
    }

    pub fn is_ready(&self, now_ms: u64) -> bool {
        cooldown_elapsed(self.last_fired, now_ms, self.cooldown_ms)
    }
}

/// True if `cooldown_ms` has passed since `last`, or nothing has fired yet
#[inline]
pub fn cooldown_elapsed(last: Option<u64>, now_ms: u64, cooldown_ms: u64) -> bool {
    last.is_none_or(|t| now_ms.saturating_sub(t) >= cooldown_ms)
}

/// Complete state of one Survival run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub player: Player,
    pub level: u32,
    pub experience: f32,
    /// Experience needed to reach the next level
    pub experience_to_level: f32,
    /// Enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Projectiles in fire order
    pub projectiles: Vec<Projectile>,
    /// Weapons in unlock order; the starting weapon is always first
    pub weapons: Vec<Weapon>,
    /// Timestamp of the most recent tick (ms since session start)
    pub elapsed_ms: u64,
    /// When the auto-targeted projectile last fired
    pub last_projectile_ms: Option<u64>,
    pub phase: GamePhase,
    /// Next entity ID
    next_id: u32,
}

impl World {
    /// Fresh world: centered player at full health, level 1, starting weapon only
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            player: Player::default(),
            level: 1,
            experience: 0.0,
            experience_to_level: tuning.starting_threshold,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            weapons: vec![Weapon::starting(tuning)],
            elapsed_ms: 0,
            last_projectile_ms: None,
            phase: GamePhase::Running,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an enemy at `pos` with full health. Returns its ID.
    pub fn spawn_enemy(&mut self, pos: Vec2, health: u32) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos,
            health,
            max_health: health,
        });
        id
    }

    /// Add a projectile at `pos` travelling along `dir`. Returns its ID.
    pub fn spawn_projectile(&mut self, pos: Vec2, dir: Vec2, damage: u32, now_ms: u64) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile {
            id,
            pos,
            dir,
            damage,
            spawned_at: now_ms,
        });
        id
    }

    /// Drop enemies whose health reached zero
    pub fn cull_dead_enemies(&mut self) {
        self.enemies.retain(Enemy::is_alive);
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_defaults() {
        let tuning = Tuning::default();
        let world = World::new(&tuning);
        assert_eq!(world.player.pos, Vec2::new(50.0, 50.0));
        assert_eq!(world.player.health, 100);
        assert_eq!(world.level, 1);
        assert_eq!(world.experience_to_level, 50.0);
        assert!(world.enemies.is_empty());
        assert!(world.projectiles.is_empty());
        assert_eq!(world.weapons.len(), 1);
        assert_eq!(world.weapons[0].name, "Toilet Paper Roll");
        assert!(world.is_running());
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut world = World::new(&Tuning::default());
        let a = world.spawn_enemy(Vec2::ZERO, 10);
        let b = world.spawn_projectile(Vec2::ZERO, Vec2::X, 20, 0);
        let c = world.spawn_enemy(Vec2::ZERO, 10);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_take_damage_reports_kill_once() {
        let mut enemy = Enemy {
            id: 1,
            pos: Vec2::ZERO,
            health: 15,
            max_health: 15,
        };
        assert!(!enemy.take_damage(10));
        assert!(enemy.take_damage(10));
        assert_eq!(enemy.health, 0);
        // Already dead: no second kill
        assert!(!enemy.take_damage(10));
    }

    #[test]
    fn test_cooldown_elapsed() {
        assert!(cooldown_elapsed(None, 0, 500));
        assert!(!cooldown_elapsed(Some(100), 599, 500));
        assert!(cooldown_elapsed(Some(100), 600, 500));
    }
}
