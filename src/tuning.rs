//! Data-driven game balance
//!
//! Every Survival balance number lives here so tests and the browser build can
//! adjust them without touching the simulation. Missing JSON fields fall back
//! to the defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Survival balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fixed tick interval (ms)
    pub tick_ms: u64,

    // === Player ===
    /// Arena units moved per held key per tick
    pub player_speed: f32,

    // === Auto-targeted projectile ===
    pub projectile_cooldown_ms: u64,
    pub projectile_damage: u32,
    /// Arena units per tick
    pub projectile_speed: f32,
    /// Projectile hits an enemy closer than this
    pub hit_radius: f32,

    // === Enemies ===
    /// Chance per tick of spawning one enemy (0-1)
    pub spawn_chance: f64,
    /// Distance from the player at which enemies appear
    pub spawn_radius: f32,
    /// Enemy health = base + per_level * level
    pub enemy_base_health: u32,
    pub enemy_health_per_level: u32,
    /// Enemy speed = base + per_level * level
    pub enemy_base_speed: f32,
    pub enemy_speed_per_level: f32,
    /// Enemies closer than this hurt the player
    pub melee_radius: f32,
    /// Health lost per adjacent enemy per tick
    pub melee_damage: u32,
    /// Experience awarded per kill
    pub kill_experience: f32,

    // === Weapons ===
    /// Weapons hit every enemy closer than this
    pub weapon_radius: f32,
    pub starting_weapon_damage: u32,
    pub starting_weapon_cooldown_ms: u64,
    /// Unlocked weapon damage = base + per_level * level
    pub unlock_base_damage: u32,
    pub unlock_damage_per_level: u32,
    /// Unlocked weapon cooldown = base - per_level * level, floored at min
    pub unlock_base_cooldown_ms: u64,
    pub unlock_cooldown_per_level_ms: u64,
    pub min_weapon_cooldown_ms: u64,
    /// A weapon unlocks when leaving a level divisible by this
    pub unlock_every_levels: u32,

    // === Leveling ===
    pub starting_threshold: f32,
    pub threshold_growth: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_ms: 50,

            player_speed: 1.0,

            projectile_cooldown_ms: 500,
            projectile_damage: 20,
            projectile_speed: 1.0,
            hit_radius: 5.0,

            spawn_chance: 0.05,
            spawn_radius: 60.0,
            enemy_base_health: 30,
            enemy_health_per_level: 10,
            enemy_base_speed: 0.5,
            enemy_speed_per_level: 0.1,
            melee_radius: 5.0,
            melee_damage: 1,
            kill_experience: 10.0,

            weapon_radius: 20.0,
            starting_weapon_damage: 10,
            starting_weapon_cooldown_ms: 1000,
            unlock_base_damage: 15,
            unlock_damage_per_level: 2,
            unlock_base_cooldown_ms: 800,
            unlock_cooldown_per_level_ms: 50,
            min_weapon_cooldown_ms: 100,
            unlock_every_levels: 3,

            starting_threshold: 50.0,
            threshold_growth: 1.5,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if self.tick_ms == 0 {
            return invalid("tick_ms", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return invalid("spawn_chance", "must be within 0..=1");
        }
        if self.hit_radius <= 0.0 {
            return invalid("hit_radius", "must be positive");
        }
        if self.melee_radius <= 0.0 {
            return invalid("melee_radius", "must be positive");
        }
        if self.weapon_radius <= 0.0 {
            return invalid("weapon_radius", "must be positive");
        }
        if self.min_weapon_cooldown_ms == 0 {
            return invalid("min_weapon_cooldown_ms", "must be positive");
        }
        if self.unlock_every_levels == 0 {
            return invalid("unlock_every_levels", "must be positive");
        }
        if !(self.starting_threshold >= 1.0) {
            return invalid("starting_threshold", "must be at least 1");
        }
        if !(self.threshold_growth > 1.0) {
            return invalid("threshold_growth", "must be greater than 1");
        }
        Ok(())
    }

    /// Health of an enemy spawned at `level`
    pub fn enemy_health(&self, level: u32) -> u32 {
        self.enemy_base_health + self.enemy_health_per_level * level
    }

    /// Enemy movement per tick at `level`
    pub fn enemy_speed(&self, level: u32) -> f32 {
        self.enemy_base_speed + self.enemy_speed_per_level * level as f32
    }

    /// Damage of the weapon unlocked when leaving `level`
    pub fn unlock_damage(&self, level: u32) -> u32 {
        self.unlock_base_damage + self.unlock_damage_per_level * level
    }

    /// Cooldown of the weapon unlocked when leaving `level`, never below the floor
    pub fn unlock_cooldown_ms(&self, level: u32) -> u64 {
        self.unlock_base_cooldown_ms
            .saturating_sub(self.unlock_cooldown_per_level_ms * level as u64)
            .max(self.min_weapon_cooldown_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "spawn_chance": 0.0, "tick_ms": 20 }"#).unwrap();
        assert_eq!(tuning.tick_ms, 20);
        assert_eq!(tuning.spawn_chance, 0.0);
        assert_eq!(tuning.projectile_damage, 20);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_json(r#"{ "tick_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "tick_ms", .. }));

        let err = Tuning::from_json(r#"{ "spawn_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "spawn_chance", .. }));

        let err = Tuning::from_json(r#"{ "threshold_growth": 1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "threshold_growth", .. }));

        let err = Tuning::from_json(r#"{ "starting_threshold": 1e-7, "threshold_growth": 1.5 }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "starting_threshold", .. }));

        let err = Tuning::from_json("not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_flat_tiny_threshold_rejected() {
        let err = Tuning::from_json(
            r#"{ "spawn_chance": 0.0, "starting_threshold": 1e-7, "threshold_growth": 1.0 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, TuningError::Invalid { .. }));
    }

    #[test]
    fn test_scaling_formulas() {
        let t = Tuning::default();
        assert_eq!(t.enemy_health(1), 40);
        assert_eq!(t.enemy_health(4), 70);
        assert!((t.enemy_speed(1) - 0.6).abs() < 1e-6);
        assert_eq!(t.unlock_damage(3), 21);
        assert_eq!(t.unlock_cooldown_ms(3), 650);
        // 800 - 50*15 = 50, floored at 100
        assert_eq!(t.unlock_cooldown_ms(15), 100);
        assert_eq!(t.unlock_cooldown_ms(40), 100);
    }
}
