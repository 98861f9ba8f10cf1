//! Fixed timestep simulation tick
//!
//! Advances a [`World`] by one tick. Substeps run in a fixed order over the same
//! world, so later steps always see the results of earlier ones.

use rand::Rng;

use super::geometry::{clamp_to_arena, direction, distance, in_arena, point_on_circle};
use super::input::InputState;
use super::state::{GameEvent, GamePhase, Weapon, World, cooldown_elapsed};
use crate::tuning::Tuning;

/// Advance the world by one tick at timestamp `now_ms`.
///
/// Returns the events raised during the tick. A world that is already over is
/// left untouched. `tuning` must have passed [`Tuning::validate`].
pub fn tick<R: Rng + ?Sized>(
    world: &mut World,
    input: &InputState,
    now_ms: u64,
    tuning: &Tuning,
    rng: &mut R,
) -> Vec<GameEvent> {
    debug_assert!(tuning.validate().is_ok(), "tick called with invalid tuning");

    let mut events = Vec::new();
    if world.phase == GamePhase::GameOver {
        return events;
    }

    world.elapsed_ms = now_ms;

    move_player(world, input, tuning);
    fire_auto_target(world, now_ms, tuning);
    advance_projectiles(world, tuning);
    resolve_projectile_hits(world, tuning);
    spawn_enemies(world, tuning, rng);
    move_enemies(world, tuning);
    fire_weapons(world, now_ms, tuning);
    apply_leveling(world, tuning, &mut events);

    if world.player.health == 0 {
        world.phase = GamePhase::GameOver;
        log::info!(
            "Game over at level {} with {:.0} experience",
            world.level,
            world.experience
        );
        events.push(GameEvent::GameOver {
            experience: world.experience,
            level: world.level,
        });
    }

    events
}

fn move_player(world: &mut World, input: &InputState, tuning: &Tuning) {
    let mut pos = world.player.pos;
    for key in input.held() {
        pos += key.step() * tuning.player_speed;
    }
    world.player.pos = clamp_to_arena(pos);
}

/// Fire at the nearest enemy if the projectile cooldown has elapsed
fn fire_auto_target(world: &mut World, now_ms: u64, tuning: &Tuning) {
    if !cooldown_elapsed(world.last_projectile_ms, now_ms, tuning.projectile_cooldown_ms) {
        return;
    }

    let player = world.player.pos;
    // Strict less-than keeps the first enemy on ties
    let mut nearest: Option<(glam::Vec2, f32)> = None;
    for enemy in &world.enemies {
        let d = distance(player, enemy.pos);
        if nearest.is_none_or(|(_, best)| d < best) {
            nearest = Some((enemy.pos, d));
        }
    }

    if let Some((target, _)) = nearest {
        let dir = direction(player, target);
        world.spawn_projectile(player, dir, tuning.projectile_damage, now_ms);
        world.last_projectile_ms = Some(now_ms);
    }
}

fn advance_projectiles(world: &mut World, tuning: &Tuning) {
    for proj in &mut world.projectiles {
        proj.pos += proj.dir * tuning.projectile_speed;
    }
}

/// Each projectile damages the first living enemy in range, then is consumed.
/// Consumed and out-of-arena projectiles are removed, along with dead enemies.
fn resolve_projectile_hits(world: &mut World, tuning: &Tuning) {
    let mut kills = 0u32;
    let mut consumed: Vec<u32> = Vec::new();

    for proj in &world.projectiles {
        let hit = world
            .enemies
            .iter_mut()
            .find(|e| e.is_alive() && distance(e.pos, proj.pos) < tuning.hit_radius);
        if let Some(enemy) = hit {
            consumed.push(proj.id);
            if enemy.take_damage(proj.damage) {
                kills += 1;
            }
        }
    }

    world.experience += kills as f32 * tuning.kill_experience;
    world.cull_dead_enemies();
    world
        .projectiles
        .retain(|p| !consumed.contains(&p.id) && in_arena(p.pos));
}

fn spawn_enemies<R: Rng + ?Sized>(world: &mut World, tuning: &Tuning, rng: &mut R) {
    if !rng.random_bool(tuning.spawn_chance) {
        return;
    }
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    let pos = point_on_circle(world.player.pos, tuning.spawn_radius, angle);
    let health = tuning.enemy_health(world.level);
    let id = world.spawn_enemy(pos, health);
    log::trace!("Spawned enemy {} at ({:.1}, {:.1})", id, pos.x, pos.y);
}

/// Adjacent enemies bite the player, then every enemy closes in.
/// Damage is per enemy with no per-tick cap.
fn move_enemies(world: &mut World, tuning: &Tuning) {
    let player = world.player.pos;
    let speed = tuning.enemy_speed(world.level);
    let mut bites = 0u32;

    for enemy in &mut world.enemies {
        if distance(enemy.pos, player) < tuning.melee_radius {
            bites += 1;
        }
        enemy.pos += direction(enemy.pos, player) * speed;
    }

    world.player.health = world
        .player
        .health
        .saturating_sub(bites.saturating_mul(tuning.melee_damage));
    world.cull_dead_enemies();
}

fn fire_weapons(world: &mut World, now_ms: u64, tuning: &Tuning) {
    let player = world.player.pos;
    let mut kills = 0u32;

    for weapon in &mut world.weapons {
        if !weapon.is_ready(now_ms) {
            continue;
        }
        for enemy in &mut world.enemies {
            if enemy.is_alive()
                && distance(enemy.pos, player) < tuning.weapon_radius
                && enemy.take_damage(weapon.damage)
            {
                kills += 1;
            }
        }
        weapon.last_fired = Some(now_ms);
    }

    world.experience += kills as f32 * tuning.kill_experience;
    world.cull_dead_enemies();
}

/// Level up as many times as the experience allows, carrying the remainder
fn apply_leveling(world: &mut World, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    while world.experience >= world.experience_to_level {
        let remaining = world.experience - world.experience_to_level;
        // Threshold lost in f32 rounding; subtracting would never make progress
        if remaining == world.experience {
            log::warn!(
                "Experience {} too large to level past threshold {}",
                world.experience,
                world.experience_to_level
            );
            break;
        }
        let old_level = world.level;
        world.experience = remaining;
        world.experience_to_level *= tuning.threshold_growth;
        world.level += 1;
        log::info!("Survival level {}", world.level);
        events.push(GameEvent::LevelUp { level: world.level });

        if old_level.is_multiple_of(tuning.unlock_every_levels) {
            let weapon = Weapon {
                name: format!("Poop Blaster {}", old_level / tuning.unlock_every_levels + 1),
                damage: tuning.unlock_damage(old_level),
                cooldown_ms: tuning.unlock_cooldown_ms(old_level),
                last_fired: None,
            };
            log::info!(
                "Unlocked {} (dmg {}, cd {}ms)",
                weapon.name,
                weapon.damage,
                weapon.cooldown_ms
            );
            events.push(GameEvent::WeaponUnlocked {
                name: weapon.name.clone(),
                damage: weapon.damage,
                cooldown_ms: weapon.cooldown_ms,
            });
            world.weapons.push(weapon);
        }
    }
}
