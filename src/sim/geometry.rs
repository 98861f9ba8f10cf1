//! 2D helpers for the square arena
//!
//! Callers only ever pass finite coordinates, so nothing here can fail.

use glam::Vec2;

use crate::consts::ARENA_SIZE;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector pointing from `from` toward `to`, or zero when the points coincide
#[inline]
pub fn direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Standard clamp
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}

/// Clamp both axes into the arena
#[inline]
pub fn clamp_to_arena(p: Vec2) -> Vec2 {
    Vec2::new(clamp(p.x, 0.0, ARENA_SIZE), clamp(p.y, 0.0, ARENA_SIZE))
}

/// True if the point lies inside the arena (bounds inclusive)
#[inline]
pub fn in_arena(p: Vec2) -> bool {
    (0.0..=ARENA_SIZE).contains(&p.x) && (0.0..=ARENA_SIZE).contains(&p.y)
}

/// Point at `radius` from `center` along `angle` (radians)
#[inline]
pub fn point_on_circle(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    center + Vec2::new(angle.cos(), angle.sin()) * radius
}
