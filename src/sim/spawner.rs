//! Timed enemy generation

use glam::Vec2;
use rand::Rng;

use super::entity::{City, Projectile, ProjectileKind};
use crate::consts::*;

/// Has enough time passed since the last spawn?
#[inline]
pub fn spawn_due(elapsed_ms: f32, interval_ms: f32) -> bool {
    elapsed_ms >= interval_ms
}

/// Roll a new enemy: random x on the top edge, aimed at a random city slot
/// on the ground line. Ruined slots stay valid targets.
pub fn roll_enemy<R: Rng>(rng: &mut R, id: u32, display_width: u32, speed: f32) -> Projectile {
    let spawn_x = rng.random_range(0..=display_width) as f32;
    let slot = rng.random_range(0..CITY_COUNT);
    let target = Vec2::new(City::anchor_for_slot(slot), GROUND_LINE);
    Projectile::new(
        id,
        ProjectileKind::Enemy { spawn_x },
        Vec2::new(spawn_x, 0.0),
        target,
        speed,
    )
}
