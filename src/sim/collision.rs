//! Per-frame collision and lifecycle resolution
//!
//! The frame runs in a fixed order, drawing as it goes:
//! 1. standing cities react to explosions (including ones spawned earlier
//!    in this same pass), then draw
//! 2. ruined cities draw (inert)
//! 3. score HUD, so projectiles pass over it
//! 4. interceptors move, draw, and detonate on arrival or blast contact
//!    (or drop once off screen)
//! 5. enemies move, draw, run their three-way check, and draw their trail
//! 6. explosions age; burnt-out ones are removed, the rest draw
//! 7. crosshair on top
//!
//! Interceptors resolve before enemies so an enemy caught by a blast an
//! interceptor made this frame is credited as intercepted.

use serde::{Deserialize, Serialize};

use super::entity::{City, Detonation, Explosion, Projectile};
use super::geometry::Rect;
use super::state::GameState;
use crate::renderer::hud;
use crate::renderer::{Color, DrawList};
use crate::settings::AssetRole;

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameReport {
    pub cities_lost: u32,
    pub interceptors_detonated: u32,
    /// Interceptors that overshot their target and flew off screen
    pub interceptors_lost: u32,
    pub enemies_intercepted: u32,
    pub enemies_grounded: u32,
    pub city_impacts: u32,
    pub points_awarded: u64,
    pub explosions_expired: u32,
}

/// Run the full ordered frame pass over the game state
pub fn run_frame(state: &mut GameState, draw: &mut DrawList) -> FrameReport {
    let mut report = FrameReport::default();

    draw.sprite(AssetRole::Background, state.background.rect, 0.0);

    report.cities_lost = resolve_cities(
        &mut state.cities,
        &mut state.destroyed_cities,
        &mut state.explosions,
        draw,
    );
    for ruin in &state.destroyed_cities {
        draw.sprite(ruin.sprite_role(), ruin.rect, 0.0);
    }

    hud::draw_score(draw, state.score, state.width);

    resolve_interceptors(
        &mut state.interceptors,
        &mut state.explosions,
        &state.background.rect,
        draw,
        &mut report,
    );

    resolve_enemies(
        &mut state.enemies,
        &mut state.explosions,
        &state.cities,
        state.difficulty.points_worth,
        &mut state.score,
        draw,
        &mut report,
    );

    report.explosions_expired = age_explosions(&mut state.explosions, draw);

    draw.sprite(AssetRole::Crosshair, state.crosshair.rect, 0.0);

    if report.cities_lost > 0 {
        log::info!(
            "{} city(ies) destroyed, {} standing",
            report.cities_lost,
            state.cities.len()
        );
    }

    report
}

/// Check each standing city against the explosions. A hit city collapses,
/// adds its three blasts, and moves to `destroyed`.
///
/// Returns the number of cities lost.
pub fn resolve_cities(
    cities: &mut Vec<City>,
    destroyed: &mut Vec<City>,
    explosions: &mut Vec<Explosion>,
    draw: &mut DrawList,
) -> u32 {
    let mut lost = 0;
    let mut idx = 0;
    while idx < cities.len() {
        if cities[idx].check_explode(explosions) {
            let mut city = cities.remove(idx);
            explosions.extend(city.explode());
            draw.sprite(city.sprite_role(), city.rect, 0.0);
            log::debug!("City {} destroyed", city.id);
            destroyed.push(city);
            lost += 1;
        } else {
            let city = &cities[idx];
            hud::draw_missile_stock(draw, city);
            draw.sprite(city.sprite_role(), city.rect, 0.0);
            idx += 1;
        }
    }
    lost
}

/// Move interceptors; the ones that reach their target or fly into a blast
/// become explosions. One that flew past its target is dropped once it leaves `screen`.
pub fn resolve_interceptors(
    interceptors: &mut Vec<Projectile>,
    explosions: &mut Vec<Explosion>,
    screen: &Rect,
    draw: &mut DrawList,
    report: &mut FrameReport,
) {
    interceptors.retain_mut(|missile| {
        missile.advance();
        draw.sprite(AssetRole::Projectile, missile.rect(), missile.heading);
        if missile.check_explode(explosions, &[]).is_some() {
            explosions.push(missile.explode());
            report.interceptors_detonated += 1;
            return false;
        }
        if !missile.rect().intersects(screen) {
            log::debug!(
                "Interceptor {} missed ({:.0}, {:.0}) and left the screen",
                missile.id,
                missile.target.x,
                missile.target.y
            );
            report.interceptors_lost += 1;
            return false;
        }
        true
    });
}

/// Move enemies and resolve their detonations, crediting intercepts to `score`
pub fn resolve_enemies(
    enemies: &mut Vec<Projectile>,
    explosions: &mut Vec<Explosion>,
    cities: &[City],
    points_worth: u32,
    score: &mut u64,
    draw: &mut DrawList,
    report: &mut FrameReport,
) {
    enemies.retain_mut(|enemy| {
        enemy.advance();
        draw.sprite(AssetRole::Projectile, enemy.rect(), enemy.heading);
        let detonation = enemy.check_explode(explosions, cities);
        if let Some((from, to)) = enemy.trail() {
            draw.line(from, to, Color::WHITE);
        }

        let Some(detonation) = detonation else {
            return true;
        };
        if detonation.scores() {
            *score += u64::from(points_worth);
            report.points_awarded += u64::from(points_worth);
        }
        match detonation {
            Detonation::Intercepted => report.enemies_intercepted += 1,
            Detonation::Grounded => report.enemies_grounded += 1,
            Detonation::CityImpact => report.city_impacts += 1,
            Detonation::Arrived | Detonation::CaughtInBlast => {}
        }
        explosions.push(enemy.explode());
        false
    });
}

/// Grow every explosion by one tick and drop the burnt-out ones.
///
/// Returns the number removed.
pub fn age_explosions(explosions: &mut Vec<Explosion>, draw: &mut DrawList) -> u32 {
    let before = explosions.len();
    explosions.retain_mut(|blast| {
        let alive = blast.update();
        if alive {
            draw.sprite(AssetRole::Explosion, blast.rect(), 0.0);
        }
        alive
    });
    (before - explosions.len()) as u32
}
