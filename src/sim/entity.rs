//! Game entities
//!
//! Every interactive entity answers the same three questions each frame:
//! how it moves (`advance`/`update`), whether it should blow up
//! (`check_explode`), and what it leaves behind when it does (`explode`).
//! Collections live in `GameState`; entities never point at each other.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;
use crate::settings::AssetRole;
use crate::{compute_heading, decompose};

/// Why a projectile detonated this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Detonation {
    /// Interceptor reached its target point
    Arrived,
    /// Interceptor flew into an explosion before arriving
    CaughtInBlast,
    /// Enemy flew into an explosion (scores points)
    Intercepted,
    /// Enemy dropped below ground level
    Grounded,
    /// Enemy struck a live city
    CityImpact,
}

impl Detonation {
    /// Only intercepted enemies are worth points
    pub fn scores(&self) -> bool {
        matches!(self, Detonation::Intercepted)
    }
}

/// A defended city (also a missile battery)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: u32,
    pub rect: Rect,
    /// Fixed horizontal reference for targeting and fire selection
    pub anchor_x: f32,
    pub missile_stock: u32,
    pub is_destroyed: bool,
}

impl City {
    /// Create the city at slot `index` (0-based, left to right)
    pub fn new(id: u32, index: usize) -> Self {
        let i = index as f32;
        let left = CITY_SPACING * (i + 1.0) + CITY_WIDTH * i;
        Self {
            id,
            rect: Rect::new(left, CITY_TOP, CITY_WIDTH, CITY_HEIGHT),
            anchor_x: left + CITY_WIDTH / 2.0,
            missile_stock: CITY_MISSILE_STOCK,
            is_destroyed: false,
        }
    }

    /// Anchor x of the city at slot `index`, whether or not it still stands
    pub fn anchor_for_slot(index: usize) -> f32 {
        let i = index as f32;
        CITY_SPACING * (i + 1.0) + CITY_WIDTH * i + CITY_WIDTH / 2.0
    }

    pub fn can_fire(&self) -> bool {
        !self.is_destroyed && self.missile_stock > 0
    }

    pub fn restock(&mut self) {
        self.missile_stock = CITY_MISSILE_STOCK;
    }

    /// Launch an interceptor toward `target`, spending one missile.
    ///
    /// Callers check `can_fire` first; an empty or destroyed city launches nothing.
    pub fn launch(&mut self, id: u32, target: Vec2) -> Option<Projectile> {
        if !self.can_fire() {
            return None;
        }
        self.missile_stock -= 1;
        Some(Projectile::new(
            id,
            ProjectileKind::Interceptor,
            Vec2::new(self.anchor_x, GROUND_LINE),
            target,
            INTERCEPTOR_SPEED,
        ))
    }

    /// Hit by any live explosion?
    pub fn check_explode(&self, explosions: &[Explosion]) -> bool {
        !self.is_destroyed && explosions.iter().any(|e| self.rect.intersects(&e.rect()))
    }

    /// Collapse into the damaged footprint and return the three blasts it leaves
    pub fn explode(&mut self) -> [Explosion; 3] {
        self.is_destroyed = true;
        self.rect = Rect::new(
            self.rect.left() + CITY_DAMAGED_OFFSET_X,
            self.rect.top() + CITY_DAMAGED_OFFSET_Y,
            CITY_DAMAGED_WIDTH,
            CITY_DAMAGED_HEIGHT,
        );
        let center = self.rect.center();
        let spread = Vec2::new(CITY_BLAST_SPREAD, 0.0);
        [
            Explosion::new(center),
            Explosion::new(center - spread),
            Explosion::new(center + spread),
        ]
    }

    pub fn sprite_role(&self) -> AssetRole {
        if self.is_destroyed {
            AssetRole::CityDamaged
        } else {
            AssetRole::City
        }
    }
}

/// Projectile flavour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Player-fired, explodes on reaching its target point
    Interceptor,
    /// Hostile, trails a line back to where it entered the screen
    Enemy { spawn_x: f32 },
}

/// A projectile flying in a straight line at constant speed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    /// Top-left of the bounding box at launch
    pub origin: Vec2,
    /// Current top-left of the bounding box
    pub pos: Vec2,
    /// Bounding box size (sprite rotated to the heading)
    pub size: Vec2,
    pub target: Vec2,
    /// Radians, screen space (+y down)
    pub heading: f32,
    /// Displacement per tick
    pub vel: Vec2,
}

impl Projectile {
    /// Create a projectile whose unrotated sprite has its top-left at `root`
    pub fn new(id: u32, kind: ProjectileKind, root: Vec2, target: Vec2, speed: f32) -> Self {
        let sprite = Rect {
            pos: root,
            size: Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        };
        let heading = compute_heading(sprite.center(), target);
        let bounds = sprite.rotated_bounds(heading);
        Self {
            id,
            kind,
            origin: bounds.pos,
            pos: bounds.pos,
            size: bounds.size,
            target,
            heading,
            vel: decompose(heading, speed),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Move one tick along the heading
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Detonation condition for this frame, if any.
    ///
    /// Interceptors check arrival before explosions. Enemy checks run in a
    /// fixed order: explosions first, then the ground, then live cities.
    pub fn check_explode(&self, explosions: &[Explosion], cities: &[City]) -> Option<Detonation> {
        let rect = self.rect();
        match self.kind {
            ProjectileKind::Interceptor => {
                if rect.contains_point(self.target) {
                    Some(Detonation::Arrived)
                } else if explosions.iter().any(|e| rect.intersects(&e.rect())) {
                    Some(Detonation::CaughtInBlast)
                } else {
                    None
                }
            }
            ProjectileKind::Enemy { .. } => {
                if explosions.iter().any(|e| rect.intersects(&e.rect())) {
                    Some(Detonation::Intercepted)
                } else if rect.bottom() > GROUND_LEVEL {
                    Some(Detonation::Grounded)
                } else if cities
                    .iter()
                    .any(|c| !c.is_destroyed && rect.intersects(&c.rect))
                {
                    Some(Detonation::CityImpact)
                } else {
                    None
                }
            }
        }
    }

    /// The blast left behind, centred on the box's top-left corner
    pub fn explode(&self) -> Explosion {
        Explosion::new(self.pos)
    }

    /// Endpoints of the enemy trail line (none for interceptors)
    pub fn trail(&self) -> Option<(Vec2, Vec2)> {
        match self.kind {
            ProjectileKind::Enemy { spawn_x } => {
                Some((Vec2::new(spawn_x, 0.0), self.rect().center()))
            }
            ProjectileKind::Interceptor => None,
        }
    }
}

/// A growing blast that destroys whatever it touches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub center: Vec2,
    pub age_ticks: u32,
    /// Current side length
    pub size: f32,
}

impl Explosion {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            age_ticks: 0,
            size: EXPLOSION_BASE_SIZE,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center, Vec2::splat(self.size))
    }

    /// Grow for one tick. Returns false once the explosion has burnt out.
    pub fn update(&mut self) -> bool {
        if self.age_ticks > EXPLOSION_MAX_AGE {
            return false;
        }
        self.size = EXPLOSION_BASE_SIZE + EXPLOSION_GROWTH * self.age_ticks as f32;
        self.age_ticks += 1;
        true
    }
}

/// The targeting reticle, centred on the pointer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crosshair {
    pub rect: Rect,
}

impl Default for Crosshair {
    fn default() -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, CROSSHAIR_WIDTH, CROSSHAIR_HEIGHT),
        }
    }
}

impl Crosshair {
    pub fn move_to(&mut self, pointer: Vec2) {
        self.rect = Rect::from_center(pointer, self.rect.size);
    }

    pub fn target(&self) -> Vec2 {
        self.rect.center()
    }
}

/// Full-screen backdrop, drawn first every frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Background {
    pub rect: Rect,
}

impl Background {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, width as f32, height as f32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_layout() {
        let anchors: Vec<f32> = (0..CITY_COUNT).map(|i| City::new(i as u32, i).anchor_x).collect();
        assert_eq!(anchors, vec![204.0, 482.0, 760.0]);
        for i in 0..CITY_COUNT {
            assert_eq!(City::anchor_for_slot(i), anchors[i]);
        }
        assert_eq!(City::new(0, 1).rect, Rect::new(408.0, 580.0, 148.0, 80.0));
    }

    #[test]
    fn test_city_launch_spends_stock() {
        let mut city = City::new(1, 0);
        let missile = city.launch(10, Vec2::new(300.0, 200.0)).unwrap();
        assert_eq!(city.missile_stock, CITY_MISSILE_STOCK - 1);
        assert_eq!(missile.kind, ProjectileKind::Interceptor);
        assert!((missile.vel.length() - INTERCEPTOR_SPEED).abs() < 1e-4);

        city.missile_stock = 0;
        assert!(city.launch(11, Vec2::new(300.0, 200.0)).is_none());
        assert_eq!(city.missile_stock, 0);
    }

    #[test]
    fn test_city_explode_footprint() {
        let mut city = City::new(1, 0);
        let blasts = city.explode();
        assert!(city.is_destroyed);
        assert_eq!(city.rect, Rect::new(50.0, 626.0, 296.0, 34.0));
        assert_eq!(city.sprite_role(), AssetRole::CityDamaged);
        assert!(!city.can_fire());

        let center = city.rect.center();
        assert_eq!(blasts[0].center, center);
        assert_eq!(blasts[1].center, center - Vec2::new(25.0, 0.0));
        assert_eq!(blasts[2].center, center + Vec2::new(25.0, 0.0));
        // A ruin ignores further explosions
        assert!(!city.check_explode(&blasts));
    }

    #[test]
    fn test_interceptor_arrives_at_target() {
        let target = Vec2::new(500.0, 300.0);
        let mut missile = Projectile::new(
            1,
            ProjectileKind::Interceptor,
            Vec2::new(204.0, GROUND_LINE),
            target,
            INTERCEPTOR_SPEED,
        );

        let mut ticks = 0;
        while missile.check_explode(&[], &[]).is_none() {
            missile.advance();
            ticks += 1;
            assert!(ticks < 200, "interceptor never reached its target");
        }
        assert!(missile.rect().contains_point(target));
    }

    #[test]
    fn test_interceptor_caught_in_blast() {
        let missile = Projectile::new(
            1,
            ProjectileKind::Interceptor,
            Vec2::new(482.0, GROUND_LINE),
            Vec2::new(482.0, 100.0),
            INTERCEPTOR_SPEED,
        );
        let blast = Explosion::new(missile.rect().center());
        assert_eq!(
            missile.check_explode(std::slice::from_ref(&blast), &[]),
            Some(Detonation::CaughtInBlast)
        );
        assert!(!Detonation::CaughtInBlast.scores());

        // Arrival wins when both hold
        let mut arrived = missile.clone();
        arrived.target = arrived.rect().center();
        assert_eq!(arrived.check_explode(&[blast], &[]), Some(Detonation::Arrived));
    }

    #[test]
    fn test_enemy_check_order() {
        let enemy = Projectile::new(
            1,
            ProjectileKind::Enemy { spawn_x: 200.0 },
            Vec2::new(200.0, 600.0),
            Vec2::new(204.0, 900.0),
            1.0,
        );
        let city = City::new(2, 0);
        let blast = Explosion::new(enemy.rect().center());

        // Explosion wins over the city underneath
        assert_eq!(
            enemy.check_explode(&[blast], std::slice::from_ref(&city)),
            Some(Detonation::Intercepted)
        );
        assert_eq!(
            enemy.check_explode(&[], std::slice::from_ref(&city)),
            Some(Detonation::CityImpact)
        );

        let mut low = enemy.clone();
        low.pos.y = GROUND_LEVEL;
        assert_eq!(
            low.check_explode(&[], std::slice::from_ref(&city)),
            Some(Detonation::Grounded)
        );
    }

    #[test]
    fn test_enemy_ignores_ruined_city() {
        let mut city = City::new(2, 0);
        city.explode();
        let enemy = Projectile::new(
            1,
            ProjectileKind::Enemy { spawn_x: 100.0 },
            Vec2::new(100.0, 615.0),
            Vec2::new(204.0, 900.0),
            1.0,
        );
        assert!(enemy.rect().intersects(&city.rect));
        assert_eq!(enemy.check_explode(&[], &[city]), None);
    }

    #[test]
    fn test_explosion_lifetime() {
        let mut blast = Explosion::new(Vec2::new(100.0, 100.0));
        assert_eq!(blast.size, EXPLOSION_BASE_SIZE);

        for age in 0..=EXPLOSION_MAX_AGE {
            assert_eq!(blast.age_ticks, age);
            assert!(blast.update());
            assert_eq!(blast.size, EXPLOSION_BASE_SIZE + 2.0 * age as f32);
        }
        assert_eq!(blast.age_ticks, 16);
        assert!(!blast.update());
    }

    #[test]
    fn test_crosshair_centres_on_pointer() {
        let mut cross = Crosshair::default();
        cross.move_to(Vec2::new(300.0, 200.0));
        assert_eq!(cross.target(), Vec2::new(300.0, 200.0));
        assert_eq!(cross.rect.size, Vec2::new(CROSSHAIR_WIDTH, CROSSHAIR_HEIGHT));
    }
}
