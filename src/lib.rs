//! Missile Commander - defend three cities from falling enemy projectiles
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (entities, collisions, spawning, difficulty)
//! - `game_loop`: Event draining, frame governor and terminal-state hold
//! - `renderer`: Draw-order contract toward an external display backend
//! - `settings`: Display size, sprite identifiers and loop timing
//! - `autopilot`: Scripted input source for headless/demo runs

pub mod autopilot;
pub mod error;
pub mod game_loop;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use game_loop::{GameLoop, LoopExit};
pub use settings::{AssetRole, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default display dimensions (pixels)
    pub const DISPLAY_WIDTH: u32 = 960;
    pub const DISPLAY_HEIGHT: u32 = 720;

    /// Frame governor target (ticks per second)
    pub const TICK_RATE_HZ: u32 = 120;
    /// How long the game-over screen stays up before the loop exits
    pub const GAME_OVER_HOLD_MS: f32 = 5000.0;

    /// City layout: three cities, 130px apart, sitting on y = 580
    pub const CITY_COUNT: usize = 3;
    pub const CITY_SPACING: f32 = 130.0;
    pub const CITY_WIDTH: f32 = 148.0;
    pub const CITY_HEIGHT: f32 = 80.0;
    pub const CITY_TOP: f32 = 580.0;
    pub const CITY_MISSILE_STOCK: u32 = 10;

    /// Destroyed footprint, relative to the intact city's top-left
    pub const CITY_DAMAGED_OFFSET_X: f32 = -80.0;
    pub const CITY_DAMAGED_OFFSET_Y: f32 = 46.0;
    pub const CITY_DAMAGED_WIDTH: f32 = 296.0;
    pub const CITY_DAMAGED_HEIGHT: f32 = 34.0;
    /// Horizontal offset of the two lateral explosions of a dying city
    pub const CITY_BLAST_SPREAD: f32 = 25.0;

    /// Projectile sprite (before rotation)
    pub const PROJECTILE_WIDTH: f32 = 22.0;
    pub const PROJECTILE_HEIGHT: f32 = 10.0;
    /// Launch height of interceptors and aim height of enemies
    pub const GROUND_LINE: f32 = 580.0;
    /// An enemy whose box bottom passes this line hits the ground
    pub const GROUND_LEVEL: f32 = 640.0;

    /// Interceptor speed (pixels per tick)
    pub const INTERCEPTOR_SPEED: f32 = 12.0;

    /// Explosion growth: 40px at birth, +2px per tick, gone after 15 ticks
    pub const EXPLOSION_BASE_SIZE: f32 = 40.0;
    pub const EXPLOSION_GROWTH: f32 = 2.0;
    pub const EXPLOSION_MAX_AGE: u32 = 15;

    /// Crosshair sprite size
    pub const CROSSHAIR_WIDTH: f32 = 55.0;
    pub const CROSSHAIR_HEIGHT: f32 = 56.0;

    /// Difficulty controller
    pub const ENEMY_START_SPEED: f32 = 1.0;
    pub const ENEMY_START_POINTS: u32 = 100;
    pub const SPAWN_START_INTERVAL_MS: f32 = 4000.0;
    pub const SPAWN_INTERVAL_FLOOR_MS: f32 = 1600.0;
    pub const MILESTONE_POINTS: u64 = 1000;
    pub const ESCALATION_FACTOR: f64 = 1.15;
    pub const ENEMY_SPEED_STEP: f32 = 0.15;
}

/// Heading (radians) that moves a point in a straight line from `from` toward `to`
#[inline]
pub fn compute_heading(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Split a speed magnitude along a heading into (vx, vy)
#[inline]
pub fn decompose(angle: f32, magnitude: f32) -> Vec2 {
    Vec2::new(magnitude * angle.cos(), magnitude * angle.sin())
}
