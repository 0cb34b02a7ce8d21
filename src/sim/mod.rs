//! Fixed-tick simulation
//!
//! All gameplay logic lives here:
//! - One tick = one frame; no variable timestep inside the simulation
//! - Seeded RNG only
//! - Stable iteration order (collections keep insertion order)
//! - Drawing is recorded into a `DrawList`, never performed directly

pub mod collision;
pub mod difficulty;
pub mod entity;
pub mod geometry;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{FrameReport, run_frame};
pub use difficulty::{Difficulty, Escalation};
pub use entity::{Background, City, Crosshair, Detonation, Explosion, Projectile, ProjectileKind};
pub use geometry::Rect;
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, TickOutcome, begin_tick, end_tick, tick};
