//! Score-driven difficulty escalation
//!
//! Every time the score passes the next milestone the game gets harder in
//! exactly one of two ways: enemies spawn more often until the spawn
//! interval reaches its floor, after which they fly faster instead.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What a milestone crossing changed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Escalation {
    /// Spawn interval shrank to the given value (ms)
    FasterSpawns(f32),
    /// Enemy speed grew to the given magnitude
    FasterEnemies(f32),
}

/// Difficulty counters shared by every enemy projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Difficulty {
    /// Last score milestone crossed (in thousands)
    pub last_milestone: u32,
    /// Time between enemy spawns
    pub spawn_interval_ms: f32,
    /// Speed given to newly spawned enemies
    pub enemy_speed: f32,
    /// Points for intercepting an enemy
    pub points_worth: u32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            last_milestone: 0,
            spawn_interval_ms: SPAWN_START_INTERVAL_MS,
            enemy_speed: ENEMY_START_SPEED,
            points_worth: ENEMY_START_POINTS,
        }
    }
}

impl Difficulty {
    /// Has the score passed the next milestone?
    pub fn milestone_due(&self, score: u64) -> bool {
        score / MILESTONE_POINTS > u64::from(self.last_milestone)
    }

    /// Apply at most one escalation for `score`.
    ///
    /// Run once per frame. A score that jumps several milestones at once is
    /// caught up one step per frame. The caller restocks live cities when
    /// this returns `Some`.
    pub fn adjust(&mut self, score: u64) -> Option<Escalation> {
        if !self.milestone_due(score) {
            return None;
        }

        self.last_milestone =
            (f64::from(self.last_milestone + 1) * ESCALATION_FACTOR).floor() as u32;

        let escalation = if self.spawn_interval_ms < SPAWN_INTERVAL_FLOOR_MS {
            self.enemy_speed += ENEMY_SPEED_STEP;
            Escalation::FasterEnemies(self.enemy_speed)
        } else {
            self.spawn_interval_ms /= ESCALATION_FACTOR as f32;
            Escalation::FasterSpawns(self.spawn_interval_ms)
        };

        self.points_worth =
            (f64::from(self.points_worth) * ESCALATION_FACTOR).round_ties_even() as u32;

        log::info!(
            "Milestone {} reached at score {}: {:?}, enemies now worth {}",
            self.last_milestone,
            score,
            escalation,
            self.points_worth
        );

        Some(escalation)
    }
}
