//! Demo input source that plays the game by itself
//!
//! Picks the lowest enemy it hasn't engaged yet, leads it by the
//! interceptor's flight time, and fires. Never aims close enough to the
//! ground for its own blast to reach a city.

use std::collections::HashSet;

use glam::Vec2;

use crate::consts::*;
use crate::game_loop::{InputEvent, InputSource};
use crate::sim::GameState;

/// Aim points below this line would catch our own cities in the blast
const SAFE_AIM_FLOOR: f32 = 480.0;
/// Ticks between shots
const FIRE_COOLDOWN_TICKS: u32 = 20;

#[derive(Debug, Clone)]
pub struct Autopilot {
    pointer: Vec2,
    cooldown: u32,
    engaged: HashSet<u32>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new()
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self {
            pointer: Vec2::new(DISPLAY_WIDTH as f32 / 2.0, DISPLAY_HEIGHT as f32 / 2.0),
            cooldown: 0,
            engaged: HashSet::new(),
        }
    }

    /// Where an interceptor from the nearest firing city should meet `enemy`
    fn lead_target(state: &GameState, center: Vec2, vel: Vec2) -> Option<Vec2> {
        let mut aim = center;
        // Two refinement passes are plenty at these speeds
        for _ in 0..2 {
            let city = state.select_city(aim.x)?;
            let launch = Vec2::new(state.cities[city].anchor_x, GROUND_LINE);
            let flight_ticks = launch.distance(aim) / INTERCEPTOR_SPEED;
            aim = center + vel * flight_ticks;
        }
        Some(aim)
    }
}

impl InputSource for Autopilot {
    fn pointer_position(&mut self) -> Vec2 {
        self.pointer
    }

    fn poll_events(&mut self, state: &GameState) -> Vec<InputEvent> {
        // Forget enemies that are gone
        self.engaged
            .retain(|id| state.enemies.iter().any(|e| e.id == *id));

        if self.cooldown > 0 {
            self.cooldown -= 1;
            return Vec::new();
        }

        let candidate = state
            .enemies
            .iter()
            .filter(|e| !self.engaged.contains(&e.id))
            .filter_map(|e| {
                let aim = Self::lead_target(state, e.rect().center(), e.vel)?;
                (aim.y < SAFE_AIM_FLOOR).then_some((e.id, aim))
            })
            .max_by(|a, b| a.1.y.total_cmp(&b.1.y));

        let Some((id, aim)) = candidate else {
            return Vec::new();
        };

        log::debug!("Autopilot engaging enemy {} at ({:.0}, {:.0})", id, aim.x, aim.y);
        self.engaged.insert(id);
        self.cooldown = FIRE_COOLDOWN_TICKS;
        self.pointer = aim;
        vec![InputEvent::FirePressed(aim)]
    }
}
