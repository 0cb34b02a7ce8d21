//! Game state and the operations the loop drives it with
//!
//! `GameState` owns every entity collection and is the only thing that
//! creates or removes entities.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{self, FrameReport};
use super::difficulty::{Difficulty, Escalation};
use super::entity::{Background, City, Crosshair, Explosion, Projectile};
use super::spawner;
use crate::consts::*;
use crate::renderer::DrawList;
use crate::renderer::hud;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advancing
    Running,
    /// Every city is gone; the simulation is frozen
    GameOver,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    pub difficulty: Difficulty,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Milliseconds since the last enemy spawn
    pub spawn_elapsed_ms: f32,
    pub width: u32,
    pub height: u32,
    pub background: Background,
    pub crosshair: Crosshair,
    /// Standing cities (in slot order)
    pub cities: Vec<City>,
    pub destroyed_cities: Vec<City>,
    pub interceptors: Vec<Projectile>,
    pub enemies: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    next_id: u32,
}

impl GameState {
    /// New game on the default 960x720 display
    pub fn new(seed: u64) -> Self {
        Self::with_display(seed, DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }

    pub fn with_display(seed: u64, width: u32, height: u32) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            score: 0,
            difficulty: Difficulty::default(),
            time_ticks: 0,
            spawn_elapsed_ms: 0.0,
            width,
            height,
            background: Background::new(width, height),
            crosshair: Crosshair::default(),
            cities: Vec::with_capacity(CITY_COUNT),
            destroyed_cities: Vec::with_capacity(CITY_COUNT),
            interceptors: Vec::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            next_id: 1,
        };

        for slot in 0..CITY_COUNT {
            let id = state.next_entity_id();
            state.cities.push(City::new(id, slot));
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Index of the live city nearest to `target_x` that still has missiles.
    /// Ties go to the first city in slot order.
    pub fn select_city(&self, target_x: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, city) in self.cities.iter().enumerate() {
            if !city.can_fire() {
                continue;
            }
            let dist = (city.anchor_x - target_x).abs();
            if best.is_none_or(|(_, best_dist)| dist < best_dist) {
                best = Some((idx, dist));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Fire an interceptor at `target` from the nearest eligible city.
    ///
    /// Returns the new interceptor's ID, or `None` if no city can fire.
    pub fn fire(&mut self, target: Vec2) -> Option<u32> {
        if self.is_game_over() {
            return None;
        }
        let Some(idx) = self.select_city(target.x) else {
            log::debug!("Fire at ({:.0}, {:.0}) dropped: no city can fire", target.x, target.y);
            return None;
        };
        let id = self.next_entity_id();
        let missile = self.cities[idx].launch(id, target)?;
        log::debug!(
            "City {} fired interceptor {} at ({:.0}, {:.0}), {} left",
            self.cities[idx].id,
            id,
            target.x,
            target.y,
            self.cities[idx].missile_stock
        );
        self.interceptors.push(missile);
        Some(id)
    }

    /// Spawn an enemy if the spawn interval has elapsed, resetting the timer
    pub fn spawn_enemy_if_due(&mut self) -> Option<u32> {
        if self.is_game_over()
            || !spawner::spawn_due(self.spawn_elapsed_ms, self.difficulty.spawn_interval_ms)
        {
            return None;
        }
        self.spawn_elapsed_ms = 0.0;
        let id = self.next_entity_id();
        let enemy = spawner::roll_enemy(&mut self.rng, id, self.width, self.difficulty.enemy_speed);
        log::debug!(
            "Enemy {} spawned at x={:.0} aiming at x={:.0}",
            id,
            enemy.pos.x,
            enemy.target.x
        );
        self.enemies.push(enemy);
        Some(id)
    }

    /// Run one frame of movement, collisions and drawing.
    ///
    /// A finished game is frozen: nothing moves and the game-over screen is
    /// drawn instead.
    pub fn advance_frame(&mut self, draw: &mut DrawList) -> FrameReport {
        if self.is_game_over() {
            hud::draw_game_over(draw, self.score, self.width, self.height);
            return FrameReport::default();
        }
        collision::run_frame(self, draw)
    }

    /// Add real time to the spawn timer
    pub fn advance_clock(&mut self, elapsed_ms: f32) {
        if !self.is_game_over() {
            self.spawn_elapsed_ms += elapsed_ms;
        }
    }

    /// At most one difficulty step per call; restocks live cities when it fires
    pub fn adjust_difficulty(&mut self) -> Option<Escalation> {
        let escalation = self.difficulty.adjust(self.score)?;
        for city in &mut self.cities {
            city.restock();
        }
        Some(escalation)
    }

    /// Enter `GameOver` once the last city falls. Returns true on the transition.
    pub fn update_phase(&mut self) -> bool {
        if self.phase == GamePhase::Running && self.cities.is_empty() {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over after {} ticks, final score {}",
                self.time_ticks,
                self.score
            );
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.cities.len(), CITY_COUNT);
        assert!(state.cities.iter().all(|c| c.missile_stock == CITY_MISSILE_STOCK));
        assert!(state.destroyed_cities.is_empty());
        assert_eq!(state.score(), 0);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_select_nearest_city() {
        let state = GameState::new(1);
        assert_eq!(state.select_city(0.0), Some(0));
        assert_eq!(state.select_city(470.0), Some(1));
        assert_eq!(state.select_city(900.0), Some(2));
        // Exactly halfway between 204 and 482: first city wins
        assert_eq!(state.select_city(343.0), Some(0));
    }

    #[test]
    fn test_select_skips_empty_and_ruined() {
        let mut state = GameState::new(1);
        state.cities[1].missile_stock = 0;
        assert_eq!(state.select_city(482.0), Some(0));

        state.cities[0].is_destroyed = true;
        assert_eq!(state.select_city(482.0), Some(2));

        state.cities[2].missile_stock = 0;
        assert_eq!(state.select_city(482.0), None);
    }

    #[test]
    fn test_fire_dropped_without_eligible_city() {
        let mut state = GameState::new(1);
        for city in &mut state.cities {
            city.missile_stock = 0;
        }
        assert_eq!(state.fire(Vec2::new(480.0, 300.0)), None);
        assert!(state.interceptors.is_empty());
    }

    #[test]
    fn test_spawn_timer() {
        let mut state = GameState::new(3);
        assert_eq!(state.spawn_enemy_if_due(), None);

        state.advance_clock(SPAWN_START_INTERVAL_MS);
        assert!(state.spawn_enemy_if_due().is_some());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawn_elapsed_ms, 0.0);
        assert_eq!(state.spawn_enemy_if_due(), None);
    }

    #[test]
    fn test_difficulty_restocks_live_cities() {
        let mut state = GameState::new(1);
        state.cities[0].missile_stock = 2;
        state.cities[1].missile_stock = 0;
        state.score = 1000;

        assert!(state.adjust_difficulty().is_some());
        assert!(state.cities.iter().all(|c| c.missile_stock == CITY_MISSILE_STOCK));
        assert_eq!(state.adjust_difficulty(), None);
    }

    #[test]
    fn test_game_over_transition() {
        let mut state = GameState::new(1);
        assert!(!state.update_phase());

        state.destroyed_cities = std::mem::take(&mut state.cities);
        assert!(state.update_phase());
        assert!(state.is_game_over());
        // Only transitions once
        assert!(!state.update_phase());

        state.advance_clock(10_000.0);
        assert_eq!(state.spawn_enemy_if_due(), None);
        assert_eq!(state.fire(Vec2::new(100.0, 100.0)), None);
    }
}
