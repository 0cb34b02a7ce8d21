//! One fixed-cadence simulation tick

use glam::Vec2;

use super::collision::FrameReport;
use super::difficulty::Escalation;
use super::state::GameState;
use crate::renderer::{DrawList, hud};

/// Input already decoded for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer position (moves the crosshair)
    pub pointer: Option<Vec2>,
    /// Fire commands, in the order they arrived
    pub fire: Vec<Vec2>,
}

/// What a tick did
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    pub frame: FrameReport,
    pub fired: u32,
    pub spawned: Option<u32>,
    pub escalation: Option<Escalation>,
    /// This tick ended the game
    pub game_over: bool,
}

/// First half of a tick: input, spawn and the frame pass.
///
/// A finished game only redraws the game-over screen.
pub fn begin_tick(state: &mut GameState, input: &TickInput, draw: &mut DrawList) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    if state.is_game_over() {
        state.advance_frame(draw);
        return outcome;
    }

    if let Some(pointer) = input.pointer {
        state.crosshair.move_to(pointer);
    }
    for &target in &input.fire {
        if state.fire(target).is_some() {
            outcome.fired += 1;
        }
    }

    outcome.spawned = state.spawn_enemy_if_due();
    outcome.frame = state.advance_frame(draw);
    outcome
}

/// Second half of a tick, run once the tick's duration is known.
///
/// On the tick that ends the game the game-over screen is drawn into
/// `draw` straight away.
pub fn end_tick(state: &mut GameState, outcome: &mut TickOutcome, elapsed_ms: f32, draw: &mut DrawList) {
    if state.is_game_over() {
        return;
    }

    state.advance_clock(elapsed_ms);
    outcome.escalation = state.adjust_difficulty();

    state.time_ticks += 1;
    outcome.game_over = state.update_phase();
    if outcome.game_over {
        hud::draw_game_over(draw, state.score, state.width, state.height);
    }
}

/// Advance the game by one whole tick lasting `elapsed_ms`.
///
/// Order: input → spawn → frame pass → spawn clock → difficulty → end check.
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: f32, draw: &mut DrawList) -> TickOutcome {
    let mut outcome = begin_tick(state, input, draw);
    end_tick(state, &mut outcome, elapsed_ms, draw);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::{Color, DrawCommand};
    use crate::sim::Explosion;
    use crate::sim::state::GamePhase;

    const DT: f32 = 1000.0 / TICK_RATE_HZ as f32;

    #[test]
    fn test_pointer_moves_crosshair() {
        let mut state = GameState::new(1);
        let mut draw = DrawList::new();
        let input = TickInput {
            pointer: Some(Vec2::new(320.0, 240.0)),
            ..Default::default()
        };
        tick(&mut state, &input, DT, &mut draw);
        assert_eq!(state.crosshair.target(), Vec2::new(320.0, 240.0));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_fire_then_move_same_tick() {
        let mut state = GameState::new(1);
        let mut draw = DrawList::new();
        let input = TickInput {
            fire: vec![Vec2::new(482.0, 100.0), Vec2::new(482.0, 100.0)],
            ..Default::default()
        };
        let outcome = tick(&mut state, &input, DT, &mut draw);
        assert_eq!(outcome.fired, 2);
        assert_eq!(state.cities[1].missile_stock, CITY_MISSILE_STOCK - 2);
        // Both already took their first step
        for missile in &state.interceptors {
            assert_eq!(missile.pos, missile.origin + missile.vel);
        }
    }

    #[test]
    fn test_spawns_on_interval() {
        let mut state = GameState::new(9);
        let mut draw = DrawList::new();
        let input = TickInput::default();

        let mut spawns = Vec::new();
        for t in 0..1200u32 {
            if tick(&mut state, &input, DT, &mut draw).spawned.is_some() {
                spawns.push(t);
            }
            draw.clear();
        }
        // First spawn once 4000ms have accumulated, then every ~480 ticks
        assert_eq!(spawns.len(), 2);
        assert!((480..=481).contains(&spawns[0]));
        assert!(spawns[1] - spawns[0] >= 480);
    }

    #[test]
    fn test_one_escalation_per_tick() {
        let mut state = GameState::new(1);
        let mut draw = DrawList::new();
        state.score = 5_000;

        let mut escalations = 0;
        for _ in 0..10 {
            if tick(&mut state, &TickInput::default(), DT, &mut draw).escalation.is_some() {
                escalations += 1;
                assert!(escalations <= state.time_ticks);
            }
        }
        // Milestones 1, 2, 3, 4, 5 then stop
        assert_eq!(escalations, 5);
        assert_eq!(state.difficulty.last_milestone, 5);
    }

    #[test]
    fn test_game_over_freezes() {
        let mut state = GameState::new(1);
        let mut draw = DrawList::new();
        state.destroyed_cities = std::mem::take(&mut state.cities);
        state.advance_clock(SPAWN_START_INTERVAL_MS);
        state.enemies.push(crate::sim::spawner::roll_enemy(&mut state.rng, 99, 960, 1.0));

        let outcome = tick(&mut state, &TickInput::default(), DT, &mut draw);
        assert!(outcome.game_over);
        assert_eq!(state.phase, GamePhase::GameOver);

        let frozen = state.enemies[0].pos;
        let ticks = state.time_ticks;
        let enemies = state.enemies.len();
        draw.clear();
        let input = TickInput {
            fire: vec![Vec2::new(100.0, 100.0)],
            ..Default::default()
        };
        tick(&mut state, &input, DT, &mut draw);
        assert_eq!(state.enemies[0].pos, frozen);
        assert_eq!(state.enemies.len(), enemies);
        assert_eq!(state.time_ticks, ticks);
        assert!(state.interceptors.is_empty());
        assert!(draw.texts().contains(&"GAME OVER."));
    }

    #[test]
    fn test_last_city_falling_shows_game_over_same_tick() {
        let mut state = GameState::new(1);
        let survivor = state.cities.remove(0);
        state.destroyed_cities = std::mem::take(&mut state.cities);
        state.explosions.push(Explosion::new(survivor.rect.center()));
        state.cities.push(survivor);

        let mut draw = DrawList::new();
        let outcome = tick(&mut state, &TickInput::default(), DT, &mut draw);
        assert!(outcome.game_over);
        assert_eq!(outcome.frame.cities_lost, 1);

        // Gameplay frame first, then the game-over screen painted over it
        let fill = draw
            .commands
            .iter()
            .position(|cmd| *cmd == DrawCommand::Fill(Color::BLACK));
        assert!(fill.is_some_and(|idx| idx > 0));
        let texts = draw.texts();
        assert_eq!(&texts[texts.len() - 2..], ["GAME OVER.", "Score: 0"]);
    }

    #[test]
    fn test_end_tick_credits_duration_after_frame() {
        let mut state = GameState::new(1);
        let mut draw = DrawList::new();
        state.advance_clock(SPAWN_START_INTERVAL_MS - 1.0);

        // Not due yet when the frame runs; due by the next tick
        let mut outcome = begin_tick(&mut state, &TickInput::default(), &mut draw);
        assert_eq!(outcome.spawned, None);
        end_tick(&mut state, &mut outcome, 1.0, &mut draw);
        assert_eq!(state.time_ticks, 1);

        let outcome = begin_tick(&mut state, &TickInput::default(), &mut draw);
        assert!(outcome.spawned.is_some());
    }
}
