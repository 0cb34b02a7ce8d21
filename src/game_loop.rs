//! Game loop orchestration
//!
//! Drains input, runs the frame pass, replays it onto the canvas, then
//! throttles to the configured tick rate and credits the measured time to
//! that same tick. Once the last city falls the loop keeps the game-over
//! screen up for a fixed hold, counted down tick by tick, then exits.

use std::time::{Duration, Instant};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::renderer::{Canvas, DrawList, SpriteSheet, replay};
use crate::settings::Settings;
use crate::sim::{GameState, TickInput, begin_tick, end_tick};

/// Decoded input events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window closed
    Quit,
    EscapePressed,
    /// Pointer pressed at the given position
    FirePressed(Vec2),
}

/// Source of decoded input (device layer, script, or autopilot)
pub trait InputSource {
    /// Current pointer position, polled once per tick
    fn pointer_position(&mut self) -> Vec2;

    /// Events since the last poll. The state is only there for scripted
    /// sources; device-backed sources ignore it.
    fn poll_events(&mut self, state: &GameState) -> Vec<InputEvent>;
}

/// Frame timer: returns milliseconds since the previous call
pub trait FrameClock {
    fn tick(&mut self, rate_hz: u32) -> f32;
}

/// Wall-clock timer that sleeps to cap the loop at `rate_hz`
#[derive(Debug)]
pub struct GovernedClock {
    last: Instant,
}

impl Default for GovernedClock {
    fn default() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl FrameClock for GovernedClock {
    fn tick(&mut self, rate_hz: u32) -> f32 {
        let budget = Duration::from_secs_f64(1.0 / f64::from(rate_hz.max(1)));
        let spent = self.last.elapsed();
        if spent < budget {
            std::thread::sleep(budget - spent);
        }
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed.as_secs_f32() * 1000.0
    }
}

/// Simulated timer: every tick lasts exactly 1/rate seconds, no waiting
#[derive(Debug, Default)]
pub struct FixedStepClock;

impl FrameClock for FixedStepClock {
    fn tick(&mut self, rate_hz: u32) -> f32 {
        1000.0 / rate_hz.max(1) as f32
    }
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopExit {
    /// Quit or Escape
    Quit,
    /// Game over and the hold ran out
    GameOver,
    /// Headless tick limit reached
    TickLimit,
}

/// Final report of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    pub seed: u64,
    pub score: u64,
    pub ticks: u64,
    pub last_milestone: u32,
    pub cities_standing: usize,
    pub exit: LoopExit,
}

/// Owns the game state and drives it tick by tick
pub struct GameLoop {
    pub state: GameState,
    sprites: SpriteSheet,
    tick_rate_hz: u32,
    max_ticks: u64,
    /// Remaining game-over screen time
    hold_remaining_ms: f32,
    draw: DrawList,
    loop_ticks: u64,
}

impl GameLoop {
    /// Build a game from validated settings; missing sprites are fatal
    pub fn new(settings: &Settings) -> Result<Self, GameError> {
        settings.validate()?;
        let sprites = SpriteSheet::from_settings(settings)?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!(
            "New game: seed {}, display {}x{}, {} Hz",
            seed,
            settings.width,
            settings.height,
            settings.tick_rate_hz
        );
        Ok(Self {
            state: GameState::with_display(seed, settings.width, settings.height),
            sprites,
            tick_rate_hz: settings.tick_rate_hz,
            max_ticks: settings.max_ticks,
            hold_remaining_ms: settings.game_over_hold_ms,
            draw: DrawList::new(),
            loop_ticks: 0,
        })
    }

    /// Run one loop iteration: input, frame, present, then the frame clock.
    /// The clock's reading is credited to this same tick. Returns `Some`
    /// when the loop should stop.
    pub fn step<I, C, K>(&mut self, input: &mut I, canvas: &mut C, clock: &mut K) -> Option<LoopExit>
    where
        I: InputSource + ?Sized,
        C: Canvas + ?Sized,
        K: FrameClock + ?Sized,
    {
        let mut quit = false;
        let mut tick_input = TickInput::default();
        for event in input.poll_events(&self.state) {
            match event {
                InputEvent::Quit | InputEvent::EscapePressed => quit = true,
                InputEvent::FirePressed(pos) => tick_input.fire.push(pos),
            }
        }
        tick_input.pointer = Some(input.pointer_position());

        let was_over = self.state.is_game_over();

        self.draw.clear();
        let mut outcome = begin_tick(&mut self.state, &tick_input, &mut self.draw);
        replay(&self.draw, &self.sprites, canvas);

        let elapsed_ms = clock.tick(self.tick_rate_hz);
        self.draw.clear();
        end_tick(&mut self.state, &mut outcome, elapsed_ms, &mut self.draw);
        if !self.draw.is_empty() {
            // The game just ended: show its screen this iteration
            replay(&self.draw, &self.sprites, canvas);
        }
        self.loop_ticks += 1;

        if outcome.frame.points_awarded > 0 {
            log::debug!("Score {} (+{})", self.state.score, outcome.frame.points_awarded);
        }

        if quit {
            log::info!("Quit requested at score {}", self.state.score);
            return Some(LoopExit::Quit);
        }
        if was_over {
            self.hold_remaining_ms -= elapsed_ms;
            if self.hold_remaining_ms <= 0.0 {
                return Some(LoopExit::GameOver);
            }
        }
        if self.max_ticks > 0 && self.loop_ticks >= self.max_ticks {
            log::info!("Tick limit {} reached", self.max_ticks);
            return Some(LoopExit::TickLimit);
        }
        None
    }

    /// Run until quit, game over (after the hold), or the tick limit
    pub fn run<I, C, K>(&mut self, input: &mut I, canvas: &mut C, clock: &mut K) -> LoopExit
    where
        I: InputSource + ?Sized,
        C: Canvas + ?Sized,
        K: FrameClock + ?Sized,
    {
        loop {
            if let Some(exit) = self.step(input, canvas, clock) {
                return exit;
            }
        }
    }

    pub fn summary(&self, exit: LoopExit) -> GameSummary {
        GameSummary {
            seed: self.state.seed,
            score: self.state.score,
            ticks: self.state.time_ticks,
            last_milestone: self.state.difficulty.last_milestone,
            cities_standing: self.state.cities.len(),
            exit,
        }
    }
}
