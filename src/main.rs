//! Missile Commander entry point
//!
//! Headless shell: no window or input devices are attached, so the
//! autopilot plays and frames are presented to a recording canvas.
//! Usage: `missile-commander [settings.json]`

use std::process::ExitCode;

use missile_commander::autopilot::Autopilot;
use missile_commander::game_loop::{FixedStepClock, FrameClock, GameLoop, GovernedClock};
use missile_commander::renderer::RecordingCanvas;
use missile_commander::{GameError, Settings};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Missile Commander starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), GameError> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut game = GameLoop::new(&settings)?;
    let mut input = Autopilot::new();
    let mut canvas = RecordingCanvas::new();
    let mut clock: Box<dyn FrameClock> = if settings.headless {
        Box::new(FixedStepClock)
    } else {
        Box::new(GovernedClock::default())
    };

    let exit = game.run(&mut input, &mut canvas, clock.as_mut());
    let summary = game.summary(exit);
    log::info!(
        "Finished ({:?}) after {} frames: score {}",
        exit,
        canvas.frames_presented,
        summary.score
    );

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Could not serialize summary: {e}"),
    }
    Ok(())
}
