//! Asteroid Field headless driver
//!
//! Runs a scripted autopilot through the simulation with no renderer
//! attached. Usage: `asteroid-field [config.json]`

#[cfg(not(target_arch = "wasm32"))]
use asteroid_field::FieldConfig;
#[cfg(not(target_arch = "wasm32"))]
use asteroid_field::consts::*;
#[cfg(not(target_arch = "wasm32"))]
use asteroid_field::sim::{InputEvent, Session, SessionPhase, Signal};

/// Stop after this many simulated ticks even if lives remain
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = 50_000;

/// Length of one autopilot manoeuvre cycle
#[cfg(not(target_arch = "wasm32"))]
const PATTERN_TICKS: u64 = 120;

/// Feed the session a fixed turn / thrust / fire pattern
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(session: &mut Session, tick: u64) {
    let event = match tick % PATTERN_TICKS {
        0 => Some(InputEvent::pull(Signal::Clockwise, TURN_STRENGTH)),
        20 => Some(InputEvent::Stop(Signal::Clockwise)),
        40 => Some(InputEvent::pull(Signal::Accelerate, THRUST_STRENGTH)),
        55 => Some(InputEvent::Stop(Signal::Accelerate)),
        80 => Some(InputEvent::pull(Signal::CounterClockwise, TURN_HELD_STRENGTH)),
        90 => Some(InputEvent::Stop(Signal::CounterClockwise)),
        100 => Some(InputEvent::pull(Signal::Accelerate, -THRUST_STRENGTH)),
        110 => Some(InputEvent::Stop(Signal::Accelerate)),
        _ => None,
    };
    if let Some(event) = event {
        session.push_input(event);
    }

    // Respawns and restarts drop the trigger, so keep squeezing it
    if tick % 30 == 0 {
        session.push_input(InputEvent::pull(Signal::Shoot, SHOT_HELD_STRENGTH));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroid Field (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => match FieldConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}; using defaults", path, e);
                FieldConfig::default()
            }
        },
        None => FieldConfig::default(),
    };
    log::info!(
        "Field {}x{} cell {} seed {:#x}",
        config.width,
        config.height,
        config.cell_size,
        config.seed
    );

    let mut session = Session::new(&config);
    let mut ticks = 0;
    while ticks < MAX_TICKS {
        match session.phase {
            SessionPhase::Paused => {
                session.toggle_pause();
            }
            SessionPhase::Complete => {
                log::info!("Level {} cleared, score {}", session.level, session.score);
                session.toggle_pause();
                continue;
            }
            SessionPhase::Over => break,
            SessionPhase::Running => {}
        }

        autopilot(&mut session, ticks);
        if let Some(result) = session.step() {
            log::trace!(
                "tick {}: {} visuals, {} sounds",
                ticks,
                result.visuals.len(),
                result.sounds.len()
            );
        }
        ticks += 1;
    }

    if session.phase != SessionPhase::Over {
        log::warn!("Tick cap of {} reached with the game still running", MAX_TICKS);
    }
    println!(
        "Reached level {} with score {} in {}s ({} lives left)",
        session.level,
        session.score,
        session.play_time(),
        session.controller.ship.lives
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation core is a library on the web; the host page drives it
}
