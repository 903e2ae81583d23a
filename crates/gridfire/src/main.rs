//! Headless gridfire run
//!
//! Usage: `gridfire [config.toml|config.ron]`
//!
//! Plays one game with a scripted avatar until it is decided or the tick
//! limit runs out, then logs the summary.

use gridfire::prelude::*;
use gridfire_engine::config::Config;
use gridfire_engine::foundation::logging;
use gridfire_engine::foundation::time::Stopwatch;

#[allow(clippy::cast_precision_loss)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let config = GameConfig::load_from_file(&path)?;
            logging::init(&config.engine.log_level);
            log::info!("Loaded configuration from {}", path);
            config
        }
        None => {
            let config = GameConfig::default();
            logging::init(&config.engine.log_level);
            log::info!("No configuration given, using defaults");
            config
        }
    };

    let mut game = Game::new(&config)?;
    let mut autopilot = Autopilot::for_arena(game.world().arena());
    let step = config.engine.fixed_timestep;
    let stopwatch = Stopwatch::start();

    log::info!(
        "Starting headless run: seed {}, step {:.4}s, limit {} ticks",
        config.simulation.seed,
        step,
        config.simulation.max_ticks
    );

    while game.ticks() < config.simulation.max_ticks {
        autopilot.drive(game.world_mut(), step);
        if game.tick(step)? != Outcome::InProgress {
            break;
        }
    }

    if game.outcome() == Outcome::InProgress {
        log::warn!("Tick limit reached without an outcome");
    }
    log::info!("{}", game.summary());
    log::info!(
        "Simulated {:.1}s of play in {:.3}s",
        game.ticks() as f32 * step,
        stopwatch.elapsed_secs()
    );

    Ok(())
}
