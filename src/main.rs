//! Headless driver for the life3d engine
//!
//! Runs a fixed number of simulated 60 Hz frames and logs what happens.
//! Each command-line argument is applied as one command before the run,
//! e.g. `life3d "rule 4/4/5" "speed 30"`.
//!
//! Configuration comes from `LIFE3D_*` environment variables; `LIFE3D_FRAMES`
//! sets the number of frames (default 600). Use `RUST_LOG=debug` for detail.

use anyhow::{Context, Result};
use log::info;

use life3d::prelude::*;

const FRAME_DELTA: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 600;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EngineConfig::from_env().context("Failed to load configuration")?;
    let frames = match std::env::var("LIFE3D_FRAMES") {
        Ok(value) => value
            .trim()
            .parse::<u32>()
            .with_context(|| format!("Invalid LIFE3D_FRAMES '{value}'"))?,
        Err(_) => DEFAULT_FRAMES,
    };

    let mut manager = SimulationManager::new(&config).context("Failed to create engine")?;

    for arg in std::env::args().skip(1) {
        let command: Command = arg
            .parse()
            .with_context(|| format!("Invalid command '{arg}'"))?;
        manager
            .apply(command)
            .with_context(|| format!("Command '{arg}' rejected"))?;
    }

    info!(
        "Running {} frames of a {}^3 grid, rule {}",
        frames,
        manager.engine().size(),
        manager.engine().rule()
    );

    for frame in 1..=frames {
        manager.frame(FRAME_DELTA);
        if frame % 60 == 0 {
            let snapshot = manager.snapshot();
            info!(
                "frame {:>5}  generation {:>5}  population {:>7}  visible {:>7}",
                frame,
                snapshot.generation(),
                snapshot.population(),
                snapshot.visible().count()
            );
        }
    }

    let metrics = manager.performance().get_metrics();
    info!(
        "Done: {} frames, {} ticks, {:.1} ticks/s simulated",
        metrics.total_frames, metrics.total_ticks, metrics.ticks_per_second
    );

    Ok(())
}
