//! Tilecast - Headless runner
//!
//! Loads a level and settings, then drives the simulation for a fixed
//! number of frames with a seeded random walk and a slowly turning aim.
//!
//! Usage:
//!   tilecast --map level.json --frames 600
//!   RUST_LOG=debug tilecast --seed 7

use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tilecast::game::IntervalTimer;
use tilecast::world::TileLegend;
use tilecast::{FrameInput, LevelMap, Settings, Simulation, Vec2};

/// Frames between changes of walking direction
const WALK_SPAN: u64 = 30;

/// Aim rotation per frame, radians
const AIM_TURN: f32 = 0.02;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level file (JSON with a "map" array of rows); uses a built-in level if omitted
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Settings file (RON); defaults to the user config location
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Number of frames to run
    #[arg(short, long, default_value = "600")]
    frames: u64,

    /// Seed for the random walk
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Sleep to the target frame rate instead of running flat out
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("Starting Tilecast v{}", env!("CARGO_PKG_VERSION"));

    let settings_path = args.settings.clone().unwrap_or_else(Settings::config_path);
    let settings = Settings::load_or_default(&settings_path);

    let level = match &args.map {
        Some(path) => LevelMap::load(path, settings.tile_size, &TileLegend::default())
            .with_context(|| format!("loading level {}", path.display()))?,
        None => {
            log::info!("No level given, using the built-in test level");
            LevelMap::test_map(settings.tile_size)?
        }
    };
    log::info!("Level is {}x{} with {} walls", level.width, level.height, level.wall_count());

    let mut sim = Simulation::new(settings, level).context("starting simulation")?;
    run(&mut sim, &args)?;

    log::info!("Tilecast shut down cleanly");
    Ok(())
}

/// Frame loop
fn run(sim: &mut Simulation, args: &Args) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    // One summary per second of frames
    let mut summary = IntervalTimer::every_frames(sim.settings().fps, sim.settings());
    let frame_time = sim.settings().frame_time();

    let mut movement = Vec2::ZERO;
    let mut aim = 0.0f32;
    let mut failed = 0u64;
    let mut last_frame = Instant::now();

    for frame in 0..args.frames {
        if frame % WALK_SPAN == 0 {
            movement = random_direction(&mut rng);
        }
        aim += AIM_TURN;

        // Wall time in realtime mode, an ideal frame otherwise
        let delta = if args.realtime {
            let now = Instant::now();
            let delta = now.duration_since(last_frame);
            last_frame = now;
            delta
        } else {
            frame_time
        };

        let center = sim.player_center()?;
        let input = FrameInput::new(movement, center + Vec2::from_angle(aim) * 32.0);

        match sim.step(&input, delta) {
            Ok(output) => {
                if output.blocked > 0 {
                    log::debug!("Frame {}: {} bodies blocked", output.frame, output.blocked);
                }
                if summary.advance(delta) > 0 {
                    let position = sim.player_position()?;
                    log::info!(
                        "Frame {}: player at ({:.1}, {:.1}), light reach {:.1}",
                        output.frame,
                        position.x,
                        position.y,
                        output.shadow.reach()
                    );
                }
            }
            Err(e) => {
                failed += 1;
                log::warn!("Skipping frame {}: {}", frame, e);
            }
        }

        if args.realtime {
            let spent = last_frame.elapsed();
            if spent < frame_time {
                thread::sleep(frame_time - spent);
            }
        }
    }

    log::info!(
        "Ran {} frames ({} skipped) over {:.1}s, {} summaries",
        sim.frame(),
        failed,
        summary.total().as_secs_f32(),
        summary.periods()
    );
    Ok(())
}

/// One of the eight compass directions, or standing still
fn random_direction(rng: &mut impl Rng) -> Vec2 {
    let x = rng.gen_range(-1..=1) as f32;
    let y = rng.gen_range(-1..=1) as f32;
    Vec2::new(x, y)
}
