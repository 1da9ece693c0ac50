//! Ball Clock entry point
//!
//! Headless native driver: runs the render loop against a stepped clock and
//! logs what each frame would draw. A real front end replaces the sink with
//! its own rasterizer and feeds touch/tilt through `SharedState`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ball_clock::Settings;
use ball_clock::platform::{FrameClock, RenderLoop, SharedState, SteppedClock, SystemClock};
use ball_clock::renderer::{CircleInstance, as_bytes};
use ball_clock::sim::{DemoState, TickStats};

#[derive(Debug, Parser)]
#[command(name = "ball-clock", about = "Countdown clock made of bouncing balls")]
struct Cli {
    /// JSON settings file (defaults are used for anything it leaves out)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frames to run before exiting
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Display density multiplier for every pixel setting
    #[arg(long, default_value_t = 1.0)]
    density: f32,

    /// Simulated touch as `x,y`; may be repeated
    #[arg(long = "touch", value_parser = parse_point)]
    touches: Vec<(f32, f32)>,

    /// Use the wall clock instead of fixed 16 ms frames
    #[arg(long)]
    realtime: bool,

    /// Print the default settings as JSON and exit
    #[arg(long)]
    print_defaults: bool,
}

fn parse_point(s: &str) -> Result<(f32, f32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{}`", s))?;
    let x = x.trim().parse().map_err(|e| format!("bad x: {}", e))?;
    let y = y.trim().parse().map_err(|e| format!("bad y: {}", e))?;
    Ok((x, y))
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }
    if cli.density != 1.0 {
        settings = settings.scaled(cli.density);
    }
    settings.validate().context("validating settings")?;
    Ok(settings)
}

/// Logs a summary line once per simulated second
fn log_sink(frame: u64, circles: &[CircleInstance], stats: &TickStats) {
    if stats.ejected > 0 || frame % 60 == 0 {
        log::info!(
            "frame {}: {} circles ({} bytes), ejected {}, pruned {}, collisions {}",
            frame,
            circles.len(),
            as_bytes(circles).len(),
            stats.ejected,
            stats.pruned,
            stats.collisions
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.print_defaults {
        println!("{}", Settings::default().to_json()?);
        return Ok(());
    }

    let settings = load_settings(&cli)?;
    log::info!("Ball Clock (native) starting, seed {}", settings.seed);

    let state = DemoState::new(settings).context("building clock font")?;
    let shared = SharedState::new(state);
    shared.on_surface_resize(cli.width, cli.height);
    for &(x, y) in &cli.touches {
        let spawned = shared.on_touch(x, y);
        log::info!("Touch at ({}, {}) spawned {} balls", x, y, spawned);
    }

    let frames = if cli.realtime {
        RenderLoop::spawn(shared.clone(), SystemClock, log_sink, Some(cli.frames))
            .context("starting render loop")?
            .wait()
    } else {
        let clock = SteppedClock::new(SystemClock.now_millis(), 16);
        RenderLoop::spawn(shared.clone(), clock, log_sink, Some(cli.frames))
            .context("starting render loop")?
            .wait()
    };

    let remaining = shared.with(|s| s.animations.len());
    log::info!("Done: {} frames, {} balls still in flight", frames, remaining);
    Ok(())
}
