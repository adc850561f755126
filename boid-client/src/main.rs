use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use boid_client::{
    build_flock, load_settings, load_target_updates, parse_target, FrameDriver, RunOptions,
};
use boid_shared::Position;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless boid flock simulation", long_about = None)]
struct Args {
    /// JSON settings file (defaults are used for missing fields)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Number of boids, overrides the settings file
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// World width, overrides the settings file
    #[arg(long)]
    width: Option<f32>,

    /// World height, overrides the settings file
    #[arg(long)]
    height: Option<f32>,

    /// Seed for reproducible boid placement
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Fixed attraction target as X,Y
    #[arg(short, long, value_parser = parse_target)]
    target: Option<Position>,

    /// JSON lines of target updates, each `{"frame": N, "position": {"x": X, "y": Y} | null}`
    #[arg(long)]
    target_file: Option<PathBuf>,

    /// Start with the simulation paused
    #[arg(long)]
    start_paused: bool,

    /// Toggle play/pause before this frame (repeatable)
    #[arg(long = "toggle-at")]
    toggle_at: Vec<u64>,

    /// Write a frame report every K frames
    #[arg(short = 'k', long, default_value_t = 1)]
    report_every: u64,

    /// Output file for frame reports (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    if args.report_every == 0 {
        anyhow::bail!("--report-every must be at least 1");
    }

    let mut settings = load_settings(args.settings.as_deref())?;
    if let Some(count) = args.count {
        settings.count = count;
    }
    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    log::info!("Boid client starting...");
    log::info!(
        "World: {}x{}, boids: {}, seed: {:?}",
        settings.width,
        settings.height,
        settings.count,
        settings.seed
    );
    if let Some(target) = args.target {
        log::info!("Target: ({}, {})", target.x, target.y);
    }

    let target_updates = match &args.target_file {
        Some(path) => load_target_updates(path)?,
        None => Vec::new(),
    };
    if !target_updates.is_empty() {
        log::info!("Loaded {} target updates", target_updates.len());
    }

    let flock = build_flock(&settings).context("Failed to initialize flock")?;
    let options = RunOptions {
        frames: args.frames,
        target: args.target,
        target_updates,
        start_paused: args.start_paused,
        toggle_at: args.toggle_at.into_iter().collect::<BTreeSet<_>>(),
        report_every: args.report_every,
    };
    let mut driver = FrameDriver::new(flock, options);

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let status = driver.run(&mut out).context("Simulation error")?;
    log::info!(
        "Done: {} boids, {} ticks, playing: {}, target active: {}",
        status.boid_count,
        status.tick,
        status.playing,
        status.target_active
    );

    Ok(())
}
