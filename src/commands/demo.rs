//! Demo command implementation.
//!
//! The demo command:
//! 1. Runs a synthetic periodic loop under the profiler
//! 2. Saves the profile next to where the run's log would go
//! 3. Optionally prints the text report

use super::models::DemoArgs;
use crate::export::format_report;
use crate::output::{read_profile, save_profile, DirectoryDestination, FixedName, LogFileNaming, OutputNaming};
use crate::recorder::{section, MonotonicClock, Profiler, TickRecorder};
use crate::utils::config::{DEFAULT_TIME_DIVISOR, DEFAULT_TIME_UNIT};
use crate::utils::error::ProfilerError;
use anyhow::{Context, Result};
use log::{debug, info};
use std::hint::black_box;
use std::path::PathBuf;
use std::time::Instant;

/// Subsystems updated every tick, with their relative cost
const SUBSYSTEMS: &[(&str, u32)] = &[("drive", 40), ("shooter", 15), ("climber", 5)];

/// Vision only runs every few ticks, so its visit count differs from the rest
const VISION_PERIOD: usize = 3;

/// Execute the demo command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Path of the saved profile
pub fn execute_demo(args: DemoArgs) -> Result<PathBuf> {
    let start_time = Instant::now();

    validate_args(&args)?;

    info!("Step 1/3: Running {} ticks...", args.ticks);
    let mut recorder = TickRecorder::new(MonotonicClock::new(), DEFAULT_TIME_DIVISOR)?;
    let mut checksum = 0.0;
    for tick in 0..args.ticks {
        checksum += run_tick(&mut recorder, tick, args.ticks, args.work_scale)
            .with_context(|| format!("Profiler misuse in tick {}", tick))?;
    }
    debug!("Workload checksum: {}", checksum);
    debug!("Recorded {} distinct regions", recorder.stats().len());

    info!("Step 2/3: Saving profile...");
    let naming: Box<dyn OutputNaming> = match &args.name {
        Some(name) => Box::new(FixedName(name.clone())),
        None => {
            let mut naming = LogFileNaming::started_at(chrono::Local::now());
            if let Some(match_text) = &args.match_text {
                naming = naming.with_match_text(match_text.clone());
            }
            Box::new(naming)
        }
    };
    let destination = DirectoryDestination::new(&args.output_dir);
    let name = save_profile(&recorder, naming.as_ref(), &destination)
        .context("Failed to save profile")?;
    let path = destination.path_for(&name);

    info!("✓ Profile written to: {}", path.display());

    if args.print_summary {
        info!("Step 3/3: Printing report...");
        let profile = read_profile(&path).context("Failed to read back saved profile")?;
        println!("\n{}", "=".repeat(80));
        println!("PROFILE SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Ticks:   {}", args.ticks);
        println!("Regions: {}", profile.node_count());
        println!("\n{}", format_report(&profile, DEFAULT_TIME_UNIT, 4));
        println!("{}", "=".repeat(80));
    } else {
        info!("Step 3/3: Skipping report (not requested)");
    }

    let elapsed = start_time.elapsed();
    info!("Demo completed in {:.2}s", elapsed.as_secs_f64());

    Ok(path)
}

/// One pass of the synthetic robot loop
///
/// **Public** - instrumented against `dyn Profiler` so it runs with profiling off too
pub fn run_tick(
    profiler: &mut dyn Profiler,
    tick: usize,
    total_ticks: usize,
    work_scale: u32,
) -> Result<f64, ProfilerError> {
    let mut checksum = 0.0;
    profiler.start_tick()?;

    profiler.push("scheduler")?;
    profiler.push("subsystems")?;
    for (name, cost) in SUBSYSTEMS {
        checksum += section(profiler, name, |_| busy_work(cost * work_scale))?;
    }
    if tick % VISION_PERIOD == 0 {
        checksum += section(profiler, "vision", |_| busy_work(60 * work_scale))?;
    }
    profiler.pop()?;

    profiler.push("commands")?;
    let mode = if tick < total_ticks / 2 { "autonomous" } else { "teleop" };
    checksum += section(profiler, mode, |p| {
        section(p, "planner", |_| busy_work(20 * work_scale))
    })??;
    profiler.pop()?;
    profiler.pop()?;

    checksum += section(profiler, "telemetry", |_| busy_work(10 * work_scale))?;

    profiler.end_tick()?;
    Ok(checksum)
}

/// Deterministic CPU work the optimizer cannot remove
fn busy_work(units: u32) -> f64 {
    (0..units * 100).fold(0.0, |acc, i| acc + black_box(f64::from(i)).sqrt())
}

/// Validate demo arguments
///
/// **Public** - can be called before execute_demo for early validation
pub fn validate_args(args: &DemoArgs) -> Result<()> {
    if args.ticks == 0 {
        anyhow::bail!("ticks must be greater than 0");
    }

    if args.ticks > 1_000_000 {
        anyhow::bail!("ticks is too large (max 1000000)");
    }

    if args.work_scale == 0 {
        anyhow::bail!("work_scale must be greater than 0");
    }

    if args.output_dir.as_os_str().is_empty() {
        anyhow::bail!("Output directory cannot be empty");
    }

    for (label, value) in [("name", &args.name), ("match text", &args.match_text)] {
        if let Some(value) = value {
            if value.is_empty() {
                anyhow::bail!("{} cannot be empty", label);
            }
            if value.contains(|c: char| c == '/' || c == '\\') {
                anyhow::bail!("{} cannot contain path separators", label);
            }
        }
    }

    Ok(())
}
