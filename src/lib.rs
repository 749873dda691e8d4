//! Tick Profiler
//!
//! Hierarchical execution-time profiling for periodic loops.
//!
//! Instrumented code brackets each tick with `start_tick`/`end_tick` and
//! nested regions with `push`/`pop`. Every region is aggregated by its full
//! call path across all ticks, then exported as a JSON tree annotated with
//! percentages of parent and root.
//!
//! ## Getting Started
//!
//! ```ignore
//! use tick_profiler::recorder::{MonotonicClock, TickRecorder, MICROS_PER_MILLI};
//! use tick_profiler::output::{save_profile, DirectoryDestination, FixedName};
//!
//! let mut recorder = TickRecorder::new(MonotonicClock::new(), MICROS_PER_MILLI)?;
//! loop {
//!     recorder.start_tick()?;
//!     recorder.push("drive")?;
//!     // ... work ...
//!     recorder.pop()?;
//!     recorder.end_tick()?;
//! }
//! save_profile(&recorder, &FixedName("match".into()), &DirectoryDestination::new("logs"))?;
//! ```

pub mod commands;
pub mod export;
pub mod output;
pub mod recorder;
pub mod utils;
