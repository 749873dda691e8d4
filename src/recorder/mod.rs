//! Live instrumentation: call stack, state machine and running statistics.
//!
//! This module turns `start_tick`/`push`/`pop`/`end_tick` calls into a flat
//! table keyed by path key. The tree view is rebuilt later by `export`.

pub mod clock;
pub mod path;
pub mod profiler;
pub mod stats;
pub mod tick_recorder;

// Re-export main types
pub use clock::{Clock, MonotonicClock, MICROS_PER_MILLI};
pub use profiler::{section, NoopProfiler, Profiler};
pub use stats::LocatedStats;
pub use tick_recorder::TickRecorder;
