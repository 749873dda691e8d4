//! Configuration and constants for the profiler.

/// Separator joining path segments into a path key.
/// ASCII record separator, which never shows up in a readable region name.
pub const SEPARATOR: char = '\u{1e}';

/// Segment implicitly pushed at the start of every tick
pub const ROOT_SEGMENT: &str = "root";

/// Suffix appended to the base name of every saved profile
pub const PROFILE_SUFFIX: &str = "-profile.json";

/// Divisor used when none is given: `MonotonicClock` microseconds to milliseconds
pub const DEFAULT_TIME_DIVISOR: f64 = crate::recorder::clock::MICROS_PER_MILLI;

/// Unit label for times written with `DEFAULT_TIME_DIVISOR`
pub const DEFAULT_TIME_UNIT: &str = "ms";

// Log file naming scheme the profile output piggybacks on:
// Log_<yy-MM-dd_HH-mm-ss>[_<match text>]
pub const LOG_FILE_PREFIX: &str = "Log_";
pub const LOG_DATE_FORMAT: &str = "%y-%m-%d_%H-%M-%S";

/// Environment variable for the default output directory of the CLI
pub const OUTPUT_DIR_ENV: &str = "TICK_PROFILER_OUTPUT_DIR";
