//! Stack-discipline recorder accumulating per-path timing statistics.
//!
//! A tick is one pass of the periodic loop:
//! 1. `start_tick` opens the implicit `root` frame
//! 2. `push`/`pop` pairs time nested regions
//! 3. `end_tick` closes `root` and checks every push was popped
//!
//! Every closed frame is folded into the record for its full path key, so
//! repeated visits across ticks share a single [`LocatedStats`].

use super::clock::Clock;
use super::path;
use super::stats::LocatedStats;
use crate::utils::config::ROOT_SEGMENT;
use crate::utils::error::{ProfilerError, StateViolation};
use log::{debug, warn};
use std::collections::HashMap;

/// One open region on the call stack
#[derive(Debug)]
struct Frame {
    /// Full path key of this frame
    path: String,

    /// Raw clock reading taken when the frame was pushed
    entered_at: i64,
}

/// Hierarchical tick profiler state.
///
/// Single writer only: no internal locking, callers serialize access.
pub struct TickRecorder<C: Clock> {
    clock: C,
    time_divisor: f64,
    tick_active: bool,
    stack: Vec<Frame>,
    stats: HashMap<String, LocatedStats>,
}

impl<C: Clock> TickRecorder<C> {
    /// Create a recorder reading `clock` and exporting times divided by `time_divisor`
    ///
    /// # Errors
    /// * `ProfilerError::InvalidDivisor` - divisor is zero, negative or not finite
    pub fn new(clock: C, time_divisor: f64) -> Result<Self, ProfilerError> {
        if !time_divisor.is_finite() || time_divisor <= 0.0 {
            return Err(ProfilerError::InvalidDivisor(time_divisor));
        }

        Ok(Self {
            clock,
            time_divisor,
            tick_active: false,
            stack: Vec::new(),
            stats: HashMap::new(),
        })
    }

    /// Begin a tick and open the implicit root frame
    pub fn start_tick(&mut self) -> Result<(), ProfilerError> {
        if self.tick_active {
            return Err(StateViolation::TickAlreadyStarted.into());
        }

        self.stack.clear();
        self.tick_active = true;
        self.open_frame(ROOT_SEGMENT.to_string());
        Ok(())
    }

    /// Close the innermost frame and end the tick.
    ///
    /// The implicit pop is recorded like any other. If frames remain open
    /// after it, they are discarded unrecorded; the recorder is idle
    /// afterwards either way, so the next `start_tick` starts clean.
    ///
    /// # Errors
    /// * `TickAlreadyEnded` - no tick is active
    /// * `UnbalancedPushPop` - frames were still open after the implicit pop
    pub fn end_tick(&mut self) -> Result<(), ProfilerError> {
        if !self.tick_active {
            return Err(StateViolation::TickAlreadyEnded.into());
        }
        self.tick_active = false;

        let closed = self.current_path().to_string();
        self.close_frame()?;

        let open_frames = self.stack.len();
        if open_frames > 0 {
            warn!(
                "Tick ended with {} frame(s) still open after closing {}",
                open_frames,
                path::display(&closed)
            );
            self.stack.clear();
            return Err(StateViolation::UnbalancedPushPop { open_frames }.into());
        }

        Ok(())
    }

    /// Open a nested region named `segment`
    ///
    /// # Errors
    /// * `PushOutsideTick` - no tick is active
    /// * `MalformedSegment` - segment contains the path separator; the stack is unchanged
    pub fn push(&mut self, segment: &str) -> Result<(), ProfilerError> {
        if !self.tick_active {
            return Err(StateViolation::PushOutsideTick(segment.to_string()).into());
        }
        path::validate_segment(segment)?;

        let key = path::join(self.current_path(), segment);
        self.open_frame(key);
        Ok(())
    }

    /// Close the innermost region and fold its elapsed time into its record
    ///
    /// # Errors
    /// * `PopOutsideTick` - no tick is active
    /// * `PopWithoutPush` - only the implicit root frame is open
    pub fn pop(&mut self) -> Result<(), ProfilerError> {
        if !self.tick_active {
            return Err(StateViolation::PopOutsideTick.into());
        }
        if self.depth() == 0 {
            return Err(StateViolation::PopWithoutPush.into());
        }

        self.close_frame()
    }

    fn open_frame(&mut self, path: String) {
        let entered_at = self.clock.now();
        self.stack.push(Frame { path, entered_at });
    }

    fn close_frame(&mut self) -> Result<(), ProfilerError> {
        let now = self.clock.now();
        let frame = self.stack.pop().ok_or(StateViolation::PopWithoutPush)?;
        let elapsed = now.saturating_sub(frame.entered_at);

        // The popped frame owns its key, so a hit costs no allocation.
        self.stats.entry(frame.path).or_default().record(elapsed);
        Ok(())
    }

    /// Whether a tick is in progress
    pub fn is_tick_active(&self) -> bool {
        self.tick_active
    }

    /// Open user regions, not counting the implicit root frame
    pub fn depth(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    /// Path key of the innermost open frame, empty when idle
    pub fn current_path(&self) -> &str {
        self.stack.last().map(|f| f.path.as_str()).unwrap_or("")
    }

    pub fn time_divisor(&self) -> f64 {
        self.time_divisor
    }

    /// Live statistics table
    pub fn stats(&self) -> &HashMap<String, LocatedStats> {
        &self.stats
    }

    /// Record for one path key, if it has been popped at least once
    pub fn get(&self, key: &str) -> Option<&LocatedStats> {
        self.stats.get(key)
    }

    /// Full copy of the statistics table, safe to export while ticks continue
    pub fn snapshot(&self) -> HashMap<String, LocatedStats> {
        self.stats.clone()
    }

    /// Drop every accumulated record
    ///
    /// # Errors
    /// * `TickAlreadyStarted` - called in the middle of a tick
    pub fn reset(&mut self) -> Result<(), ProfilerError> {
        if self.tick_active {
            return Err(StateViolation::TickAlreadyStarted.into());
        }
        debug!("Clearing {} profiler records", self.stats.len());
        self.stats.clear();
        Ok(())
    }
}
