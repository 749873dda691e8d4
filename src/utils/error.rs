//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Stack-discipline violations detected by the recorder
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateViolation {
    #[error("tick already started, missing end_tick()?")]
    TickAlreadyStarted,

    #[error("tick already ended, missing start_tick()?")]
    TickAlreadyEnded,

    #[error("cannot push '{0}' outside of a tick, missing start_tick()?")]
    PushOutsideTick(String),

    #[error("cannot pop outside of a tick, missing start_tick()?")]
    PopOutsideTick,

    #[error("pop without matching push")]
    PopWithoutPush,

    #[error("unbalanced push/pop: {open_frames} frame(s) still open at end_tick()")]
    UnbalancedPushPop { open_frames: usize },
}

/// Errors raised by the instrumentation surface
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfilerError {
    #[error("invalid profiler state: {0}")]
    InvalidState(StateViolation),

    #[error("segment {segment:?} contains the reserved path separator")]
    MalformedSegment { segment: String },

    #[error("time divisor must be finite and positive, got {0}")]
    InvalidDivisor(f64),
}

impl From<StateViolation> for ProfilerError {
    fn from(violation: StateViolation) -> Self {
        ProfilerError::InvalidState(violation)
    }
}

/// Errors that can occur while rebuilding and serializing the profile tree
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("record {path:?} has no parent record {parent:?}")]
    MissingParent { path: String, parent: String },

    #[error("no root record, no tick has completed yet")]
    MissingRoot,

    #[error("record {path:?} has a visit count of zero")]
    DivideByZero { path: String },

    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("no output name available for the profile")]
    NoDestination,

    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Failed to export profile: {0}")]
    Export(#[from] ExportError),
}
