//! Instrumentation surface shared by the real recorder and the disabled one.
//!
//! Instrumented code takes `&mut dyn Profiler`, so profiling can be switched
//! off by handing it a [`NoopProfiler`] instead of a [`TickRecorder`].

use super::clock::Clock;
use super::tick_recorder::TickRecorder;
use crate::utils::error::ProfilerError;

/// Stack-discipline instrumentation calls
pub trait Profiler {
    fn start_tick(&mut self) -> Result<(), ProfilerError>;
    fn end_tick(&mut self) -> Result<(), ProfilerError>;
    fn push(&mut self, segment: &str) -> Result<(), ProfilerError>;
    fn pop(&mut self) -> Result<(), ProfilerError>;
}

impl<C: Clock> Profiler for TickRecorder<C> {
    fn start_tick(&mut self) -> Result<(), ProfilerError> {
        TickRecorder::start_tick(self)
    }

    fn end_tick(&mut self) -> Result<(), ProfilerError> {
        TickRecorder::end_tick(self)
    }

    fn push(&mut self, segment: &str) -> Result<(), ProfilerError> {
        TickRecorder::push(self, segment)
    }

    fn pop(&mut self) -> Result<(), ProfilerError> {
        TickRecorder::pop(self)
    }
}

/// Profiler that accepts every call and records nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProfiler;

impl Profiler for NoopProfiler {
    fn start_tick(&mut self) -> Result<(), ProfilerError> {
        Ok(())
    }

    fn end_tick(&mut self) -> Result<(), ProfilerError> {
        Ok(())
    }

    fn push(&mut self, _segment: &str) -> Result<(), ProfilerError> {
        Ok(())
    }

    fn pop(&mut self) -> Result<(), ProfilerError> {
        Ok(())
    }
}

/// Time `f` as the region `segment`.
///
/// The region is popped only when `f` returns; a panic inside `f` leaves it
/// open and the following `end_tick` reports the imbalance.
pub fn section<R>(
    profiler: &mut dyn Profiler,
    segment: &str,
    f: impl FnOnce(&mut dyn Profiler) -> R,
) -> Result<R, ProfilerError> {
    profiler.push(segment)?;
    let result = f(&mut *profiler);
    profiler.pop()?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::path::from_segments;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_section_records_nested_regions() {
        let time = Rc::new(Cell::new(0_i64));
        let handle = Rc::clone(&time);
        let mut recorder = TickRecorder::new(move || handle.get(), 1.0).unwrap();

        recorder.start_tick().unwrap();
        let value = section(&mut recorder, "outer", |p| {
            section(p, "inner", |_| {
                time.set(time.get() + 3);
                42
            })
        })
        .unwrap()
        .unwrap();
        recorder.end_tick().unwrap();

        assert_eq!(value, 42);
        let inner = recorder
            .get(&from_segments(&["root", "outer", "inner"]))
            .unwrap();
        assert_eq!(inner.total_time, 3);
        assert_eq!(recorder.get(&from_segments(&["root", "outer"])).unwrap().total_time, 3);
    }

    #[test]
    fn test_noop_accepts_anything() {
        let mut profiler = NoopProfiler;
        assert!(profiler.pop().is_ok());
        assert!(profiler.end_tick().is_ok());
        assert!(section(&mut profiler, "anything", |_| ()).is_ok());
    }
}
