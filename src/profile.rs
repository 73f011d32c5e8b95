//! Profiling hooks
//!
//! Opaque start/stop calls bracketing ingestion and aggregation. The engine
//! exposes nothing to a profiler beyond the wall-clock boundaries of that
//! phase.

use std::time::{Duration, Instant};

pub trait Profiler {
    fn start(&mut self);

    /// Stop and return the time elapsed since [`Profiler::start`]
    fn stop(&mut self) -> Duration;
}

/// Measures elapsed wall-clock time
#[derive(Debug, Default)]
pub struct WallClock {
    started: Option<Instant>,
}

impl WallClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Profiler for WallClock {
    fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    fn stop(&mut self) -> Duration {
        self.started
            .take()
            .map(|started| started.elapsed())
            .unwrap_or_default()
    }
}

/// Profiler that records nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProfiler;

impl Profiler for NoopProfiler {
    fn start(&mut self) {}

    fn stop(&mut self) -> Duration {
        Duration::ZERO
    }
}
