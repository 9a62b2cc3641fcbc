//! Performance tracking.
//!
//! Code that wants to be measured asks [`CorePerformance`] for a tracker and stops it when done:
//!
//! ```
//! use jsonvalue::perf::{CorePerformance, TracingPerformance};
//!
//! let performance = CorePerformance::new();
//! performance.register_tracker(TracingPerformance);
//!
//! let tracker = performance.start("process");
//! // ... work ...
//! if let Some(tracker) = tracker {
//!     tracker.stop();
//! }
//! ```
//!
//! What happens to the measurements is up to the registered [`PerformanceTrackingSolution`].
//! With nothing registered, [`CorePerformance::start`] hands out no tracker at all.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use std::time::{Duration, Instant};

use tracing::*;

/// A single running measurement.
pub trait PerformanceTracker: Send {
    fn name(&self) -> &str;

    /// Ends the measurement and returns how long it ran.
    fn stop(self: Box<Self>) -> Duration;
}

/// A way of producing trackers, e.g. one that reports to a metrics backend.
pub trait PerformanceTrackingSolution: Send + Sync {
    fn start(&self, name: &str) -> Box<dyn PerformanceTracker>;
}

/// Entry point for performance measurements.
#[derive(Default)]
pub struct CorePerformance {
    solution: RwLock<Option<Arc<dyn PerformanceTrackingSolution>>>,
}

impl CorePerformance {
    pub fn new() -> Self {
        CorePerformance::default()
    }

    /// The process-wide instance.
    pub fn shared() -> &'static CorePerformance {
        static SHARED: OnceLock<CorePerformance> = OnceLock::new();
        SHARED.get_or_init(CorePerformance::new)
    }

    /// Replaces the registered solution.
    pub fn register_tracker(&self, solution: impl PerformanceTrackingSolution + 'static) {
        *self.solution.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(solution));
    }

    pub fn clear(&self) {
        *self.solution.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn start(&self, name: &str) -> Option<Box<dyn PerformanceTracker>> {
        // Clone the handle out so the solution runs without the lock held.
        let solution = self
            .solution
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        solution.map(|solution| solution.start(name))
    }
}

/// Emits each measurement as a `debug` level `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPerformance;

impl PerformanceTrackingSolution for TracingPerformance {
    fn start(&self, name: &str) -> Box<dyn PerformanceTracker> {
        trace!(tracker = name, "performance tracker started");
        Box::new(TracingTracker {
            name: name.to_owned(),
            started: Instant::now(),
        })
    }
}

struct TracingTracker {
    name: String,
    started: Instant,
}

impl PerformanceTracker for TracingTracker {
    fn name(&self) -> &str {
        &self.name
    }

    fn stop(self: Box<Self>) -> Duration {
        let elapsed = self.started.elapsed();
        debug!(
            tracker = %self.name,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "performance tracker stopped"
        );
        elapsed
    }
}
