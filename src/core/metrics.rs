//! Logger metrics for observability
//!
//! Counts what happened to each emitted event: written, suppressed by quiet
//! mode, or lost to a failing sink.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use unklogger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_event();
/// metrics.record_written();
///
/// assert_eq!(metrics.events_emitted(), 1);
/// assert_eq!(metrics.lines_written(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Number of log calls processed
    events_emitted: AtomicU64,

    /// Number of lines a sink accepted
    lines_written: AtomicU64,

    /// Number of lines skipped because the logger was quiet
    lines_suppressed: AtomicU64,

    /// Number of lines a sink rejected
    write_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            events_emitted: AtomicU64::new(0),
            lines_written: AtomicU64::new(0),
            lines_suppressed: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_event(&self) {
        self.events_emitted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_written(&self) {
        self.lines_written.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_suppressed(&self) {
        self.lines_suppressed.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the failure count before this one
    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    pub fn events_emitted(&self) -> u64 {
        self.events_emitted.load(Ordering::Relaxed)
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written.load(Ordering::Relaxed)
    }

    pub fn lines_suppressed(&self) -> u64 {
        self.lines_suppressed.load(Ordering::Relaxed)
    }

    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Percentage of attempted writes that failed
    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures() as f64;
        let attempted = failed + self.lines_written() as f64;
        if attempted == 0.0 {
            0.0
        } else {
            failed / attempted * 100.0
        }
    }

    pub fn reset(&self) {
        self.events_emitted.store(0, Ordering::Relaxed);
        self.lines_written.store(0, Ordering::Relaxed);
        self.lines_suppressed.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
    }
}
