//! Phase timing and the optional generation profiler.
//!
//! Each timed phase returns an opaque [`PhaseToken`] from [`start_phase`] that
//! must be handed to [`end_phase`]; stopping a phase that was never started is
//! unrepresentable. When timing is disabled both calls are no-ops and nothing
//! is written.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crate::diag::DiagSink;

/// Opaque handle to an in-flight timed phase.
#[derive(Debug)]
pub struct PhaseToken {
    start: Instant,
}

/// Start timing a phase. Returns `None` when timing is disabled, in which case
/// the matching [`end_phase`] emits nothing.
pub fn start_phase(enabled: bool) -> Option<PhaseToken> {
    enabled.then(|| PhaseToken {
        start: Instant::now(),
    })
}

/// Finish a timed phase, emitting one `"<label> <seconds>"` line to `diag`.
pub fn end_phase(token: Option<PhaseToken>, label: &str, diag: &DiagSink) -> io::Result<()> {
    if let Some(token) = token {
        let elapsed = token.start.elapsed();
        diag.line(&format!("{label} {:.6}s", elapsed.as_secs_f64()))?;
    }
    Ok(())
}

/// Cumulative per-label timing records for the profiled execution mode.
///
/// Single-threaded, like the rest of the run: records accumulate in a
/// `RefCell` and are reported once at the end of the pass.
#[derive(Debug, Default)]
pub struct Profiler {
    records: RefCell<HashMap<String, (u64, Duration)>>,
}

impl Profiler {
    pub fn new() -> Self {
        Profiler::default()
    }

    /// Run `f`, attributing its wall time to `label`.
    pub fn measure<T>(&self, label: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.record(label, start.elapsed());
        out
    }

    pub fn record(&self, label: &str, elapsed: Duration) {
        let mut records = self.records.borrow_mut();
        let entry = records
            .entry(label.to_string())
            .or_insert((0, Duration::ZERO));
        entry.0 += 1;
        entry.1 += elapsed;
    }

    /// Print the `top` entries sorted by cumulative time, descending.
    pub fn report(&self, diag: &DiagSink, top: usize) -> io::Result<()> {
        let records = self.records.borrow();
        let mut entries: Vec<(&String, &(u64, Duration))> = records.iter().collect();
        entries.sort_by(|a, b| b.1 .1.cmp(&a.1 .1).then_with(|| a.0.cmp(b.0)));

        diag.line("* Profile (top entries by cumulative time):")?;
        diag.line(&format!("  {:>12}  {:>8}  label", "cumulative", "calls"))?;
        for (label, (calls, total)) in entries.into_iter().take(top) {
            diag.line(&format!(
                "  {:>11.6}s  {calls:>8}  {label}",
                total.as_secs_f64()
            ))?;
        }
        Ok(())
    }
}
