//! Batch report aggregation.
//!
//! The orchestrator records one [`UnitOutcome`](crate::batch::UnitOutcome)
//! per discovered file into a [`BatchReport`]; the caller decides how to
//! surface the finished report (typically: non-zero exit when
//! [`BatchReport::is_success`] is false).

use std::fmt;
use std::time::Duration;

use serde_json::{json, Value};

use crate::batch::UnitOutcome;
use crate::error::UnitError;

/// Aggregated outcome of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    attempted: usize,
    compiled: usize,
    skipped: usize,
    failed: Vec<(String, UnitError)>,
    elapsed: Duration,
}

impl BatchReport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, name: String, outcome: UnitOutcome) {
        self.attempted += 1;
        match outcome {
            UnitOutcome::Compiled => self.compiled += 1,
            UnitOutcome::Skipped { .. } => self.skipped += 1,
            UnitOutcome::Failed { error } => self.failed.push((name, error)),
        }
    }

    pub(crate) fn finalize(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    /// Number of units the batch attempted (every discovered file).
    pub fn attempted(&self) -> usize {
        self.attempted
    }

    /// Number of units that compiled.
    pub fn compiled(&self) -> usize {
        self.compiled
    }

    /// Number of units skipped as up to date.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of units that compiled or were skipped.
    pub fn succeeded(&self) -> usize {
        self.compiled + self.skipped
    }

    /// Failed units with their errors, in discovery order.
    pub fn failed(&self) -> &[(String, UnitError)] {
        &self.failed
    }

    /// Wall-clock duration of the run.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Whether every attempted unit compiled or was skipped.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// One-line success summary.
    pub fn summary(&self) -> String {
        format!(
            "successfully compiled (or skipped) {} script(s) in {:.3}s",
            self.succeeded(),
            self.elapsed.as_secs_f64()
        )
    }

    /// Multi-line failure block: a header plus one relative path per line.
    ///
    /// Empty string when the run succeeded.
    pub fn failure_list(&self) -> String {
        self.render_failures(|s| s.to_owned())
    }

    /// [`failure_list`](Self::failure_list) with the failed paths painted
    /// red for terminal output.
    #[cfg(feature = "colored-diagnostics")]
    pub fn failure_list_colored(&self) -> String {
        use owo_colors::OwoColorize;
        self.render_failures(|s| s.red().to_string())
    }

    fn render_failures(&self, paint: impl Fn(&str) -> String) -> String {
        if self.failed.is_empty() {
            return String::new();
        }
        let mut out = format!("failed to compile {} script(s):", self.failed.len());
        for (name, _) in &self.failed {
            out.push('\n');
            out.push_str(&paint(name));
        }
        out
    }

    /// JSON projection of the report, for CI tooling.
    pub fn to_json(&self) -> Value {
        json!({
            "attempted": self.attempted,
            "compiled": self.compiled,
            "skipped": self.skipped,
            "failed": self
                .failed
                .iter()
                .map(|(name, error)| json!({ "path": name, "error": error.to_string() }))
                .collect::<Vec<_>>(),
            "elapsed_ms": self.elapsed.as_millis() as u64,
        })
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())?;
        if !self.is_success() {
            write!(f, "\n{}", self.failure_list())?;
        }
        Ok(())
    }
}
