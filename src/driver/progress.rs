use tracing::{debug, info};

use crate::domain::IndicatorCode;

/// Progress snapshot emitted after every evaluation attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Attempts finished so far, counting both successes and faults.
    pub completed: usize,

    /// Total attempts for the run: `|encounters| * |codes|`.
    pub total: usize,

    /// 1-based index of the encounter currently being processed.
    pub encounter_index: usize,

    /// Number of encounters in the run.
    pub encounter_total: usize,

    /// Identifier of the encounter currently being processed.
    pub encounter_id: String,

    /// Indicator just attempted.
    pub indicator: IndicatorCode,
}

impl Progress {
    /// Fraction of the run completed, in (0, 1]; the final attempt yields
    /// exactly 1.0.
    pub fn fraction(&self) -> f64 {
        self.completed as f64 / self.total as f64
    }

    /// Textual status for display, mirroring the per-encounter status line.
    pub fn status_line(&self) -> String {
        format!(
            "Processing encounter {}/{}: {}",
            self.encounter_index, self.encounter_total, self.encounter_id
        )
    }
}

/// Consumer of progress updates. Purely observational: implementations
/// must not fail the run and get no backpressure channel.
pub trait ProgressSink {
    fn report(&mut self, progress: &Progress);
}

/// Sink that discards all updates.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&mut self, _progress: &Progress) {}
}

/// Sink that logs via `tracing`: one info line per encounter, one debug
/// line per attempt.
#[derive(Debug, Default)]
pub struct LogProgress {
    last_encounter: usize,
}

impl LogProgress {
    pub fn new() -> Self {
        LogProgress::default()
    }
}

impl ProgressSink for LogProgress {
    fn report(&mut self, progress: &Progress) {
        if progress.encounter_index != self.last_encounter {
            self.last_encounter = progress.encounter_index;
            info!(
                encounter = progress.encounter_index,
                of = progress.encounter_total,
                id = %progress.encounter_id,
                "{}",
                progress.status_line()
            );
        }
        debug!(
            indicator = %progress.indicator,
            completed = progress.completed,
            total = progress.total,
            fraction = progress.fraction(),
            "evaluation attempt finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_reaches_exactly_one() {
        let progress = Progress {
            completed: 34,
            total: 34,
            encounter_index: 2,
            encounter_total: 2,
            encounter_id: "E-2".to_string(),
            indicator: IndicatorCode::Psi19,
        };

        assert_eq!(progress.fraction(), 1.0);
    }

    #[test]
    fn test_status_line() {
        let progress = Progress {
            completed: 1,
            total: 34,
            encounter_index: 1,
            encounter_total: 2,
            encounter_id: "A1".to_string(),
            indicator: IndicatorCode::Psi02,
        };

        assert_eq!(progress.status_line(), "Processing encounter 1/2: A1");
    }
}
