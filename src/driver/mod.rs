pub mod progress;

pub use progress::{LogProgress, NullProgress, Progress, ProgressSink};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::{AnalysisRun, EncounterRecord, ErrorRecord, IndicatorCode, ResultRecord};
use crate::engine::RulesEngine;

/// Cooperative cancellation flag, polled between evaluation attempts.
///
/// Cloning shares the flag, so one token can be handed to a signal
/// handler or another thread while the driver polls it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Evaluate every (encounter, indicator) pair and aggregate the outcomes.
///
/// Encounters are processed in their given order, and each encounter is
/// evaluated against the codes in their given order, strictly
/// sequentially. Every pair produces exactly one record: a `ResultRecord`
/// when the engine classifies it, an `ErrorRecord` when the engine faults.
/// A per-pair fault never aborts the run.
///
/// `progress` receives exactly one update per attempt, with fractions
/// strictly increasing up to exactly 1.0. A run with zero attempts emits
/// no updates. When `cancel` is set the driver stops between pairs and
/// returns the partial run with `complete == false`.
pub fn run_analysis(
    encounters: &[EncounterRecord],
    codes: &[IndicatorCode],
    engine: &dyn RulesEngine,
    progress: &mut dyn ProgressSink,
    cancel: &CancelToken,
) -> AnalysisRun {
    let started_at = Utc::now();
    let total = encounters.len() * codes.len();

    info!(
        encounters = encounters.len(),
        indicators = codes.len(),
        total,
        "Starting analysis run"
    );

    let mut results = Vec::with_capacity(total);
    let mut errors = Vec::new();
    let mut completed = 0usize;
    let mut cancelled = false;

    'run: for (idx, encounter) in encounters.iter().enumerate() {
        let encounter_id = encounter.encounter_id(idx);

        for &code in codes {
            if cancel.is_cancelled() {
                cancelled = true;
                break 'run;
            }

            match engine.evaluate(encounter, code) {
                Ok(eval) => results.push(ResultRecord {
                    encounter_id: encounter_id.clone(),
                    indicator: code,
                    status: eval.status,
                    rationale: eval.rationale,
                }),
                Err(fault) => {
                    warn!(
                        encounter_id = %encounter_id,
                        indicator = %code,
                        error = %fault,
                        "Evaluation faulted"
                    );
                    errors.push(ErrorRecord {
                        encounter_id: encounter_id.clone(),
                        indicator: code,
                        error: fault.to_string(),
                    });
                }
            }

            completed += 1;
            progress.report(&Progress {
                completed,
                total,
                encounter_index: idx + 1,
                encounter_total: encounters.len(),
                encounter_id: encounter_id.clone(),
                indicator: code,
            });
        }
    }

    if cancelled {
        warn!(completed, total, "Analysis run cancelled");
    } else {
        info!(
            results = results.len(),
            errors = errors.len(),
            "Analysis run complete"
        );
    }

    AnalysisRun {
        results,
        errors,
        complete: !cancelled,
        started_at,
        finished_at: Utc::now(),
    }
}
