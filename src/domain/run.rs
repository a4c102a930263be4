use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ErrorRecord, ResultRecord};

/// Aggregate outcome of one analysis run over a submitted dataset.
///
/// Owned by the caller: the driver builds a fresh run per invocation and
/// holds no state across runs. `complete` is false only when the run was
/// cancelled before covering every (encounter, indicator) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRun {
    pub results: Vec<ResultRecord>,
    pub errors: Vec<ErrorRecord>,
    pub complete: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl AnalysisRun {
    /// Total (encounter, indicator) pairs attempted, across both sets.
    pub fn attempts(&self) -> usize {
        self.results.len() + self.errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
