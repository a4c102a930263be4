use thiserror::Error;

use crate::domain::{EncounterRecord, IndicatorCode};

/// Successful classification of one (encounter, indicator) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Classification tag, e.g. `Inclusion` or `Exclusion`. The engine is
    /// the authority; consumers must not assume a closed set.
    pub status: String,

    /// Human-readable explanation for the classification.
    pub rationale: String,
}

impl Evaluation {
    pub fn new(status: impl Into<String>, rationale: impl Into<String>) -> Self {
        Evaluation {
            status: status.into(),
            rationale: rationale.into(),
        }
    }
}

/// A fault scoped to a single (encounter, indicator) evaluation.
///
/// These never abort a run: the driver records them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalFault {
    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("no code-bearing columns found (expected {0})")]
    NoCodeColumns(String),

    #[error("{0}")]
    Internal(String),
}

/// Trait for rules-engine collaborators.
///
/// Implementations classify one encounter against one indicator at a time
/// and signal per-pair faults through the error variant rather than by
/// panicking, so the driver's fault isolation is a plain branch.
pub trait RulesEngine: Send + Sync {
    fn evaluate(
        &self,
        encounter: &EncounterRecord,
        code: IndicatorCode,
    ) -> Result<Evaluation, EvalFault>;
}
