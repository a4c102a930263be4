use crate::domain::{EncounterRecord, IndicatorCode};

use super::traits::{EvalFault, Evaluation, RulesEngine};

type Behavior =
    Box<dyn Fn(&EncounterRecord, IndicatorCode) -> Result<Evaluation, EvalFault> + Send + Sync>;

/// Scriptable engine for tests and benchmarks.
pub struct MockEngine {
    behavior: Behavior,
}

impl MockEngine {
    /// Engine driven by an arbitrary closure.
    pub fn with(
        behavior: impl Fn(&EncounterRecord, IndicatorCode) -> Result<Evaluation, EvalFault>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        MockEngine {
            behavior: Box::new(behavior),
        }
    }

    /// Engine that returns the same classification for every pair.
    pub fn always(status: impl Into<String>, rationale: impl Into<String>) -> Self {
        let status = status.into();
        let rationale = rationale.into();
        Self::with(move |_, _| Ok(Evaluation::new(status.clone(), rationale.clone())))
    }

    /// Engine that faults on every pair.
    pub fn failing(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::with(move |_, _| Err(EvalFault::Internal(message.clone())))
    }
}

impl RulesEngine for MockEngine {
    fn evaluate(
        &self,
        encounter: &EncounterRecord,
        code: IndicatorCode,
    ) -> Result<Evaluation, EvalFault> {
        (self.behavior)(encounter, code)
    }
}
