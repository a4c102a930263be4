pub mod config;
pub mod dataset;
pub mod domain;
pub mod driver;
pub mod engine;
pub mod observability;
pub mod report;

pub use config::Config;
pub use domain::{AnalysisRun, EncounterRecord, ErrorRecord, IndicatorCode, ResultRecord};
pub use driver::{run_analysis, CancelToken, Progress, ProgressSink};
pub use engine::{EvalFault, Evaluation, RulesEngine, TableEngine};
