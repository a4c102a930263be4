pub mod encounter;
pub mod indicator;
pub mod record;
pub mod run;

pub use encounter::EncounterRecord;
pub use indicator::IndicatorCode;
pub use record::{status, ErrorRecord, ResultRecord};
pub use run::AnalysisRun;
