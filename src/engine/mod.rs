pub mod loader;
pub mod mock;
pub mod table;
pub mod traits;

pub use loader::{ArtifactLoader, EngineError};
pub use mock::MockEngine;
pub use table::TableEngine;
pub use traits::{EvalFault, Evaluation, RulesEngine};
