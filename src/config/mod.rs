use std::path::PathBuf;

use clap::Parser;

/// PSI analyzer configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "psirun")]
#[command(about = "Batch Patient Safety Indicator (PSI) analyzer")]
pub struct Config {
    /// Input encounter CSV file
    pub input: PathBuf,

    /// Path to the code-set reference file
    #[arg(long, default_value = "PSI_Code_Sets.json", env = "PSIRUN_CODES_PATH")]
    pub codes_path: PathBuf,

    /// Path to the compiled indicator definitions file
    #[arg(
        long,
        default_value = "PSI_02_19_Compiled_Cleaned.json",
        env = "PSIRUN_DEFINITIONS_PATH"
    )]
    pub definitions_path: PathBuf,

    /// Where to write the results CSV
    #[arg(long, default_value = "PSI_Results.csv", env = "PSIRUN_RESULTS_OUT")]
    pub results_out: PathBuf,

    /// Where to write the error log CSV (only written when errors occurred)
    #[arg(long, default_value = "PSI_Errors.csv", env = "PSIRUN_ERRORS_OUT")]
    pub errors_out: PathBuf,

    /// Export only flagged (Inclusion) results
    #[arg(long, env = "PSIRUN_INCLUSIONS_ONLY")]
    pub inclusions_only: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,
}
