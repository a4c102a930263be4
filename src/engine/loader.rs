use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::IndicatorCode;

/// Errors that can occur while building an engine from its definition
/// artifacts. All of these are fatal: a run must not start against a
/// partially-initialized engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// One compiled indicator definition.
///
/// Definitions are pure data: which columns carry clinical codes, which
/// fields must be present, and which named code sets drive inclusion and
/// exclusion. No indicator's clinical logic lives in this crate.
#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorDefinition {
    pub indicator: IndicatorCode,

    #[serde(default)]
    pub description: String,

    /// Exact column names holding clinical codes.
    #[serde(default)]
    pub code_fields: Vec<String>,

    /// Column-name prefixes holding clinical codes (e.g. "DX" for DX1..DX30).
    #[serde(default)]
    pub code_field_prefixes: Vec<String>,

    /// Columns that must be present and non-blank for evaluation.
    #[serde(default)]
    pub required_fields: Vec<String>,

    /// Named code sets whose members flag the encounter.
    #[serde(default)]
    pub inclusion_sets: Vec<String>,

    /// Named code sets whose members exclude the encounter. Checked first.
    #[serde(default)]
    pub exclusion_sets: Vec<String>,
}

/// Loads and validates the two engine artifacts: the code-set reference
/// file and the compiled indicator definitions.
pub struct ArtifactLoader {
    codes_path: String,
    definitions_path: String,
}

impl ArtifactLoader {
    pub fn new(codes_path: impl Into<String>, definitions_path: impl Into<String>) -> Self {
        ArtifactLoader {
            codes_path: codes_path.into(),
            definitions_path: definitions_path.into(),
        }
    }

    /// Load both artifacts, cross-validating definition references.
    pub fn load(
        &self,
    ) -> Result<(HashMap<String, HashSet<String>>, Vec<IndicatorDefinition>), EngineError> {
        let code_sets = load_code_sets(&self.codes_path)?;
        let definitions = load_definitions(&self.definitions_path)?;

        validate(&code_sets, &definitions)?;

        Ok((code_sets, definitions))
    }
}

/// Load the code-set reference file: a JSON object mapping set name to a
/// list of clinical codes.
pub fn load_code_sets(
    path: impl AsRef<Path>,
) -> Result<HashMap<String, HashSet<String>>, EngineError> {
    let content = fs::read_to_string(path)?;
    let raw: HashMap<String, Vec<String>> = serde_json::from_str(&content)?;

    Ok(raw
        .into_iter()
        .map(|(name, codes)| (name, codes.into_iter().collect()))
        .collect())
}

/// Load the compiled indicator definitions: a JSON array.
pub fn load_definitions(path: impl AsRef<Path>) -> Result<Vec<IndicatorDefinition>, EngineError> {
    let content = fs::read_to_string(path)?;
    let definitions: Vec<IndicatorDefinition> = serde_json::from_str(&content)?;
    Ok(definitions)
}

fn validate(
    code_sets: &HashMap<String, HashSet<String>>,
    definitions: &[IndicatorDefinition],
) -> Result<(), EngineError> {
    let mut seen = HashSet::new();
    for def in definitions {
        if !seen.insert(def.indicator) {
            return Err(EngineError::Validation(format!(
                "Duplicate definition for indicator: {}",
                def.indicator
            )));
        }

        for set_name in def.inclusion_sets.iter().chain(&def.exclusion_sets) {
            if !code_sets.contains_key(set_name) {
                return Err(EngineError::Validation(format!(
                    "{} references unknown code set: {}",
                    def.indicator, set_name
                )));
            }
        }

        if def.code_fields.is_empty() && def.code_field_prefixes.is_empty() {
            return Err(EngineError::Validation(format!(
                "{} declares no code-bearing columns",
                def.indicator
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_load_code_sets() {
        let file = write_file(r#"{"PRESSURE_ULCER_DX": ["L89.154", "L89.144"], "EMPTY": []}"#);

        let sets = load_code_sets(file.path()).unwrap();

        assert_eq!(sets.len(), 2);
        assert!(sets["PRESSURE_ULCER_DX"].contains("L89.154"));
        assert!(sets["EMPTY"].is_empty());
    }

    #[test]
    fn test_load_valid_artifacts() {
        let codes = write_file(r#"{"SEPSIS_DX": ["A41.9"], "SURGICAL_DRG": ["470"]}"#);
        let defs = write_file(
            r#"[{
                "indicator": "PSI_13",
                "description": "Postoperative sepsis",
                "code_field_prefixes": ["DX"],
                "required_fields": ["MS-DRG"],
                "inclusion_sets": ["SEPSIS_DX"],
                "exclusion_sets": []
            }]"#,
        );

        let loader = ArtifactLoader::new(
            codes.path().to_string_lossy(),
            defs.path().to_string_lossy(),
        );
        let (code_sets, definitions) = loader.load().unwrap();

        assert_eq!(code_sets.len(), 2);
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].indicator, IndicatorCode::Psi13);
    }

    #[test]
    fn test_unknown_code_set_rejected() {
        let codes = write_file(r#"{"SEPSIS_DX": ["A41.9"]}"#);
        let defs = write_file(
            r#"[{
                "indicator": "PSI_13",
                "code_fields": ["DX1"],
                "inclusion_sets": ["NO_SUCH_SET"]
            }]"#,
        );

        let loader = ArtifactLoader::new(
            codes.path().to_string_lossy(),
            defs.path().to_string_lossy(),
        );
        let err = loader.load().unwrap_err();

        assert!(err.to_string().contains("NO_SUCH_SET"));
    }

    #[test]
    fn test_duplicate_indicator_rejected() {
        let codes = write_file(r#"{"SEPSIS_DX": ["A41.9"]}"#);
        let defs = write_file(
            r#"[
                {"indicator": "PSI_13", "code_fields": ["DX1"], "inclusion_sets": ["SEPSIS_DX"]},
                {"indicator": "PSI_13", "code_fields": ["DX2"], "inclusion_sets": ["SEPSIS_DX"]}
            ]"#,
        );

        let loader = ArtifactLoader::new(
            codes.path().to_string_lossy(),
            defs.path().to_string_lossy(),
        );
        let err = loader.load().unwrap_err();

        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_definition_without_code_columns_rejected() {
        let codes = write_file(r#"{"SEPSIS_DX": ["A41.9"]}"#);
        let defs = write_file(r#"[{"indicator": "PSI_13", "inclusion_sets": ["SEPSIS_DX"]}]"#);

        let loader = ArtifactLoader::new(
            codes.path().to_string_lossy(),
            defs.path().to_string_lossy(),
        );
        let err = loader.load().unwrap_err();

        assert!(err.to_string().contains("no code-bearing columns"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let loader = ArtifactLoader::new("/nonexistent/codes.json", "/nonexistent/defs.json");
        assert!(matches!(loader.load(), Err(EngineError::Io(_))));
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let codes = write_file("not json");
        let defs = write_file("[]");

        let loader = ArtifactLoader::new(
            codes.path().to_string_lossy(),
            defs.path().to_string_lossy(),
        );
        assert!(matches!(loader.load(), Err(EngineError::Json(_))));
    }
}
