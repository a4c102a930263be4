use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::domain::{status, EncounterRecord, IndicatorCode};

use super::loader::{ArtifactLoader, EngineError, IndicatorDefinition};
use super::traits::{EvalFault, Evaluation, RulesEngine};

/// Table-driven rules engine.
///
/// Classifies an encounter for an indicator purely by code-set membership
/// over the definition's code-bearing columns: exclusion sets are checked
/// first, then inclusion sets, and an encounter matching neither is an
/// Exclusion with a "no inclusion criteria met" rationale. All indicator
/// behavior comes from the loaded artifacts.
pub struct TableEngine {
    code_sets: HashMap<String, HashSet<String>>,
    definitions: HashMap<IndicatorCode, IndicatorDefinition>,
}

impl TableEngine {
    /// Build an engine from validated artifacts.
    pub fn new(
        code_sets: HashMap<String, HashSet<String>>,
        definitions: Vec<IndicatorDefinition>,
    ) -> Self {
        TableEngine {
            code_sets,
            definitions: definitions
                .into_iter()
                .map(|def| (def.indicator, def))
                .collect(),
        }
    }

    /// Load and validate both artifact files, then build the engine.
    pub fn from_files(
        codes_path: impl AsRef<Path>,
        definitions_path: impl AsRef<Path>,
    ) -> Result<Self, EngineError> {
        let loader = ArtifactLoader::new(
            codes_path.as_ref().to_string_lossy(),
            definitions_path.as_ref().to_string_lossy(),
        );
        let (code_sets, definitions) = loader.load()?;
        Ok(TableEngine::new(code_sets, definitions))
    }

    /// Number of loaded indicator definitions.
    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    /// Clinical codes from the encounter's code-bearing columns, in
    /// column order. Multi-code cells may be separated by commas,
    /// semicolons, or whitespace.
    fn collect_codes(&self, encounter: &EncounterRecord, def: &IndicatorDefinition) -> Vec<String> {
        let mut codes = Vec::new();
        for column in encounter.columns() {
            let matches = def.code_fields.iter().any(|f| f.as_str() == column)
                || def.code_field_prefixes.iter().any(|p| column.starts_with(p.as_str()));
            if !matches {
                continue;
            }
            if let Some(value) = encounter.get(column) {
                codes.extend(
                    value
                        .split([',', ';', ' ', '\t'])
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(String::from),
                );
            }
        }
        codes
    }

    fn find_member<'a>(
        &self,
        set_names: &'a [String],
        codes: &'a [String],
    ) -> Option<(&'a str, &'a str)> {
        for set_name in set_names {
            // Validated at load time; an absent set means an empty one here.
            let Some(set) = self.code_sets.get(set_name) else {
                continue;
            };
            if let Some(code) = codes.iter().find(|c| set.contains(c.as_str())) {
                return Some((set_name.as_str(), code.as_str()));
            }
        }
        None
    }
}

impl RulesEngine for TableEngine {
    fn evaluate(
        &self,
        encounter: &EncounterRecord,
        code: IndicatorCode,
    ) -> Result<Evaluation, EvalFault> {
        let def = self
            .definitions
            .get(&code)
            .ok_or_else(|| EvalFault::Internal(format!("no definition loaded for {code}")))?;

        for field in &def.required_fields {
            match encounter.get(field) {
                Some(value) if !value.trim().is_empty() => {}
                _ => return Err(EvalFault::MissingField(field.clone())),
            }
        }

        let codes = self.collect_codes(encounter, def);
        if codes.is_empty() {
            let expected = def
                .code_fields
                .iter()
                .map(String::as_str)
                .chain(def.code_field_prefixes.iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(EvalFault::NoCodeColumns(expected));
        }

        if let Some((set_name, matched)) = self.find_member(&def.exclusion_sets, &codes) {
            return Ok(Evaluation::new(
                status::EXCLUSION,
                format!("code {matched} in exclusion set {set_name}"),
            ));
        }

        if let Some((set_name, matched)) = self.find_member(&def.inclusion_sets, &codes) {
            return Ok(Evaluation::new(
                status::INCLUSION,
                format!("code {matched} in inclusion set {set_name}"),
            ));
        }

        Ok(Evaluation::new(
            status::EXCLUSION,
            "no inclusion criteria met",
        ))
    }
}
