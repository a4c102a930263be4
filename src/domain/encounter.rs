use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column holding the caller-supplied encounter identifier.
pub const ENCOUNTER_ID_COLUMN: &str = "EncounterID";

/// One row of input data: an ordered mapping from column name to value.
///
/// Column order is preserved from the source file. Records are immutable
/// for the duration of an evaluation run; the driver only reads them and
/// passes them opaquely to the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterRecord {
    fields: IndexMap<String, String>,
}

impl EncounterRecord {
    pub fn new(fields: IndexMap<String, String>) -> Self {
        EncounterRecord { fields }
    }

    /// Build a record from (column, value) pairs, preserving order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        EncounterRecord {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a column value.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// The encounter's identifier for reporting.
    ///
    /// Uses the `EncounterID` column when present and non-blank; otherwise
    /// synthesizes a positional `Row<N>` identifier from the 0-based row
    /// index (`Row1` for index 0).
    pub fn encounter_id(&self, row_index: usize) -> String {
        match self.get(ENCOUNTER_ID_COLUMN).map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("Row{}", row_index + 1),
        }
    }

    /// Column names in source order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
