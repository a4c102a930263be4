use serde::{Deserialize, Serialize};

use super::IndicatorCode;

/// Classification values the reporting layer knows how to count.
///
/// These are conventions, not a closed set: the engine is the authority
/// and the driver passes its status strings through verbatim.
pub mod status {
    pub const INCLUSION: &str = "Inclusion";
    pub const EXCLUSION: &str = "Exclusion";
    pub const ERROR: &str = "Error";
}

/// One successful evaluation of an (encounter, indicator) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "EncounterID")]
    pub encounter_id: String,

    #[serde(rename = "PSI")]
    pub indicator: IndicatorCode,

    /// Engine-reported classification, passed through verbatim.
    #[serde(rename = "Status")]
    pub status: String,

    /// Human-readable explanation for the classification.
    #[serde(rename = "Rationale")]
    pub rationale: String,
}

/// One failed evaluation of an (encounter, indicator) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    #[serde(rename = "EncounterID")]
    pub encounter_id: String,

    #[serde(rename = "PSI")]
    pub indicator: IndicatorCode,

    /// Description of the evaluation fault.
    #[serde(rename = "Error")]
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_record_serialization() {
        let rec = ResultRecord {
            encounter_id: "E-1".to_string(),
            indicator: IndicatorCode::Psi03,
            status: status::INCLUSION.to_string(),
            rationale: "pressure ulcer code present".to_string(),
        };

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["EncounterID"], "E-1");
        assert_eq!(json["PSI"], "PSI_03");
        assert_eq!(json["Status"], "Inclusion");
    }

    #[test]
    fn test_error_record_serialization() {
        let rec = ErrorRecord {
            encounter_id: "Row2".to_string(),
            indicator: IndicatorCode::Psi09,
            error: "missing required field: MS-DRG".to_string(),
        };

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["PSI"], "PSI_09");
        assert!(json["Error"].as_str().unwrap().contains("MS-DRG"));
    }
}
