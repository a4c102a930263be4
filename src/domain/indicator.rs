use serde::{Deserialize, Serialize};
use std::fmt;

/// Patient Safety Indicator code.
///
/// The indicator set is fixed: PSI 02 through PSI 19, with PSI 16
/// (retired by AHRQ) excluded. `ALL` gives the canonical evaluation
/// order, ascending by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IndicatorCode {
    #[serde(rename = "PSI_02")]
    Psi02,
    #[serde(rename = "PSI_03")]
    Psi03,
    #[serde(rename = "PSI_04")]
    Psi04,
    #[serde(rename = "PSI_05")]
    Psi05,
    #[serde(rename = "PSI_06")]
    Psi06,
    #[serde(rename = "PSI_07")]
    Psi07,
    #[serde(rename = "PSI_08")]
    Psi08,
    #[serde(rename = "PSI_09")]
    Psi09,
    #[serde(rename = "PSI_10")]
    Psi10,
    #[serde(rename = "PSI_11")]
    Psi11,
    #[serde(rename = "PSI_12")]
    Psi12,
    #[serde(rename = "PSI_13")]
    Psi13,
    #[serde(rename = "PSI_14")]
    Psi14,
    #[serde(rename = "PSI_15")]
    Psi15,
    #[serde(rename = "PSI_17")]
    Psi17,
    #[serde(rename = "PSI_18")]
    Psi18,
    #[serde(rename = "PSI_19")]
    Psi19,
}

impl IndicatorCode {
    /// All indicator codes in canonical evaluation order.
    pub const ALL: [IndicatorCode; 17] = [
        IndicatorCode::Psi02,
        IndicatorCode::Psi03,
        IndicatorCode::Psi04,
        IndicatorCode::Psi05,
        IndicatorCode::Psi06,
        IndicatorCode::Psi07,
        IndicatorCode::Psi08,
        IndicatorCode::Psi09,
        IndicatorCode::Psi10,
        IndicatorCode::Psi11,
        IndicatorCode::Psi12,
        IndicatorCode::Psi13,
        IndicatorCode::Psi14,
        IndicatorCode::Psi15,
        IndicatorCode::Psi17,
        IndicatorCode::Psi18,
        IndicatorCode::Psi19,
    ];

    /// String form used in reports and definition artifacts.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorCode::Psi02 => "PSI_02",
            IndicatorCode::Psi03 => "PSI_03",
            IndicatorCode::Psi04 => "PSI_04",
            IndicatorCode::Psi05 => "PSI_05",
            IndicatorCode::Psi06 => "PSI_06",
            IndicatorCode::Psi07 => "PSI_07",
            IndicatorCode::Psi08 => "PSI_08",
            IndicatorCode::Psi09 => "PSI_09",
            IndicatorCode::Psi10 => "PSI_10",
            IndicatorCode::Psi11 => "PSI_11",
            IndicatorCode::Psi12 => "PSI_12",
            IndicatorCode::Psi13 => "PSI_13",
            IndicatorCode::Psi14 => "PSI_14",
            IndicatorCode::Psi15 => "PSI_15",
            IndicatorCode::Psi17 => "PSI_17",
            IndicatorCode::Psi18 => "PSI_18",
            IndicatorCode::Psi19 => "PSI_19",
        }
    }

    /// Parse from the `PSI_NN` string form.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for IndicatorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_psi_16_excluded() {
        assert_eq!(IndicatorCode::ALL.len(), 17);
        assert!(IndicatorCode::ALL.iter().all(|c| c.as_str() != "PSI_16"));
        assert!(IndicatorCode::parse("PSI_16").is_none());
    }

    #[test]
    fn test_canonical_order_ascending() {
        let numbers: Vec<u32> = IndicatorCode::ALL
            .iter()
            .map(|c| c.as_str()[4..].parse().unwrap())
            .collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        assert_eq!(numbers, sorted);
        assert_eq!(numbers.first(), Some(&2));
        assert_eq!(numbers.last(), Some(&19));
    }

    #[test]
    fn test_parse_roundtrip() {
        for code in IndicatorCode::ALL {
            assert_eq!(IndicatorCode::parse(code.as_str()), Some(code));
        }
        assert!(IndicatorCode::parse("PSI_99").is_none());
        assert!(IndicatorCode::parse("psi_03").is_none());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&IndicatorCode::Psi03).unwrap();
        assert_eq!(json, "\"PSI_03\"");

        let parsed: IndicatorCode = serde_json::from_str("\"PSI_19\"").unwrap();
        assert_eq!(parsed, IndicatorCode::Psi19);
    }
}
