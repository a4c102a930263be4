use std::io::{self, Write};

use serde::Serialize;

use crate::domain::{status, ErrorRecord, IndicatorCode, ResultRecord};

/// Dashboard counts over one run's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub inclusions: usize,
    pub exclusions: usize,
    pub errors: usize,
}

impl Summary {
    pub fn of(results: &[ResultRecord]) -> Self {
        Summary {
            total: results.len(),
            inclusions: count(results, status::INCLUSION),
            exclusions: count(results, status::EXCLUSION),
            errors: count(results, status::ERROR),
        }
    }
}

fn count(results: &[ResultRecord], status: &str) -> usize {
    results.iter().filter(|r| r.status == status).count()
}

/// Result filter: empty criteria lists impose no constraint.
#[derive(Debug, Clone, Default)]
pub struct ResultFilter {
    pub indicators: Vec<IndicatorCode>,
    pub statuses: Vec<String>,
}

impl ResultFilter {
    pub fn matches(&self, record: &ResultRecord) -> bool {
        (self.indicators.is_empty() || self.indicators.contains(&record.indicator))
            && (self.statuses.is_empty() || self.statuses.iter().any(|s| *s == record.status))
    }

    pub fn apply<'a>(&self, results: &'a [ResultRecord]) -> Vec<&'a ResultRecord> {
        results.iter().filter(|r| self.matches(r)).collect()
    }
}

/// The flagged-events view: Inclusion results only.
pub fn inclusions_only(results: &[ResultRecord]) -> Vec<&ResultRecord> {
    results
        .iter()
        .filter(|r| r.status == status::INCLUSION)
        .collect()
}

/// Write results as CSV with the canonical report columns.
pub fn write_results_csv<'a, W, I>(writer: &mut W, results: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ResultRecord>,
{
    write_row(writer, &["EncounterID", "PSI", "Status", "Rationale"])?;
    for record in results {
        write_row(
            writer,
            &[
                &record.encounter_id,
                record.indicator.as_str(),
                &record.status,
                &record.rationale,
            ],
        )?;
    }
    Ok(())
}

/// Write the error log as CSV.
pub fn write_errors_csv<'a, W, I>(writer: &mut W, errors: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ErrorRecord>,
{
    write_row(writer, &["EncounterID", "PSI", "Error"])?;
    for record in errors {
        write_row(
            writer,
            &[
                &record.encounter_id,
                record.indicator.as_str(),
                &record.error,
            ],
        )?;
    }
    Ok(())
}

fn write_row<W: Write>(writer: &mut W, cells: &[&str]) -> io::Result<()> {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        let needs_quote = cell.contains(',')
            || cell.contains('"')
            || cell.contains('\n')
            || cell.contains('\r');
        if needs_quote {
            line.push('"');
            line.push_str(&cell.replace('"', "\"\""));
            line.push('"');
        } else {
            line.push_str(cell);
        }
    }
    line.push('\n');
    writer.write_all(line.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, indicator: IndicatorCode, status: &str) -> ResultRecord {
        ResultRecord {
            encounter_id: id.to_string(),
            indicator,
            status: status.to_string(),
            rationale: "r".to_string(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![
            result("E-1", IndicatorCode::Psi02, status::INCLUSION),
            result("E-1", IndicatorCode::Psi03, status::EXCLUSION),
            result("E-2", IndicatorCode::Psi02, status::EXCLUSION),
            result("E-2", IndicatorCode::Psi03, status::ERROR),
            // Unknown statuses count toward the total only.
            result("E-3", IndicatorCode::Psi02, "NotApplicable"),
        ];

        let summary = Summary::of(&results);

        assert_eq!(summary.total, 5);
        assert_eq!(summary.inclusions, 1);
        assert_eq!(summary.exclusions, 2);
        assert_eq!(summary.errors, 1);
    }

    #[test]
    fn test_filter_by_indicator_and_status() {
        let results = vec![
            result("E-1", IndicatorCode::Psi02, status::INCLUSION),
            result("E-1", IndicatorCode::Psi03, status::INCLUSION),
            result("E-2", IndicatorCode::Psi02, status::EXCLUSION),
        ];

        let filter = ResultFilter {
            indicators: vec![IndicatorCode::Psi02],
            statuses: vec![status::INCLUSION.to_string()],
        };
        let matched = filter.apply(&results);

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].encounter_id, "E-1");
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let results = vec![
            result("E-1", IndicatorCode::Psi02, status::INCLUSION),
            result("E-2", IndicatorCode::Psi03, status::EXCLUSION),
        ];

        assert_eq!(ResultFilter::default().apply(&results).len(), 2);
    }

    #[test]
    fn test_inclusions_only() {
        let results = vec![
            result("E-1", IndicatorCode::Psi02, status::INCLUSION),
            result("E-2", IndicatorCode::Psi02, status::EXCLUSION),
        ];

        let flagged = inclusions_only(&results);

        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].encounter_id, "E-1");
    }

    #[test]
    fn test_results_csv_format() {
        let results = vec![ResultRecord {
            encounter_id: "E-1".to_string(),
            indicator: IndicatorCode::Psi03,
            status: status::INCLUSION.to_string(),
            rationale: "code A41.9, set \"SEPSIS_DX\"".to_string(),
        }];

        let mut out = Vec::new();
        write_results_csv(&mut out, &results).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "EncounterID,PSI,Status,Rationale\nE-1,PSI_03,Inclusion,\"code A41.9, set \"\"SEPSIS_DX\"\"\"\n"
        );
    }

    #[test]
    fn test_errors_csv_format() {
        let errors = vec![ErrorRecord {
            encounter_id: "Row2".to_string(),
            indicator: IndicatorCode::Psi09,
            error: "bad data".to_string(),
        }];

        let mut out = Vec::new();
        write_errors_csv(&mut out, &errors).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "EncounterID,PSI,Error\nRow2,PSI_09,bad data\n");
    }
}
