use std::collections::HashSet;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::domain::EncounterRecord;

/// Errors raised while loading the input dataset. All are fatal: a run is
/// never attempted over a dataset that failed to parse.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Load an encounter dataset from a CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<EncounterRecord>, DatasetError> {
    let content = fs::read_to_string(path)?;
    parse_csv(&content)
}

/// Parse CSV text into ordered encounter records.
///
/// The first record is the header; header names are trimmed of
/// surrounding whitespace and must be non-empty and unique. Cell values
/// are kept verbatim. A UTF-8 BOM is tolerated. Blank lines are skipped;
/// rows whose field count differs from the header are rejected.
pub fn parse_csv(content: &str) -> Result<Vec<EncounterRecord>, DatasetError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = parse_records(content)?.into_iter();

    let Some((_, raw_header)) = records.next() else {
        return Err(DatasetError::Validation(
            "input contains no header row".to_string(),
        ));
    };

    let mut header = Vec::with_capacity(raw_header.len());
    let mut seen = HashSet::new();
    for name in raw_header {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DatasetError::Validation(
                "empty column name in header".to_string(),
            ));
        }
        if !seen.insert(name.clone()) {
            return Err(DatasetError::Validation(format!(
                "duplicate column name: {name}"
            )));
        }
        header.push(name);
    }

    let mut rows = Vec::new();
    for (line, fields) in records {
        if fields.len() != header.len() {
            return Err(DatasetError::Parse {
                line,
                message: format!("expected {} fields, found {}", header.len(), fields.len()),
            });
        }
        rows.push(EncounterRecord::from_pairs(
            header.iter().cloned().zip(fields),
        ));
    }

    Ok(rows)
}

/// Split CSV text into records of fields, tracking the 1-based line each
/// record starts on. Handles quoted fields with embedded delimiters,
/// escaped quotes, and newlines.
fn parse_records(input: &str) -> Result<Vec<(usize, Vec<String>)>, DatasetError> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut line = 1usize;
    let mut record_line = 1usize;

    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' => {
                    // Doubled quote is an escaped literal quote.
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' if field.is_empty() && !field_was_quoted => {
                in_quotes = true;
                field_was_quoted = true;
            }
            '"' => {
                return Err(DatasetError::Parse {
                    line,
                    message: "unexpected quote inside field".to_string(),
                });
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                field_was_quoted = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {
                // CRLF; the LF terminates the record on the next iteration.
            }
            '\n' => {
                line += 1;
                if fields.is_empty() && field.is_empty() && !field_was_quoted {
                    // Blank line.
                    record_line = line;
                    continue;
                }
                fields.push(std::mem::take(&mut field));
                field_was_quoted = false;
                records.push((record_line, std::mem::take(&mut fields)));
                record_line = line;
            }
            _ if field_was_quoted => {
                return Err(DatasetError::Parse {
                    line,
                    message: "unexpected character after closing quote".to_string(),
                });
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(DatasetError::Parse {
            line,
            message: "unterminated quoted field".to_string(),
        });
    }

    if !fields.is_empty() || !field.is_empty() || field_was_quoted {
        fields.push(field);
        records.push((record_line, fields));
    }

    Ok(records)
}
