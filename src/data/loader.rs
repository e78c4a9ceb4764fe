use std::fmt::Display;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use thiserror::Error;

use super::model::{Column, Dataset, Value};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to turn a file into a [`Dataset`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The extension names a format this tool does not read.
    #[error("unsupported file extension: {extension:?}")]
    UnsupportedFormat { extension: String },

    /// The file is malformed or unreadable.
    #[error("failed to read {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

fn parse_error(path: &Path, message: impl Display) -> LoadError {
    LoadError::Parse {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tabular dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv` – comma-separated values, first row is the header
/// * `.xlsx` / `.xlsm` / `.xls` – Excel workbook, first sheet, header row
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "xlsx" | "xlsm" | "xls" => load_excel(path),
        other => Err(LoadError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per data row.
/// Cell types are inferred: numeric text parses to [`Value::Number`],
/// empty cells become [`Value::Missing`], everything else stays text.
fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| parse_error(path, e))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| parse_error(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];

    for result in reader.records() {
        // Ragged rows surface here: the csv reader rejects records whose
        // field count differs from the header.
        let record = result.map_err(|e| parse_error(path, e))?;
        for (col, cell) in columns.iter_mut().zip(record.iter()) {
            col.push(guess_value(cell));
        }
    }

    let columns = headers
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Column::new(name, values))
        .collect();

    Dataset::from_columns(columns).map_err(|e| parse_error(path, e))
}

fn guess_value(s: &str) -> Value {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Value::Missing;
    }
    if let Ok(v) = trimmed.parse::<f64>() {
        return Value::Number(v);
    }
    Value::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

/// Read the first worksheet of an Excel workbook, first row as headers.
/// Cell types come from the workbook itself rather than string sniffing.
fn load_excel(path: &Path) -> Result<Dataset, LoadError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| parse_error(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| parse_error(path, "workbook has no worksheets"))?
        .map_err(|e| parse_error(path, e))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| parse_error(path, "first worksheet is empty"))?
        .iter()
        .map(|cell| cell.to_string())
        .collect();

    let columns = columns_from_rows(headers, rows);
    Dataset::from_columns(columns).map_err(|e| parse_error(path, e))
}

fn columns_from_rows<'a>(
    headers: Vec<String>,
    rows: impl Iterator<Item = &'a [Data]>,
) -> Vec<Column> {
    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (col, cell) in columns.iter_mut().zip(row.iter()) {
            col.push(cell_value(cell));
        }
        // Range rows are fixed-width, but guard short rows anyway.
        for col in columns.iter_mut().skip(row.len()) {
            col.push(Value::Missing);
        }
    }

    headers
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Column::new(name, values))
        .collect()
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(v) => Value::Number(*v),
        Data::DateTime(dt) => Value::Number(dt.as_f64()),
        Data::String(s) => Value::Text(s.clone()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Bool(b) => Value::Text(b.to_string()),
        Data::Empty | Data::Error(_) => Value::Missing,
    }
}
