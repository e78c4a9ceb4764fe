use thiserror::Error;

// ---------------------------------------------------------------------------
// Value – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value. CSV cells are inferred from text; Excel
/// cells keep the type stored in the workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Missing,
}

impl Value {
    /// Interpret the cell as an `f64` for plotting, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Column – one named column of cells
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    /// The column's finite numeric values, in row order. Missing cells,
    /// text cells and non-finite numbers are skipped.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values
            .iter()
            .filter_map(Value::as_f64)
            .filter(|v| v.is_finite())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Violations of the dataset shape invariants, caught at construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("duplicate column name: {0:?}")]
    DuplicateColumn(String),
    #[error("column {name:?} has {len} rows, expected {expected}")]
    UnequalLengths {
        name: String,
        len: usize,
        expected: usize,
    },
}

/// An ordered set of named columns sharing a common row count.
/// Replaced wholesale on each load; never mutated in place.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    column_names: Vec<String>,
}

impl Dataset {
    /// Build a dataset, enforcing unique column names and equal lengths.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, SchemaError> {
        let mut column_names = Vec::with_capacity(columns.len());
        for col in &columns {
            if column_names.contains(&col.name) {
                return Err(SchemaError::DuplicateColumn(col.name.clone()));
            }
            column_names.push(col.name.clone());
        }

        if let Some(first) = columns.first() {
            let expected = first.values.len();
            for col in &columns {
                if col.values.len() != expected {
                    return Err(SchemaError::UnequalLengths {
                        name: col.name.clone(),
                        len: col.values.len(),
                        expected,
                    });
                }
            }
        }

        Ok(Dataset {
            columns,
            column_names,
        })
    }

    /// Column names in file order; this is the schema snapshot the UI
    /// populates its dropdowns from.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Look up a column by name. Returns `None` for stale or renamed
    /// selections rather than panicking.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of data rows (shared by every column).
    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(v: f64) -> Value {
        Value::Number(v)
    }

    #[test]
    fn from_columns_keeps_file_order() {
        let ds = Dataset::from_columns(vec![
            Column::new("b", vec![num(1.0)]),
            Column::new("a", vec![num(2.0)]),
        ])
        .unwrap();
        assert_eq!(ds.column_names(), &["b".to_string(), "a".to_string()]);
        assert_eq!(ds.rows(), 1);
        assert_eq!(ds.width(), 2);
    }

    #[test]
    fn duplicate_column_names_rejected() {
        let err = Dataset::from_columns(vec![
            Column::new("a", vec![num(1.0)]),
            Column::new("a", vec![num(2.0)]),
        ])
        .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateColumn("a".into()));
    }

    #[test]
    fn unequal_column_lengths_rejected() {
        let err = Dataset::from_columns(vec![
            Column::new("a", vec![num(1.0), num(2.0)]),
            Column::new("b", vec![num(3.0)]),
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaError::UnequalLengths { .. }));
    }

    #[test]
    fn column_lookup_by_name() {
        let ds = Dataset::from_columns(vec![Column::new("a", vec![num(1.0)])]).unwrap();
        assert!(ds.column("a").is_some());
        assert!(ds.column("renamed").is_none());
    }

    #[test]
    fn numeric_values_skip_text_and_missing() {
        let col = Column::new(
            "a",
            vec![
                num(1.0),
                Value::Missing,
                Value::Text("n/a".into()),
                num(f64::NAN),
                num(2.5),
            ],
        );
        assert_eq!(col.numeric_values(), vec![1.0, 2.5]);
    }
}
