use serde::Deserialize;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Column classification: numeric vs categorical
// ---------------------------------------------------------------------------

/// How column types are inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierMode {
    /// A column's type is whatever the first record holds.
    #[default]
    FirstRow,
    /// A column is numeric only if every non-null value in it is numeric
    /// (and at least one is).
    FullScan,
}

/// Column names split by inferred type, each list in header order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnClassification {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl ColumnClassification {
    pub fn first_numeric(&self) -> Option<&str> {
        self.numeric.first().map(String::as_str)
    }

    pub fn first_categorical(&self) -> Option<&str> {
        self.categorical.first().map(String::as_str)
    }
}

/// Partition the columns of `dataset` into numeric and categorical.
///
/// An empty dataset yields two empty lists.
pub fn classify(dataset: &Dataset, mode: ClassifierMode) -> ColumnClassification {
    let Some(first) = dataset.records().first() else {
        return ColumnClassification::default();
    };

    let mut out = ColumnClassification::default();
    for (idx, (name, value)) in dataset.fields(first).enumerate() {
        let numeric = match mode {
            ClassifierMode::FirstRow => value.is_numeric(),
            ClassifierMode::FullScan => column_is_numeric(dataset, idx),
        };
        if numeric {
            out.numeric.push(name.to_string());
        } else {
            out.categorical.push(name.to_string());
        }
    }
    out
}

fn column_is_numeric(dataset: &Dataset, column: usize) -> bool {
    let mut seen_number = false;
    for record in dataset.records() {
        let value = record.value(column);
        if value.is_null() {
            continue;
        }
        if !value.is_numeric() {
            return false;
        }
        seen_number = true;
    }
    seen_number
}
