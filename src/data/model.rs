use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the uploaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, as produced by the CSV loader's type guess.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

static NULL_CELL: CellValue = CellValue::Null;

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Shortest round-trip form; integral floats print without ".0"
            // and negative zero prints as "0".
            CellValue::Float(v) if *v == 0.0 => write!(f, "0"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "null"),
        }
    }
}

impl CellValue {
    /// Whether the value carries a number (integer or float).
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }

    /// Numeric view of the value; `None` for non-numeric cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// String form used when values are grouped or shown as axis labels.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// A single row. Values are stored positionally, aligned with
/// [`Dataset::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<CellValue>,
}

impl Record {
    pub fn new(values: Vec<CellValue>) -> Self {
        Self { values }
    }

    /// Value at a column position. Missing trailing cells read as null.
    pub fn value(&self, column: usize) -> &CellValue {
        self.values.get(column).unwrap_or(&NULL_CELL)
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete uploaded table
// ---------------------------------------------------------------------------

/// The parsed upload: header-ordered column names plus all records.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    /// Column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// `(column, value)` pairs of one record in column order.
    pub fn fields<'a>(
        &'a self,
        record: &'a Record,
    ) -> impl Iterator<Item = (&'a str, &'a CellValue)> + 'a {
        self.columns
            .iter()
            .enumerate()
            .map(move |(i, name)| (name.as_str(), record.value(i)))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
impl Dataset {
    /// Build a dataset from `(column, value)` rows. The first row fixes the
    /// column order; later rows are matched by name and missing keys are null.
    pub fn from_rows<K, I, R>(rows: I) -> Self
    where
        K: Into<String>,
        R: IntoIterator<Item = (K, CellValue)>,
        I: IntoIterator<Item = R>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut records = Vec::new();

        for (row_no, row) in rows.into_iter().enumerate() {
            let pairs: Vec<(String, CellValue)> =
                row.into_iter().map(|(k, v)| (k.into(), v)).collect();
            if row_no == 0 {
                columns = pairs.iter().map(|(k, _)| k.clone()).collect();
            }
            let mut values = vec![CellValue::Null; columns.len()];
            for (key, value) in pairs {
                if let Some(idx) = columns.iter().position(|c| *c == key) {
                    values[idx] = value;
                }
            }
            records.push(Record::new(values));
        }

        Self { columns, records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_labels_drop_integral_fraction() {
        assert_eq!(CellValue::Float(2.0).label(), "2");
        assert_eq!(CellValue::Float(2.5).label(), "2.5");
        assert_eq!(CellValue::Integer(-7).label(), "-7");
        assert_eq!(CellValue::Bool(true).label(), "true");
        assert_eq!(CellValue::Null.label(), "null");
    }

    #[test]
    fn negative_zero_labels_as_zero() {
        assert_eq!(CellValue::Float(-0.0).label(), "0");
        assert_eq!(CellValue::Float(0.0).label(), CellValue::Integer(0).label());
    }

    #[test]
    fn from_rows_fixes_column_order_from_first_row() {
        let ds = Dataset::from_rows(vec![
            vec![("b", CellValue::Integer(1)), ("a", CellValue::Integer(2))],
            vec![("a", CellValue::Integer(3))],
        ]);

        assert_eq!(ds.columns(), ["b", "a"]);
        assert_eq!(ds.records()[1].value(0), &CellValue::Null);
        assert_eq!(ds.records()[1].value(1), &CellValue::Integer(3));
    }

    #[test]
    fn out_of_range_cell_reads_null() {
        let record = Record::new(vec![CellValue::Integer(1)]);
        assert!(record.value(5).is_null());
    }

    #[test]
    fn fields_pair_names_with_values() {
        let ds = Dataset::from_rows(vec![vec![
            ("city", CellValue::String("NY".into())),
            ("sales", CellValue::Integer(10)),
        ]]);
        let fields: Vec<_> = ds.fields(&ds.records()[0]).collect();
        assert_eq!(
            fields,
            vec![
                ("city", &CellValue::String("NY".into())),
                ("sales", &CellValue::Integer(10)),
            ]
        );
    }
}
