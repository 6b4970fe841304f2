use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::model::{CellValue, Dataset, Record};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why an upload could not be turned into a [`Dataset`].
///
/// A file that parses to zero rows is not an error: it yields an empty
/// dataset and the dashboard shows its no-data state.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{name} is not a CSV file")]
    InvalidFormat { name: String },

    #[error("unreadable CSV header: {0}")]
    Header(#[source] csv::Error),

    #[error("CSV row {row} is malformed: {source}")]
    Parse {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Short message for the upload panel; details go to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadError::InvalidFormat { .. } => "Please upload a valid CSV file.",
            LoadError::Header(_) | LoadError::Parse { .. } => {
                "Error parsing CSV file. Please check the format."
            }
            LoadError::Read { .. } => "Failed to read file.",
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Accept a file when it is declared `text/csv` or its name ends in `.csv`.
pub fn is_csv(name: &str, media_type: Option<&str>) -> bool {
    media_type.is_some_and(|m| m.eq_ignore_ascii_case("text/csv")) || name.ends_with(".csv")
}

/// Load a dataset from a file chosen in the open dialog.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    load_path(path, None)
}

/// Load a dataset from disk, honouring a declared media type (dropped files
/// carry one).
pub fn load_path(path: &Path, media_type: Option<&str>) -> Result<Dataset, LoadError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !is_csv(&name, media_type) {
        return Err(LoadError::InvalidFormat { name });
    }

    let bytes = std::fs::read(path).map_err(|source| LoadError::Read {
        name: name.clone(),
        source,
    })?;
    parse_csv(bytes.as_slice())
}

/// Load a dataset from an in-memory upload (e.g. a dropped file).
pub fn load_bytes(name: &str, media_type: Option<&str>, bytes: &[u8]) -> Result<Dataset, LoadError> {
    if !is_csv(name, media_type) {
        return Err(LoadError::InvalidFormat {
            name: name.to_string(),
        });
    }
    parse_csv(bytes)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// CSV layout: comma separated, header row first, one record per line.
/// Blank lines are skipped; a row whose field count differs from the header
/// aborts the load. Cells are typed with [`guess_cell_type`].
pub fn parse_csv<R: Read>(input: R) -> Result<Dataset, LoadError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .from_reader(input);

    let headers = reader.headers().map_err(LoadError::Header)?;
    let columns = unique_column_names(headers.iter());

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|source| LoadError::Parse {
            row: idx + 1,
            source,
        })?;
        records.push(Record::new(record.iter().map(guess_cell_type).collect()));
    }

    Ok(Dataset::new(columns, records))
}

/// Repeated header names get a `_1`, `_2`, ... suffix so every column stays
/// addressable by name.
fn unique_column_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::new();
    for header in headers {
        let mut name = header.to_string();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{header}_{n}");
            n += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }
    names
}

/// Numbers as written in spreadsheet exports: optional minus, digits with an
/// optional fraction, optional exponent. Surrounding whitespace is allowed,
/// a leading `+` is not.
static NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*-?([0-9]+\.?|\.[0-9]+|[0-9]+\.[0-9]+)([eE][-+]?[0-9]+)?\s*$").unwrap()
});

/// Numbers at or beyond this magnitude lose integer precision as `f64` and
/// are kept as text.
const MAX_EXACT_NUMBER: f64 = 9_007_199_254_740_992.0;

/// Dynamic typing of one cell: empty → null, `true`/`TRUE`/`false`/`FALSE`
/// → boolean, number literal → integer or float, otherwise text. Text keeps
/// its surrounding whitespace.
pub fn guess_cell_type(s: &str) -> CellValue {
    match s {
        "" => return CellValue::Null,
        "true" | "TRUE" => return CellValue::Bool(true),
        "false" | "FALSE" => return CellValue::Bool(false),
        _ => {}
    }
    if NUMBER_PATTERN.is_match(s) {
        let literal = s.trim();
        if let Some(f) = literal
            .parse::<f64>()
            .ok()
            .filter(|f| f.abs() < MAX_EXACT_NUMBER)
        {
            let integral = !literal.contains(['.', 'e', 'E']);
            return match literal.parse::<i64>() {
                Ok(i) if integral => CellValue::Integer(i),
                _ => CellValue::Float(f),
            };
        }
    }
    CellValue::String(s.to_string())
}
