use std::collections::HashMap;

use super::classify::ColumnClassification;
use super::model::Dataset;

/// Number of categories kept in the distribution by default.
pub const DEFAULT_TOP_CATEGORIES: usize = 5;

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Totals for the first numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub column: String,
    pub sum: f64,
    /// `sum / row_count`, rounded to 2 decimals.
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryStats {
    pub row_count: usize,
    /// `None` when the dataset has no numeric column.
    pub numeric: Option<NumericSummary>,
}

/// Row count plus sum/average of the first numeric column.
///
/// Non-numeric cells (null, text, booleans) contribute 0 to the sum.
pub fn summarize(dataset: &Dataset, columns: &ColumnClassification) -> SummaryStats {
    let row_count = dataset.len();

    let numeric = columns
        .first_numeric()
        .filter(|_| row_count > 0)
        .and_then(|name| {
            let idx = dataset.column_index(name)?;
            let sum: f64 = dataset
                .records()
                .iter()
                .map(|r| r.value(idx).as_f64().unwrap_or(0.0))
                .sum();
            Some(NumericSummary {
                column: name.to_string(),
                sum,
                average: round2(sum / row_count as f64),
            })
        });

    SummaryStats { row_count, numeric }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Category distribution
// ---------------------------------------------------------------------------

/// One slice of the category breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionBucket {
    pub label: String,
    pub count: usize,
}

/// Most frequent values of the first categorical column, at most `limit`.
///
/// Values are grouped by their string form. Ties keep the order in which the
/// values were first seen.
pub fn distribution(
    dataset: &Dataset,
    columns: &ColumnClassification,
    limit: usize,
) -> Vec<DistributionBucket> {
    let Some(idx) = columns
        .first_categorical()
        .and_then(|name| dataset.column_index(name))
    else {
        return Vec::new();
    };

    let mut slot_of: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<DistributionBucket> = Vec::new();

    for record in dataset.records() {
        let label = record.value(idx).label();
        match slot_of.get(&label) {
            Some(&slot) => buckets[slot].count += 1,
            None => {
                slot_of.insert(label.clone(), buckets.len());
                buckets.push(DistributionBucket { label, count: 1 });
            }
        }
    }

    // `sort_by` is stable: equal counts stay in first-seen order.
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets.truncate(limit);
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::classify::{ClassifierMode, classify};
    use crate::data::model::CellValue;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    fn sales_dataset() -> Dataset {
        Dataset::from_rows(vec![
            vec![("city", s("NY")), ("sales", CellValue::Integer(10))],
            vec![("city", s("NY")), ("sales", CellValue::Integer(20))],
            vec![("city", s("LA")), ("sales", CellValue::Integer(5))],
        ])
    }

    fn bucket(label: &str, count: usize) -> DistributionBucket {
        DistributionBucket {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn sums_and_averages_first_numeric_column() {
        let ds = sales_dataset();
        let c = classify(&ds, ClassifierMode::FirstRow);
        let stats = summarize(&ds, &c);

        assert_eq!(stats.row_count, 3);
        let numeric = stats.numeric.unwrap();
        assert_eq!(numeric.column, "sales");
        assert_eq!(numeric.sum, 35.0);
        assert_eq!(numeric.average, 11.67);
    }

    #[test]
    fn non_numeric_cells_count_as_zero() {
        let ds = Dataset::from_rows(vec![
            vec![("v", CellValue::Float(1.5))],
            vec![("v", CellValue::Null)],
            vec![("v", s("oops"))],
            vec![("v", CellValue::Bool(true))],
        ]);
        let c = classify(&ds, ClassifierMode::FirstRow);
        let numeric = summarize(&ds, &c).numeric.unwrap();
        assert_eq!(numeric.sum, 1.5);
        assert_eq!(numeric.average, 0.38);
    }

    #[test]
    fn no_numeric_column_means_no_numeric_summary() {
        let ds = Dataset::from_rows(vec![vec![("name", s("x"))]]);
        let c = classify(&ds, ClassifierMode::FirstRow);
        let stats = summarize(&ds, &c);
        assert_eq!(stats.row_count, 1);
        assert!(stats.numeric.is_none());
    }

    #[test]
    fn empty_dataset_degrades_to_zero() {
        let ds = Dataset::default();
        let c = classify(&ds, ClassifierMode::FirstRow);
        assert_eq!(summarize(&ds, &c), SummaryStats::default());
        assert!(distribution(&ds, &c, DEFAULT_TOP_CATEGORIES).is_empty());
    }

    #[test]
    fn distribution_counts_first_categorical_column() {
        let ds = sales_dataset();
        let c = classify(&ds, ClassifierMode::FirstRow);
        assert_eq!(
            distribution(&ds, &c, DEFAULT_TOP_CATEGORIES),
            vec![bucket("NY", 2), bucket("LA", 1)]
        );
    }

    #[test]
    fn distribution_keeps_top_five_with_stable_ties() {
        let cities = ["a", "b", "c", "d", "e", "f", "g", "g", "f"];
        let ds = Dataset::from_rows(cities.iter().map(|c| vec![("city", s(c))]));
        let c = classify(&ds, ClassifierMode::FirstRow);
        let dist = distribution(&ds, &c, DEFAULT_TOP_CATEGORIES);

        assert_eq!(
            dist,
            vec![
                bucket("f", 2),
                bucket("g", 2),
                bucket("a", 1),
                bucket("b", 1),
                bucket("c", 1),
            ]
        );
        let total: usize = dist.iter().map(|b| b.count).sum();
        assert!(total <= ds.len());
        assert!(dist.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn values_collide_by_string_form() {
        // First row text makes the column categorical; later numbers share labels.
        let ds = Dataset::from_rows(vec![
            vec![("code", s("1"))],
            vec![("code", CellValue::Integer(1))],
            vec![("code", CellValue::Float(1.0))],
            vec![("code", CellValue::Null)],
        ]);
        let c = classify(&ds, ClassifierMode::FirstRow);
        assert_eq!(
            distribution(&ds, &c, DEFAULT_TOP_CATEGORIES),
            vec![bucket("1", 3), bucket("null", 1)]
        );
    }

    #[test]
    fn negative_zero_groups_with_zero() {
        let ds = Dataset::from_rows(vec![
            vec![("code", s("0"))],
            vec![("code", CellValue::Float(-0.0))],
            vec![("code", CellValue::Integer(0))],
        ]);
        let c = classify(&ds, ClassifierMode::FirstRow);
        assert_eq!(distribution(&ds, &c, DEFAULT_TOP_CATEGORIES), vec![bucket("0", 3)]);
    }

    #[test]
    fn derived_values_are_idempotent() {
        let ds = sales_dataset();
        let c = classify(&ds, ClassifierMode::FirstRow);
        assert_eq!(summarize(&ds, &c), summarize(&ds, &c));
        assert_eq!(distribution(&ds, &c, 5), distribution(&ds, &c, 5));
    }
}
