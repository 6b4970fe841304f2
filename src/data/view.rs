use super::model::{Dataset, Record};

/// Default number of leading records handed to the charts.
pub const DEFAULT_CHART_WINDOW: usize = 100;

// ---------------------------------------------------------------------------
// Chart window: bounded prefix of the dataset
// ---------------------------------------------------------------------------

/// The first `min(limit, len)` records, unchanged and in order.
///
/// Only bounds rendering cost; statistics always use the full dataset.
pub fn chart_window(dataset: &Dataset, limit: usize) -> &[Record] {
    let end = dataset.len().min(limit);
    &dataset.records()[..end]
}

/// `[row, value]` points of a column over `window`, skipping non-numeric cells.
pub fn numeric_series(window: &[Record], column: usize) -> Vec<[f64; 2]> {
    window
        .iter()
        .enumerate()
        .filter_map(|(row, r)| r.value(column).as_f64().map(|v| [row as f64, v]))
        .collect()
}

/// One x-axis label per window row: the value of `category` when given,
/// otherwise the row index.
pub fn axis_labels(window: &[Record], category: Option<usize>) -> Vec<String> {
    window
        .iter()
        .enumerate()
        .map(|(row, r)| match category {
            Some(col) => r.value(col).label(),
            None => row.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn numbered(n: usize) -> Dataset {
        Dataset::from_rows((0..n).map(|i| vec![("i", CellValue::Integer(i as i64))]))
    }

    #[test]
    fn window_is_capped_prefix() {
        let ds = numbered(150);
        let window = chart_window(&ds, DEFAULT_CHART_WINDOW);
        assert_eq!(window.len(), 100);
        assert_eq!(window, &ds.records()[..100]);
    }

    #[test]
    fn short_dataset_is_returned_whole() {
        let ds = numbered(3);
        assert_eq!(chart_window(&ds, DEFAULT_CHART_WINDOW), ds.records());
        assert!(chart_window(&Dataset::default(), DEFAULT_CHART_WINDOW).is_empty());
    }

    #[test]
    fn series_skips_non_numeric_cells() {
        let ds = Dataset::from_rows(vec![
            vec![("v", CellValue::Integer(4))],
            vec![("v", CellValue::Null)],
            vec![("v", CellValue::Float(2.5))],
        ]);
        let series = numeric_series(ds.records(), 0);
        assert_eq!(series, vec![[0.0, 4.0], [2.0, 2.5]]);
    }

    #[test]
    fn labels_fall_back_to_row_index() {
        let ds = Dataset::from_rows(vec![
            vec![("city", CellValue::String("NY".into())), ("v", CellValue::Integer(1))],
            vec![("city", CellValue::String("LA".into())), ("v", CellValue::Integer(2))],
        ]);
        assert_eq!(axis_labels(ds.records(), Some(0)), vec!["NY", "LA"]);
        assert_eq!(axis_labels(ds.records(), None), vec!["0", "1"]);
    }
}
